use serde::Deserialize;

// ── Raw (XML-facing) types ────────────────────────────────────────────────────
//
// These mirror the map document one-to-one and keep every attribute optional;
// `TileMapDescriptor::parse` decides what is required and reports what is
// missing. Attributes carry the `@` prefix quick-xml expects.

#[derive(Debug, Deserialize)]
pub(super) struct RawMap {
    #[serde(rename = "@width", default)]
    pub width: Option<i64>,
    #[serde(rename = "@height", default)]
    pub height: Option<i64>,
    #[serde(rename = "@tilewidth", default)]
    pub tile_width: Option<i64>,
    #[serde(rename = "@tileheight", default)]
    pub tile_height: Option<i64>,
    #[serde(rename = "tileset", default)]
    pub tilesets: Vec<RawTileset>,
    #[serde(rename = "layer", default)]
    pub layers: Vec<RawLayer>,
    #[serde(rename = "objectgroup", default)]
    pub object_groups: Vec<RawObjectGroup>,
}

#[derive(Debug, Deserialize)]
pub(super) struct RawTileset {
    #[serde(rename = "@firstgid", default)]
    pub first_gid: Option<u32>,
    /// Set when the tileset lives in a separate `.tsx` file.
    #[serde(rename = "@source", default)]
    pub source: Option<String>,
    #[serde(default)]
    pub image: Option<RawImage>,
}

#[derive(Debug, Deserialize)]
pub(super) struct RawImage {
    #[serde(rename = "@source", default)]
    pub source: Option<String>,
    #[serde(rename = "@width", default)]
    pub width: Option<u32>,
    #[serde(rename = "@height", default)]
    pub height: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub(super) struct RawLayer {
    #[serde(rename = "@name", default)]
    pub name: Option<String>,
    #[serde(default)]
    pub data: Option<RawData>,
}

#[derive(Debug, Deserialize)]
pub(super) struct RawData {
    #[serde(rename = "@encoding", default)]
    pub encoding: Option<String>,
    #[serde(rename = "@compression", default)]
    pub compression: Option<String>,
    #[serde(rename = "tile", default)]
    pub tiles: Vec<RawTile>,
    #[serde(rename = "$text", default)]
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct RawTile {
    /// Absent on empty cells (`<tile/>`).
    #[serde(rename = "@gid", default)]
    pub gid: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub(super) struct RawObjectGroup {
    #[serde(rename = "@name", default)]
    pub name: Option<String>,
    #[serde(rename = "object", default)]
    pub objects: Vec<RawObject>,
}

#[derive(Debug, Deserialize)]
pub(super) struct RawObject {
    #[serde(rename = "@id", default)]
    pub id: Option<u32>,
    #[serde(rename = "@x", default)]
    pub x: Option<f64>,
    #[serde(rename = "@y", default)]
    pub y: Option<f64>,
    #[serde(rename = "@width", default)]
    pub width: Option<f64>,
    #[serde(rename = "@height", default)]
    pub height: Option<f64>,
}
