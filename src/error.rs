use std::path::PathBuf;

use crate::geometry::Cell;

/// A map asset could not be turned into a [`TileMapDescriptor`](crate::tilemap::TileMapDescriptor).
#[derive(Debug, thiserror::Error)]
pub enum AssetParseError {
    #[error("failed to read map asset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed map document: {0}")]
    Xml(#[from] quick_xml::DeError),

    #[error("map is missing required {0}")]
    Missing(&'static str),

    #[error("map {field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: i64 },

    #[error("map of {columns}x{rows} cells is too large")]
    TooLarge { columns: i32, rows: i32 },

    #[error("tile layer '{layer}' holds {found} tiles, expected {expected}")]
    LayerSize {
        layer: String,
        expected: usize,
        found: usize,
    },

    #[error("tile layer '{layer}' uses unsupported encoding '{encoding}'")]
    UnsupportedEncoding { layer: String, encoding: String },

    #[error("tile layer '{layer}' has invalid tile index '{value}'")]
    InvalidTileIndex { layer: String, value: String },

    #[error("external tileset '{0}' is not supported")]
    ExternalTileset(String),

    #[error("failed to read atlas image {path}: {source}")]
    AtlasImage {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// The level script host could not supply level parameters.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("level '{0}' is not defined")]
    UnknownLevel(String),

    #[error("failed to read level definition {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed level definition {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Loading a level failed. Nothing of the new level has been committed.
#[derive(Debug, thiserror::Error)]
pub enum LevelError {
    #[error(transparent)]
    Asset(#[from] AssetParseError),

    #[error(transparent)]
    Script(#[from] ScriptError),

    #[error("hero spawn ({}, {}) lies outside the {columns}x{rows} grid", .spawn.x, .spawn.y)]
    SpawnOutOfBounds { spawn: Cell, columns: i32, rows: i32 },
}

/// A navigation or movement command was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("no level is loaded")]
    NotLoaded,

    #[error("cell ({}, {}) lies outside the grid", .0.x, .0.y)]
    OutOfBounds(Cell),

    #[error("cell ({}, {}) is blocked", .0.x, .0.y)]
    Blocked(Cell),
}
