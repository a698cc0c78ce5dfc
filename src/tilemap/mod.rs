//! Map asset loading.
//!
//! [`TileMapDescriptor::load`] reads a TMX-style XML document and validates it
//! into plain data: grid dimensions, the tile atlas, one row-major index grid
//! per tile layer, and the obstacle rectangles of the `Collisions` object
//! group. Nothing here knows about collision grids or renderables; the level
//! builds those from a validated descriptor.

mod atlas;
mod raw;

use std::path::Path;

use tracing::debug;

pub use atlas::{AtlasRect, TileAtlas};
use raw::{RawData, RawMap, RawTileset};

use crate::error::AssetParseError;
use crate::geometry::{Cell, GridSize};

/// Name the obstacle object group must carry.
pub const COLLISION_LAYER: &str = "Collisions";

/// Tiled stores flip/rotation flags in the top bits of a global tile index.
const GID_FLAG_MASK: u32 = 0x1FFF_FFFF;

/// One tile layer: a row-major grid of global tile indices, `0` = empty.
#[derive(Clone, Debug, PartialEq)]
pub struct TileLayer {
    pub name: String,
    pub tiles: Vec<u32>,
}

impl TileLayer {
    /// Tile index at `cell`, `0` when outside the layer.
    pub fn get(&self, size: GridSize, cell: Cell) -> u32 {
        size.index_of(cell).and_then(|i| self.tiles.get(i).copied()).unwrap_or(0)
    }
}

/// A rectangular collision body in pixel space.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ObstacleRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ObstacleRect {
    /// The block of cells this body covers, before any clipping.
    ///
    /// The first cell is `(floor(x / tile_w), floor(y / tile_h))`; the block
    /// spans `width / tile_w` by `height / tile_h` cells, truncated. A body
    /// that only partly covers a tile therefore never claims the extra tile.
    pub fn block(&self, tile_w: i32, tile_h: i32) -> CellBlock {
        // Float-to-int casts saturate, so absurd coordinates stay finite.
        CellBlock {
            col: (self.x / tile_w as f64).floor() as i64,
            row: (self.y / tile_h as f64).floor() as i64,
            columns: (self.width / tile_w as f64).trunc().max(0.0) as i64,
            rows: (self.height / tile_h as f64).trunc().max(0.0) as i64,
        }
    }
}

/// A rectangle of cells: origin plus extent, in 64-bit so that blocks far
/// outside any map can still be described.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CellBlock {
    pub col: i64,
    pub row: i64,
    pub columns: i64,
    pub rows: i64,
}

impl CellBlock {
    pub fn area(&self) -> u64 {
        (self.columns.max(0) as u64).saturating_mul(self.rows.max(0) as u64)
    }

    /// Intersection with the `size` grid. Empty blocks have zero extent.
    pub fn clip(&self, size: GridSize) -> CellBlock {
        let col = self.col.max(0);
        let row = self.row.max(0);
        let end_col = self.col.saturating_add(self.columns).min(size.columns.max(0) as i64);
        let end_row = self.row.saturating_add(self.rows).min(size.rows.max(0) as i64);
        CellBlock {
            col,
            row,
            columns: (end_col - col).max(0),
            rows: (end_row - row).max(0),
        }
    }

    /// Cells of a block already clipped to a grid, row by row.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + use<> {
        let CellBlock { col, row, columns, rows } = *self;
        (row..row + rows).flat_map(move |y| (col..col + columns).map(move |x| Cell::new(x as i32, y as i32)))
    }
}

/// A validated map asset.
#[derive(Clone, Debug, PartialEq)]
pub struct TileMapDescriptor {
    pub size: GridSize,
    pub tile_w: i32,
    pub tile_h: i32,
    pub atlas: TileAtlas,
    pub layers: Vec<TileLayer>,
    pub obstacles: Vec<ObstacleRect>,
}

impl TileMapDescriptor {
    /// Read and validate the map at `path`.
    ///
    /// Relative atlas image paths are resolved against the map's directory.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, AssetParseError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| AssetParseError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
        let map = Self::parse(&text, base_dir)?;

        debug!(
            path = %path.display(),
            columns = map.size.columns,
            rows = map.size.rows,
            layers = map.layers.len(),
            obstacles = map.obstacles.len(),
            "loaded tile map"
        );
        Ok(map)
    }

    /// Parse a map document held in memory.
    pub fn parse(text: &str, base_dir: &Path) -> Result<Self, AssetParseError> {
        let raw: RawMap = quick_xml::de::from_str(text)?;

        let columns = positive("width", raw.width)?;
        let rows = positive("height", raw.height)?;
        let tile_w = positive("tilewidth", raw.tile_width)?;
        let tile_h = positive("tileheight", raw.tile_height)?;
        let size = GridSize::new(columns, rows);
        if size.checked_area().is_none() {
            return Err(AssetParseError::TooLarge { columns, rows });
        }

        let tileset = raw.tilesets.first().ok_or(AssetParseError::Missing("tileset"))?;
        let atlas = build_atlas(tileset, tile_w as u32, tile_h as u32, base_dir)?;

        if raw.layers.is_empty() {
            return Err(AssetParseError::Missing("tile layer"));
        }
        let layers = raw
            .layers
            .iter()
            .enumerate()
            .map(|(i, layer)| {
                let name = layer.name.clone().unwrap_or_else(|| format!("layer {i}"));
                let data = layer.data.as_ref().ok_or(AssetParseError::Missing("tile layer data"))?;
                let tiles = decode_tiles(&name, data, size.area())?;
                Ok(TileLayer { name, tiles })
            })
            .collect::<Result<Vec<_>, AssetParseError>>()?;

        let group = raw
            .object_groups
            .iter()
            .find(|g| g.name.as_deref() == Some(COLLISION_LAYER))
            .ok_or(AssetParseError::Missing("'Collisions' object group"))?;

        let obstacles = group
            .objects
            .iter()
            .filter_map(|obj| match (obj.width, obj.height) {
                (Some(width), Some(height)) => Some(ObstacleRect {
                    x: obj.x.unwrap_or(0.0),
                    y: obj.y.unwrap_or(0.0),
                    width,
                    height,
                }),
                _ => {
                    debug!(id = ?obj.id, "skipping non-rectangular collision object");
                    None
                }
            })
            .collect();

        Ok(Self { size, tile_w, tile_h, atlas, layers, obstacles })
    }
}

fn positive(field: &'static str, value: Option<i64>) -> Result<i32, AssetParseError> {
    let value = value.ok_or(AssetParseError::Missing(field))?;
    if value <= 0 || value > i32::MAX as i64 {
        return Err(AssetParseError::NonPositive { field, value });
    }
    Ok(value as i32)
}

fn build_atlas(
    tileset: &RawTileset,
    tile_w: u32,
    tile_h: u32,
    base_dir: &Path,
) -> Result<TileAtlas, AssetParseError> {
    if let Some(source) = &tileset.source {
        return Err(AssetParseError::ExternalTileset(source.clone()));
    }
    let image = tileset.image.as_ref().ok_or(AssetParseError::Missing("tileset image"))?;
    let source = image.source.as_deref().ok_or(AssetParseError::Missing("tileset image source"))?;
    let image_path = base_dir.join(source);

    let (image_width, image_height) = match (image.width, image.height) {
        (Some(w), Some(h)) => (w, h),
        _ => image::image_dimensions(&image_path).map_err(|source| {
            AssetParseError::AtlasImage { path: image_path.clone(), source }
        })?,
    };

    Ok(TileAtlas {
        image: image_path,
        image_width,
        image_height,
        tile_w,
        tile_h,
        first_gid: tileset.first_gid.unwrap_or(1),
    })
}

fn decode_tiles(layer: &str, data: &RawData, expected: usize) -> Result<Vec<u32>, AssetParseError> {
    if let Some(compression) = &data.compression {
        return Err(AssetParseError::UnsupportedEncoding {
            layer: layer.to_string(),
            encoding: compression.clone(),
        });
    }

    let tiles: Vec<u32> = match data.encoding.as_deref() {
        None => data.tiles.iter().map(|t| t.gid.unwrap_or(0) & GID_FLAG_MASK).collect(),
        Some("csv") => data
            .text
            .as_deref()
            .unwrap_or("")
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                s.parse::<u32>()
                    .map(|gid| gid & GID_FLAG_MASK)
                    .map_err(|_| AssetParseError::InvalidTileIndex {
                        layer: layer.to_string(),
                        value: s.to_string(),
                    })
            })
            .collect::<Result<_, _>>()?,
        Some(other) => {
            return Err(AssetParseError::UnsupportedEncoding {
                layer: layer.to_string(),
                encoding: other.to_string(),
            });
        }
    };

    if tiles.len() != expected {
        return Err(AssetParseError::LayerSize {
            layer: layer.to_string(),
            expected,
            found: tiles.len(),
        });
    }
    Ok(tiles)
}
