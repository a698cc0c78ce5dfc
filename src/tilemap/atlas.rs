use std::path::PathBuf;

/// Pixel rectangle inside the atlas image.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct AtlasRect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

/// The tileset image a map's tile indices point into.
#[derive(Clone, Debug, PartialEq)]
pub struct TileAtlas {
    /// Image path, resolved against the map file's directory.
    pub image: PathBuf,
    pub image_width: u32,
    pub image_height: u32,
    pub tile_w: u32,
    pub tile_h: u32,
    /// Global index of the atlas's first tile (1 in single-tileset maps).
    pub first_gid: u32,
}

impl TileAtlas {
    /// Tiles per atlas row.
    pub fn cols(&self) -> u32 {
        if self.tile_w == 0 { 0 } else { self.image_width / self.tile_w }
    }

    /// Tiles per atlas column.
    pub fn rows(&self) -> u32 {
        if self.tile_h == 0 { 0 } else { self.image_height / self.tile_h }
    }

    /// Source rectangle for global tile index `gid`.
    ///
    /// Returns `None` for the empty index `0`, for indices below `first_gid`,
    /// and for indices past the end of the atlas.
    pub fn source_rect(&self, gid: u32) -> Option<AtlasRect> {
        if gid == 0 || gid < self.first_gid {
            return None;
        }
        let cols = self.cols();
        let index = gid - self.first_gid;
        if cols == 0 || index >= cols * self.rows() {
            return None;
        }
        let col = index % cols;
        let row = index / cols;
        Some(AtlasRect {
            x: col * self.tile_w,
            y: row * self.tile_h,
            w: self.tile_w,
            h: self.tile_h,
        })
    }
}
