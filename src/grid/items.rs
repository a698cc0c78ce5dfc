use std::rc::Rc;

use crate::geometry::{Cell, GridSize, cell_to_pixel};
use crate::material::Material;
use crate::render::{Color, RenderSink};
use crate::tilemap::{AtlasRect, TileMapDescriptor};

// ── GridItem ─────────────────────────────────────────────────────────────────

/// The renderable, interactable contents of one cell.
#[derive(Clone, Debug)]
pub struct GridItem {
    /// Top-left pixel.
    pos: [f32; 2],
    size: [f32; 2],
    /// One atlas tile per non-empty layer, bottom layer first.
    tiles: Vec<AtlasRect>,
    material: Option<Rc<Material>>,
    overlay: Color,
}

impl GridItem {
    pub fn new(pos: [f32; 2], size: [f32; 2], tiles: Vec<AtlasRect>) -> Self {
        Self { pos, size, tiles, material: None, overlay: Color::TRANSPARENT }
    }

    pub fn pos(&self) -> [f32; 2] {
        self.pos
    }

    pub fn tiles(&self) -> &[AtlasRect] {
        &self.tiles
    }

    pub fn material(&self) -> Option<&Rc<Material>> {
        self.material.as_ref()
    }

    /// True when the cell holds a material other than the default one.
    pub fn has_material(&self) -> bool {
        self.material.as_ref().is_some_and(|m| !m.is_default())
    }

    /// Overlay tint the current material paints over the cell.
    pub fn overlay(&self) -> Color {
        self.overlay
    }

    pub fn apply_material(&mut self, material: Rc<Material>) {
        self.overlay = material.tint();
        self.material = Some(material);
    }

    pub fn draw(&self, sink: &mut dyn RenderSink) {
        for &tile in &self.tiles {
            sink.draw_tile(tile, self.pos);
        }
        if self.material.is_some() {
            sink.fill_rect(self.pos, self.size, self.overlay);
        }
    }

    /// Paint a one-off tint over the cell (interaction highlights).
    pub fn draw_cell(&self, sink: &mut dyn RenderSink, tint: Color) {
        sink.fill_rect(self.pos, self.size, tint);
    }
}

// ── GridItems ────────────────────────────────────────────────────────────────

/// Exactly one [`GridItem`] per cell, row-major, same shape as the collision grid.
#[derive(Clone, Debug, Default)]
pub struct GridItems {
    size: GridSize,
    items: Vec<GridItem>,
}

impl GridItems {
    /// Build the registry from a map's tile layers.
    ///
    /// Cells whose every layer is empty still get an item (with no tiles) so
    /// materials can be dropped anywhere on the grid.
    pub fn from_map(map: &TileMapDescriptor) -> Self {
        let size = map.size;
        let tile_size = [map.tile_w as f32, map.tile_h as f32];
        let mut items = Vec::with_capacity(size.area());

        for row in 0..size.rows {
            for col in 0..size.columns {
                let cell = Cell::new(col, row);
                let tiles = map
                    .layers
                    .iter()
                    .filter_map(|layer| map.atlas.source_rect(layer.get(size, cell)))
                    .collect();
                items.push(GridItem::new(cell_to_pixel(cell, map.tile_w, map.tile_h), tile_size, tiles));
            }
        }

        Self { size, items }
    }

    pub fn size(&self) -> GridSize {
        self.size
    }

    pub fn get(&self, cell: Cell) -> Option<&GridItem> {
        self.size.index_of(cell).map(|i| &self.items[i])
    }

    pub fn get_mut(&mut self, cell: Cell) -> Option<&mut GridItem> {
        self.size.index_of(cell).map(|i| &mut self.items[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &GridItem> {
        self.items.iter()
    }

    pub fn draw(&self, sink: &mut dyn RenderSink) {
        for item in &self.items {
            item.draw(sink);
        }
    }
}
