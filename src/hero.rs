use std::path::PathBuf;
use std::rc::Rc;

use crate::geometry::{Cell, cell_to_pixel};
use crate::material::Material;
use crate::render::{Color, RenderSink};

/// Ticks per animation frame.
const TICKS_PER_FRAME: u32 = 4;

/// Who the hero is, as supplied by the level script.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeroDefinition {
    pub id: u32,
    /// Script describing the hero's abilities and animations.
    pub behavior: PathBuf,
}

/// The player character on the grid.
///
/// Only the parts the level coordinates live here: where the hero stands,
/// which material it carries, and a frame counter standing in for animation.
#[derive(Debug)]
pub struct Hero {
    definition: HeroDefinition,
    cell: Cell,
    material: Rc<Material>,
    tile_size: [i32; 2],
    ticks: u32,
    frame: u32,
    color: Color,
}

impl Hero {
    pub fn new(definition: HeroDefinition, cell: Cell, material: Rc<Material>, tile_size: [i32; 2]) -> Self {
        Self { definition, cell, material, tile_size, ticks: 0, frame: 0, color: Color::WHITE }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn definition(&self) -> &HeroDefinition {
        &self.definition
    }

    pub fn cell(&self) -> Cell {
        self.cell
    }

    pub fn pixel_pos(&self) -> [f32; 2] {
        cell_to_pixel(self.cell, self.tile_size[0], self.tile_size[1])
    }

    /// Step onto `cell`, returning the cell just left.
    pub fn move_to(&mut self, cell: Cell) -> Cell {
        std::mem::replace(&mut self.cell, cell)
    }

    pub fn material(&self) -> &Rc<Material> {
        &self.material
    }

    pub fn apply_material(&mut self, material: Rc<Material>) {
        self.material = material;
    }

    /// Current animation frame.
    pub fn frame(&self) -> u32 {
        self.frame
    }

    pub fn update(&mut self) {
        self.ticks += 1;
        if self.ticks >= TICKS_PER_FRAME {
            self.ticks = 0;
            self.frame = self.frame.wrapping_add(1);
        }
    }

    pub fn draw(&self, sink: &mut dyn RenderSink) {
        let size = [self.tile_size[0] as f32, self.tile_size[1] as f32];
        sink.fill_rect(self.pixel_pos(), size, self.color);
    }
}
