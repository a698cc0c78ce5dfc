//! Collaborators the level coordinator talks to.
//!
//! The coordinator never reaches for globals: the script host and material
//! library arrive through [`Services`] on every call that needs them, and the
//! enemy director is owned by the coordinator itself.

use std::path::PathBuf;

use glam::Vec2;

use crate::error::ScriptError;
use crate::geometry::{Cell, GridSize};
use crate::grid::CollisionGrid;
use crate::hero::HeroDefinition;
use crate::material::{Collidable, MaterialLibrary};
use crate::render::RenderSink;

// ── Level script ─────────────────────────────────────────────────────────────

/// Beat timing, in seconds.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct BeatTiming {
    pub pause: f64,
    pub buffer: f64,
}

/// Where an enemy starts and how it behaves.
#[derive(Clone, Debug, PartialEq)]
pub struct EnemySpawn {
    pub kind: String,
    pub cell: Cell,
    /// Cells the enemy walks through, in order, looping.
    pub route: Vec<Cell>,
    /// Attack pattern as offsets from the enemy's cell.
    pub pattern: Vec<(i32, i32)>,
}

/// Everything a level definition supplies.
#[derive(Clone, Debug, PartialEq)]
pub struct LevelParams {
    /// Grid size the script expects; the map has the final word.
    pub size: GridSize,
    pub hero_spawn: Cell,
    pub beat: BeatTiming,
    pub map_path: PathBuf,
    pub enemies: Vec<EnemySpawn>,
}

/// The scripting side of a level.
pub trait LevelScript {
    /// Load the level definition named `level` and report its parameters.
    fn load_level(&mut self, level: &str) -> Result<LevelParams, ScriptError>;

    /// The hero to spawn for the loaded level.
    fn hero_definition(&self) -> HeroDefinition;

    /// Evaluate level triggers; called once per tick.
    fn update_triggers(&mut self);

    /// Store the hero's grid coordinates after it moves.
    fn set_hero_position(&mut self, cell: Cell);

    /// Forget the loaded level.
    fn clear(&mut self);
}

// ── Enemy director ───────────────────────────────────────────────────────────

/// One enemy as seen by the level for a single tick.
#[derive(Clone, Debug, PartialEq)]
pub struct EnemySnapshot {
    pub index: usize,
    /// Continuous position in cell units.
    pub pos: Vec2,
    pub pattern: Vec<(i32, i32)>,
}

impl EnemySnapshot {
    /// The cell this enemy counts as standing on (position rounded up).
    pub fn occupied_cell(&self) -> Cell {
        Cell::new(self.pos.x.ceil() as i32, self.pos.y.ceil() as i32)
    }
}

/// The enemy subsystem. Its AI is its own business; the level only needs
/// positions, attack patterns, occupancy and collision handles.
pub trait EnemyDirector {
    /// Called once per level load. `tile_size` is the map's tile edge in pixels.
    fn init(&mut self, bounds: GridSize, tile_size: [i32; 2], grid: &CollisionGrid, spawns: &[EnemySpawn]);

    fn update(&mut self);

    /// Active enemies this tick.
    fn enemies(&self) -> Vec<EnemySnapshot>;

    /// Cells blocked by enemies this tick.
    fn occupied_cells(&self) -> Vec<Cell>;

    /// Handle a material's collision hook can act on.
    fn handle(&mut self, index: usize) -> Option<&mut dyn Collidable>;

    fn draw(&self, sink: &mut dyn RenderSink);

    fn clear(&mut self);
}

// ── Services ─────────────────────────────────────────────────────────────────

/// Shared collaborators handed to the coordinator for the duration of a call.
pub struct Services<'a> {
    pub script: &'a mut dyn LevelScript,
    pub materials: &'a MaterialLibrary,
}

impl<'a> Services<'a> {
    pub fn new(script: &'a mut dyn LevelScript, materials: &'a MaterialLibrary) -> Self {
        Self { script, materials }
    }
}
