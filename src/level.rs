//! Per-level orchestration.
//!
//! [`LevelCoordinator`] owns everything that belongs to one loaded level (the
//! collision grid, the tile layers, the grid items, the hero and the enemy
//! director) and drives them through one `update` and one `draw` per frame.

use std::rc::Rc;

use tracing::{debug, info, trace, warn};

use crate::config::CoordinatorConfig;
use crate::error::{CommandError, LevelError};
use crate::geometry::{Cell, Direction, cell_to_pixel, pixel_to_cell};
use crate::grid::{CollisionGrid, GridItems};
use crate::hero::Hero;
use crate::material::MaterialKind;
use crate::pathfinding::prelude::{Path, find_path};
use crate::render::{Color, RenderSink};
use crate::services::{BeatTiming, EnemyDirector, EnemySnapshot, Services};
use crate::tilemap::{TileLayer, TileMapDescriptor};

// ── Interaction records ─────────────────────────────────────────────────────

/// A cell touched by an enemy this tick.
///
/// The enemy's own cell carries no tint; cells covered by its attack pattern
/// carry the highlight tint.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct InteractionRecord {
    pub row: i32,
    pub column: i32,
    pub tint: Option<Color>,
}

impl InteractionRecord {
    pub fn cell(&self) -> Cell {
        Cell::new(self.column, self.row)
    }
}

// ── Movement marker ─────────────────────────────────────────────────────────

/// Indicator of the hero's pending destination.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MovementMarker {
    pos: [f32; 2],
    hidden: bool,
}

impl MovementMarker {
    fn hidden() -> Self {
        Self { pos: [0.0, 0.0], hidden: true }
    }

    /// Top-left pixel of the destination cell.
    pub fn pos(&self) -> [f32; 2] {
        self.pos
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }
}

// ── Coordinator ─────────────────────────────────────────────────────────────

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LevelState {
    Unloaded,
    Loaded,
}

struct LoadedLevel {
    map: TileMapDescriptor,
    collision: CollisionGrid,
    items: GridItems,
    hero: Hero,
    beat: BeatTiming,
    path: Path,
    marker: MovementMarker,
    interactions: Vec<InteractionRecord>,
}

pub struct LevelCoordinator<E: EnemyDirector> {
    config: CoordinatorConfig,
    enemies: E,
    level: Option<LoadedLevel>,
}

impl<E: EnemyDirector> LevelCoordinator<E> {
    pub fn new(enemies: E) -> Self {
        Self::with_config(CoordinatorConfig::default(), enemies)
    }

    pub fn with_config(config: CoordinatorConfig, enemies: E) -> Self {
        Self { config, enemies, level: None }
    }

    pub fn state(&self) -> LevelState {
        if self.level.is_some() { LevelState::Loaded } else { LevelState::Unloaded }
    }

    // ── Load / clear ────────────────────────────────────────────────────────

    /// Replace whatever is loaded with `level`.
    ///
    /// The previous level is always cleared first. If anything about the new
    /// level fails to load, the coordinator is left `Unloaded` and the error
    /// is returned; no part of the new level is kept.
    pub fn load_level(&mut self, level: &str, services: &mut Services<'_>) -> Result<(), LevelError> {
        self.clear(services);

        match self.build_level(level, services) {
            Ok(loaded) => {
                info!(
                    level,
                    columns = loaded.map.size.columns,
                    rows = loaded.map.size.rows,
                    spawn_x = loaded.hero.cell().x,
                    spawn_y = loaded.hero.cell().y,
                    "level loaded"
                );
                self.level = Some(loaded);
                Ok(())
            }
            Err(err) => {
                warn!(level, error = %err, "level failed to load");
                self.enemies.clear();
                services.script.clear();
                Err(err)
            }
        }
    }

    fn build_level(&mut self, level: &str, services: &mut Services<'_>) -> Result<LoadedLevel, LevelError> {
        let params = services.script.load_level(level)?;
        let map = TileMapDescriptor::load(&params.map_path)?;

        if params.size != map.size {
            warn!(
                script_columns = params.size.columns,
                script_rows = params.size.rows,
                map_columns = map.size.columns,
                map_rows = map.size.rows,
                "level script and map disagree on grid size; using the map"
            );
        }
        if !map.size.contains(params.hero_spawn) {
            return Err(LevelError::SpawnOutOfBounds {
                spawn: params.hero_spawn,
                columns: map.size.columns,
                rows: map.size.rows,
            });
        }

        let mut collision = CollisionGrid::from_obstacles(map.size, map.tile_w, map.tile_h, &map.obstacles);
        let items = GridItems::from_map(&map);
        let hero = Hero::new(
            services.script.hero_definition(),
            params.hero_spawn,
            services.materials.default_material(),
            [map.tile_w, map.tile_h],
        )
        .with_color(self.config.hero_color);

        self.enemies.init(map.size, [map.tile_w, map.tile_h], &collision, &params.enemies);
        collision.refresh(&self.enemies.occupied_cells());

        Ok(LoadedLevel {
            map,
            collision,
            items,
            hero,
            beat: params.beat,
            path: Path::new(),
            marker: MovementMarker::hidden(),
            interactions: Vec::new(),
        })
    }

    /// Drop the loaded level, the enemies and the script's level state.
    pub fn clear(&mut self, services: &mut Services<'_>) {
        if self.level.take().is_some() {
            debug!("level cleared");
        }
        self.enemies.clear();
        services.script.clear();
    }

    // ── Tick ────────────────────────────────────────────────────────────────

    /// Advance the level by one tick. Does nothing while unloaded.
    pub fn update(&mut self, services: &mut Services<'_>) {
        let Some(level) = self.level.as_mut() else {
            return;
        };

        self.enemies.update();

        if let Some(next) = level.path.pop_next() {
            let departed = level.hero.move_to(next);
            let material = Rc::clone(level.hero.material());
            if let Some(item) = level.items.get_mut(departed) {
                item.apply_material(material);
            }
            if level.path.is_empty() {
                level.marker.hidden = true;
            }
            services.script.set_hero_position(next);
            trace!(x = next.x, y = next.y, remaining = level.path.len(), "hero stepped");
        } else if !level.marker.hidden {
            // Goal was unreachable or already reached.
            level.marker.hidden = true;
        }

        level.hero.update();
        level.collision.refresh(&self.enemies.occupied_cells());
        services.script.update_triggers();

        let snapshots = self.enemies.enemies();
        process_interactions(level, &mut self.enemies, &snapshots, self.config.highlight_color);
    }

    /// Submit this frame's draw commands: grid, highlights, marker, hero, enemies.
    pub fn draw(&self, sink: &mut dyn RenderSink) {
        let Some(level) = self.level.as_ref() else {
            return;
        };

        level.items.draw(sink);

        for record in &level.interactions {
            let Some(tint) = record.tint else { continue };
            let Some(item) = level.items.get(record.cell()) else { continue };
            if self.config.draw_highlights {
                item.draw_cell(sink, tint);
            }
        }

        if !level.marker.hidden {
            sink.fill_circle(level.marker.pos, self.config.marker_radius, self.config.marker_color);
        }

        level.hero.draw(sink);
        self.enemies.draw(sink);
    }

    // ── Commands ────────────────────────────────────────────────────────────

    /// Cell under a pixel position, if it lies on the grid.
    pub fn pixel_to_cell(&self, px: i32, py: i32) -> Option<Cell> {
        let level = self.level.as_ref()?;
        let cell = pixel_to_cell(px, py, level.map.tile_w, level.map.tile_h);
        level.collision.in_bounds(cell).then_some(cell)
    }

    /// Path the hero toward the cell under `(px, py)`.
    ///
    /// Any path in progress is discarded. Returns the number of steps in the
    /// new path, which is `0` when the goal cannot be reached. Destinations off
    /// the grid are rejected and leave the path and marker untouched.
    pub fn move_to_point(&mut self, px: i32, py: i32) -> Result<usize, CommandError> {
        let level = self.level.as_mut().ok_or(CommandError::NotLoaded)?;
        let cell = pixel_to_cell(px, py, level.map.tile_w, level.map.tile_h);
        if !level.collision.in_bounds(cell) {
            warn!(px, py, x = cell.x, y = cell.y, "move target outside the grid");
            return Err(CommandError::OutOfBounds(cell));
        }

        level.path = find_path(&level.collision, level.hero.cell(), cell);
        level.marker.pos = cell_to_pixel(cell, level.map.tile_w, level.map.tile_h);
        level.marker.hidden = false;

        debug!(x = cell.x, y = cell.y, steps = level.path.len(), "new movement path");
        Ok(level.path.len())
    }

    /// Move the hero one cell in `dir`, cancelling any path in progress.
    pub fn step_hero(&mut self, dir: Direction, services: &mut Services<'_>) -> Result<Cell, CommandError> {
        let level = self.level.as_mut().ok_or(CommandError::NotLoaded)?;
        let target = level.hero.cell().step(dir);
        if !level.collision.in_bounds(target) {
            return Err(CommandError::OutOfBounds(target));
        }
        if level.collision.is_blocked(target) {
            return Err(CommandError::Blocked(target));
        }

        level.path.clear();
        level.marker.hidden = true;
        level.hero.move_to(target);
        services.script.set_hero_position(target);
        Ok(target)
    }

    /// Give the hero the library's shared instance of `kind`.
    pub fn set_material(&mut self, kind: MaterialKind, services: &Services<'_>) -> Result<(), CommandError> {
        let level = self.level.as_mut().ok_or(CommandError::NotLoaded)?;
        level.hero.apply_material(services.materials.get(kind));
        Ok(())
    }

    // ── Accessors ───────────────────────────────────────────────────────────

    pub fn config(&self) -> &CoordinatorConfig {
        &self.config
    }

    pub fn enemies(&self) -> &E {
        &self.enemies
    }

    pub fn enemies_mut(&mut self) -> &mut E {
        &mut self.enemies
    }

    pub fn map(&self) -> Option<&TileMapDescriptor> {
        self.level.as_ref().map(|l| &l.map)
    }

    pub fn tile_layers(&self) -> &[TileLayer] {
        match &self.level {
            Some(level) => &level.map.layers,
            None => &[],
        }
    }

    pub fn collision(&self) -> Option<&CollisionGrid> {
        self.level.as_ref().map(|l| &l.collision)
    }

    pub fn items(&self) -> Option<&GridItems> {
        self.level.as_ref().map(|l| &l.items)
    }

    pub fn hero(&self) -> Option<&Hero> {
        self.level.as_ref().map(|l| &l.hero)
    }

    pub fn path(&self) -> Option<&Path> {
        self.level.as_ref().map(|l| &l.path)
    }

    pub fn marker(&self) -> Option<&MovementMarker> {
        self.level.as_ref().map(|l| &l.marker)
    }

    pub fn beat(&self) -> Option<BeatTiming> {
        self.level.as_ref().map(|l| l.beat)
    }

    /// Interaction records from the last tick.
    pub fn interactions(&self) -> &[InteractionRecord] {
        match &self.level {
            Some(level) => &level.interactions,
            None => &[],
        }
    }
}

/// Rebuild the level's interaction records from this tick's enemies and fire
/// material collision hooks for enemies standing on a material.
fn process_interactions<E: EnemyDirector>(
    level: &mut LoadedLevel,
    enemies: &mut E,
    snapshots: &[EnemySnapshot],
    highlight: Color,
) {
    level.interactions.clear();

    for enemy in snapshots {
        let cell = enemy.occupied_cell();
        let Some(item) = level.items.get(cell) else {
            trace!(index = enemy.index, x = cell.x, y = cell.y, "enemy outside the grid");
            continue;
        };

        if item.has_material() {
            if let Some(material) = item.material().cloned() {
                match enemies.handle(enemy.index) {
                    Some(target) => material.on_collide(target),
                    None => warn!(index = enemy.index, "enemy has no collision handle"),
                }
            }
        }

        level.interactions.push(InteractionRecord { row: cell.y, column: cell.x, tint: None });
        for &(dx, dy) in &enemy.pattern {
            let hit = cell.offset(dx, dy);
            level.interactions.push(InteractionRecord { row: hit.y, column: hit.x, tint: Some(highlight) });
        }
    }
}
