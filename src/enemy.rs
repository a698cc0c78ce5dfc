//! A minimal enemy director: every enemy walks a looping waypoint route one
//! cell at a time, gliding between cells over `step_ticks` ticks.

use glam::Vec2;
use tracing::debug;

use crate::geometry::{Cell, GridSize};
use crate::grid::CollisionGrid;
use crate::material::{Collidable, MaterialKind};
use crate::render::{Color, RenderSink};
use crate::services::{EnemyDirector, EnemySnapshot, EnemySpawn};

const ENEMY_COLOR: Color = Color([0.85, 0.15, 0.2, 1.0]);

#[derive(Clone, Debug)]
pub struct WaypointEnemy {
    kind: String,
    from: Cell,
    to: Option<Cell>,
    progress: u32,
    pos: Vec2,
    route: Vec<Cell>,
    next_waypoint: usize,
    pattern: Vec<(i32, i32)>,
    /// Materials this enemy has collided with, oldest first.
    hits: Vec<MaterialKind>,
}

impl WaypointEnemy {
    fn spawn(spawn: &EnemySpawn) -> Self {
        Self {
            kind: spawn.kind.clone(),
            from: spawn.cell,
            to: None,
            progress: 0,
            pos: Vec2::new(spawn.cell.x as f32, spawn.cell.y as f32),
            route: spawn.route.clone(),
            next_waypoint: 0,
            pattern: spawn.pattern.clone(),
            hits: Vec::new(),
        }
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    pub fn hits(&self) -> &[MaterialKind] {
        &self.hits
    }

    /// Pick the next cell toward the current waypoint, x axis first.
    fn choose_step(&mut self, grid: &CollisionGrid) -> Option<Cell> {
        if self.route.is_empty() {
            return None;
        }
        if self.route[self.next_waypoint] == self.from {
            self.next_waypoint = (self.next_waypoint + 1) % self.route.len();
        }
        let target = self.route[self.next_waypoint];
        let dx = (target.x - self.from.x).signum();
        let dy = (target.y - self.from.y).signum();

        [(dx, 0), (0, dy)]
            .into_iter()
            .filter(|&(x, y)| x != 0 || y != 0)
            .map(|(x, y)| self.from.offset(x, y))
            .find(|&cell| !grid.is_statically_blocked(cell))
    }

    fn advance(&mut self, grid: &CollisionGrid, step_ticks: u32) {
        if self.to.is_none() {
            self.to = self.choose_step(grid);
        }
        let Some(to) = self.to else {
            return;
        };

        self.progress += 1;
        let t = self.progress as f32 / step_ticks as f32;
        let from = Vec2::new(self.from.x as f32, self.from.y as f32);
        let dest = Vec2::new(to.x as f32, to.y as f32);
        self.pos = from.lerp(dest, t.min(1.0));

        if self.progress >= step_ticks {
            self.from = to;
            self.to = None;
            self.progress = 0;
            self.pos = dest;
        }
    }
}

impl Collidable for WaypointEnemy {
    fn on_material(&mut self, kind: MaterialKind) {
        debug!(enemy = %self.kind, ?kind, "enemy hit by material");
        self.hits.push(kind);
    }
}

/// Enemies that patrol fixed routes.
#[derive(Debug)]
pub struct WaypointEnemies {
    step_ticks: u32,
    tile_size: [f32; 2],
    grid: CollisionGrid,
    enemies: Vec<WaypointEnemy>,
}

impl WaypointEnemies {
    /// `step_ticks` is how many ticks one cell of movement takes (at least 1).
    pub fn new(step_ticks: u32) -> Self {
        Self {
            step_ticks: step_ticks.max(1),
            tile_size: [0.0, 0.0],
            grid: CollisionGrid::default(),
            enemies: Vec::new(),
        }
    }

    pub fn get(&self, index: usize) -> Option<&WaypointEnemy> {
        self.enemies.get(index)
    }

    pub fn len(&self) -> usize {
        self.enemies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty()
    }
}

impl EnemyDirector for WaypointEnemies {
    fn init(&mut self, bounds: GridSize, tile_size: [i32; 2], grid: &CollisionGrid, spawns: &[EnemySpawn]) {
        self.tile_size = [tile_size[0] as f32, tile_size[1] as f32];
        self.grid = grid.clone();
        self.enemies = spawns
            .iter()
            .filter(|s| {
                let inside = bounds.contains(s.cell);
                if !inside {
                    debug!(kind = %s.kind, x = s.cell.x, y = s.cell.y, "enemy spawn outside the grid; skipped");
                }
                inside
            })
            .map(WaypointEnemy::spawn)
            .collect();
    }

    fn update(&mut self) {
        for enemy in &mut self.enemies {
            enemy.advance(&self.grid, self.step_ticks);
        }
    }

    fn enemies(&self) -> Vec<EnemySnapshot> {
        self.enemies
            .iter()
            .enumerate()
            .map(|(index, e)| EnemySnapshot { index, pos: e.pos, pattern: e.pattern.clone() })
            .collect()
    }

    fn occupied_cells(&self) -> Vec<Cell> {
        self.enemies
            .iter()
            .map(|e| Cell::new(e.pos.x.ceil() as i32, e.pos.y.ceil() as i32))
            .collect()
    }

    fn handle(&mut self, index: usize) -> Option<&mut dyn Collidable> {
        self.enemies.get_mut(index).map(|e| e as &mut dyn Collidable)
    }

    fn draw(&self, sink: &mut dyn RenderSink) {
        let [tw, th] = self.tile_size;
        let radius = tw.min(th) / 2.0;
        for enemy in &self.enemies {
            sink.fill_circle([enemy.pos.x * tw, enemy.pos.y * th], radius, ENEMY_COLOR);
        }
    }

    fn clear(&mut self) {
        self.enemies.clear();
        self.grid.clear();
    }
}
