mod common;

use std::path::PathBuf;

use glam::Vec2;
use tempfile::TempDir;

use common::{TILE, block, tmx, write_map};
use materials_grid::config::CoordinatorConfig;
use materials_grid::error::{AssetParseError, CommandError, LevelError, ScriptError};
use materials_grid::geometry::{Cell, Direction, GridSize};
use materials_grid::grid::{CollisionGrid, DYNAMIC_BODY, STATIC_BODY};
use materials_grid::hero::HeroDefinition;
use materials_grid::level::{InteractionRecord, LevelCoordinator, LevelState};
use materials_grid::material::{Collidable, MaterialKind, MaterialLibrary};
use materials_grid::render::{Color, DrawCommand, DrawQueue, RenderSink};
use materials_grid::services::{
    BeatTiming, EnemyDirector, EnemySnapshot, EnemySpawn, LevelParams, LevelScript, Services,
};

// ── Test collaborators ────────────────────────────────────────────────────────

struct TestScript {
    params: LevelParams,
    loaded: bool,
    positions: Vec<Cell>,
    trigger_calls: u32,
}

impl LevelScript for TestScript {
    fn load_level(&mut self, level: &str) -> Result<LevelParams, ScriptError> {
        if level != "test" {
            return Err(ScriptError::UnknownLevel(level.to_string()));
        }
        self.loaded = true;
        Ok(self.params.clone())
    }

    fn hero_definition(&self) -> HeroDefinition {
        HeroDefinition { id: 7, behavior: PathBuf::from("hero.json") }
    }

    fn update_triggers(&mut self) {
        self.trigger_calls += 1;
    }

    fn set_hero_position(&mut self, cell: Cell) {
        self.positions.push(cell);
    }

    fn clear(&mut self) {
        self.loaded = false;
        self.positions.clear();
    }
}

struct Pawn {
    pos: Vec2,
    pattern: Vec<(i32, i32)>,
    hits: Vec<MaterialKind>,
}

impl Collidable for Pawn {
    fn on_material(&mut self, kind: MaterialKind) {
        self.hits.push(kind);
    }
}

/// Enemies that stand wherever the test puts them.
#[derive(Default)]
struct TestEnemies {
    pawns: Vec<Pawn>,
    bounds: Option<GridSize>,
    tile_size: Option<[i32; 2]>,
    updates: u32,
}

impl TestEnemies {
    fn place(&mut self, index: usize, x: f32, y: f32) {
        self.pawns[index].pos = Vec2::new(x, y);
    }
}

impl EnemyDirector for TestEnemies {
    fn init(&mut self, bounds: GridSize, tile_size: [i32; 2], _grid: &CollisionGrid, spawns: &[EnemySpawn]) {
        self.bounds = Some(bounds);
        self.tile_size = Some(tile_size);
        self.pawns = spawns
            .iter()
            .map(|s| Pawn {
                pos: Vec2::new(s.cell.x as f32, s.cell.y as f32),
                pattern: s.pattern.clone(),
                hits: Vec::new(),
            })
            .collect();
    }

    fn update(&mut self) {
        self.updates += 1;
    }

    fn enemies(&self) -> Vec<EnemySnapshot> {
        self.pawns
            .iter()
            .enumerate()
            .map(|(index, p)| EnemySnapshot { index, pos: p.pos, pattern: p.pattern.clone() })
            .collect()
    }

    fn occupied_cells(&self) -> Vec<Cell> {
        self.enemies().iter().map(EnemySnapshot::occupied_cell).collect()
    }

    fn handle(&mut self, index: usize) -> Option<&mut dyn Collidable> {
        self.pawns.get_mut(index).map(|p| p as &mut dyn Collidable)
    }

    fn draw(&self, sink: &mut dyn RenderSink) {
        for p in &self.pawns {
            sink.fill_circle([p.pos.x * TILE as f32, p.pos.y * TILE as f32], 4.0, Color::WHITE);
        }
    }

    fn clear(&mut self) {
        self.pawns.clear();
        self.bounds = None;
        self.tile_size = None;
    }
}

// ── Fixture ───────────────────────────────────────────────────────────────────

struct World {
    _dir: TempDir,
    map_path: PathBuf,
    script: TestScript,
    materials: MaterialLibrary,
    level: LevelCoordinator<TestEnemies>,
}

impl World {
    fn new(
        columns: i32,
        rows: i32,
        obstacles: &[(i32, i32, i32, i32)],
        spawn: Cell,
        enemies: Vec<EnemySpawn>,
    ) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let map_path = write_map(dir.path(), "test.tmx", &tmx(columns, rows, obstacles));
        let params = LevelParams {
            size: GridSize::new(columns, rows),
            hero_spawn: spawn,
            beat: BeatTiming { pause: 0.5, buffer: 0.1 },
            map_path: map_path.clone(),
            enemies,
        };
        Self {
            _dir: dir,
            map_path,
            script: TestScript { params, loaded: false, positions: Vec::new(), trigger_calls: 0 },
            materials: MaterialLibrary::new(),
            level: LevelCoordinator::new(TestEnemies::default()),
        }
    }

    /// A world that has already loaded its level.
    fn loaded(
        columns: i32,
        rows: i32,
        obstacles: &[(i32, i32, i32, i32)],
        spawn: Cell,
        enemies: Vec<EnemySpawn>,
    ) -> Self {
        let mut world = Self::new(columns, rows, obstacles, spawn, enemies);
        world.load().unwrap();
        world
    }

    fn load(&mut self) -> Result<(), LevelError> {
        self.load_named("test")
    }

    fn load_named(&mut self, name: &str) -> Result<(), LevelError> {
        let mut services = Services::new(&mut self.script, &self.materials);
        self.level.load_level(name, &mut services)
    }

    fn clear(&mut self) {
        let mut services = Services::new(&mut self.script, &self.materials);
        self.level.clear(&mut services);
    }

    fn tick(&mut self) {
        let mut services = Services::new(&mut self.script, &self.materials);
        self.level.update(&mut services);
    }

    fn ticks(&mut self, n: usize) {
        for _ in 0..n {
            self.tick();
        }
    }

    fn set_material(&mut self, kind: MaterialKind) -> Result<(), CommandError> {
        let services = Services::new(&mut self.script, &self.materials);
        self.level.set_material(kind, &services)
    }

    fn step(&mut self, dir: Direction) -> Result<Cell, CommandError> {
        let mut services = Services::new(&mut self.script, &self.materials);
        self.level.step_hero(dir, &mut services)
    }

    /// Send the hero to the middle of `cell`.
    fn goto(&mut self, cell: Cell) -> Result<usize, CommandError> {
        self.level.move_to_point(cell.x * TILE + TILE / 2, cell.y * TILE + TILE / 2)
    }

    fn hero(&self) -> Cell {
        self.level.hero().unwrap().cell()
    }

    fn material_at(&self, cell: Cell) -> Option<MaterialKind> {
        self.level.items().unwrap().get(cell).unwrap().material().map(|m| m.kind())
    }

    fn frame(&self) -> Vec<DrawCommand> {
        let mut queue = DrawQueue::new();
        self.level.draw(&mut queue);
        queue.drain()
    }
}

fn pawn(x: i32, y: i32, pattern: Vec<(i32, i32)>) -> EnemySpawn {
    EnemySpawn { kind: "pawn".into(), cell: Cell::new(x, y), route: Vec::new(), pattern }
}

// ── Load / clear ──────────────────────────────────────────────────────────────

#[test]
fn load_builds_a_consistent_level() {
    let mut w = World::new(6, 4, &[block(2, 1)], Cell::new(1, 1), vec![pawn(4, 2, vec![])]);
    assert_eq!(w.level.state(), LevelState::Unloaded);

    w.load().unwrap();
    assert_eq!(w.level.state(), LevelState::Loaded);

    let size = GridSize::new(6, 4);
    let collision = w.level.collision().unwrap();
    assert_eq!(collision.size(), size);
    assert_eq!(w.level.items().unwrap().size(), size);
    assert_eq!(collision.marker(Cell::new(2, 1)), Some(STATIC_BODY));
    assert_eq!(collision.marker(Cell::new(4, 2)), Some(DYNAMIC_BODY));

    let hero = w.level.hero().unwrap();
    assert_eq!(hero.cell(), Cell::new(1, 1));
    assert_eq!(hero.definition().id, 7);
    assert_eq!(hero.material().kind(), MaterialKind::Default);

    assert!(w.level.marker().unwrap().is_hidden());
    assert!(w.level.path().unwrap().is_empty());
    assert_eq!(w.level.tile_layers().len(), 1);
    assert_eq!(w.level.beat(), Some(BeatTiming { pause: 0.5, buffer: 0.1 }));
    assert_eq!(w.level.enemies().bounds, Some(size));
    assert_eq!(w.level.enemies().tile_size, Some([TILE, TILE]));
    assert!(w.script.loaded);
}

#[test]
fn clear_returns_to_unloaded() {
    let mut w = World::loaded(4, 4, &[], Cell::new(0, 0), vec![pawn(3, 3, vec![(1, 0)])]);
    w.tick();
    w.clear();

    assert_eq!(w.level.state(), LevelState::Unloaded);
    assert!(w.level.hero().is_none());
    assert!(w.level.collision().is_none());
    assert!(w.level.tile_layers().is_empty());
    assert!(w.level.interactions().is_empty());
    assert!(w.level.enemies().pawns.is_empty());
    assert!(!w.script.loaded);
}

#[test]
fn unloaded_coordinator_ignores_ticks_and_rejects_commands() {
    let mut w = World::new(4, 4, &[], Cell::new(0, 0), vec![]);
    w.tick();
    assert_eq!(w.script.trigger_calls, 0);
    assert_eq!(w.level.enemies().updates, 0);
    assert!(w.frame().is_empty());

    assert_eq!(w.level.move_to_point(0, 0), Err(CommandError::NotLoaded));
    assert_eq!(w.step(Direction::East), Err(CommandError::NotLoaded));
    assert_eq!(w.set_material(MaterialKind::Red), Err(CommandError::NotLoaded));
    assert_eq!(w.level.pixel_to_cell(0, 0), None);
}

#[test]
fn reloading_rebuilds_the_same_level() {
    let mut w = World::loaded(6, 5, &[block(1, 1), block(4, 3)], Cell::new(0, 0), vec![]);
    let collision = w.level.collision().unwrap().clone();
    let layers = w.level.tile_layers().to_vec();

    w.set_material(MaterialKind::Red).unwrap();
    w.goto(Cell::new(3, 0)).unwrap();
    w.ticks(2);

    w.clear();
    w.load().unwrap();
    assert_eq!(w.level.collision().unwrap(), &collision);
    assert_eq!(w.level.tile_layers(), layers.as_slice());
    assert_eq!(w.hero(), Cell::new(0, 0));
    assert_eq!(w.level.hero().unwrap().material().kind(), MaterialKind::Default);
    assert!(w.level.items().unwrap().iter().all(|item| item.material().is_none()));

    // Loading over a loaded level behaves the same.
    w.load().unwrap();
    assert_eq!(w.level.collision().unwrap(), &collision);
}

#[test]
fn spawn_outside_the_map_fails_the_load() {
    let mut w = World::new(4, 4, &[], Cell::new(4, 0), vec![pawn(1, 1, vec![])]);
    match w.load() {
        Err(LevelError::SpawnOutOfBounds { spawn, columns, rows }) => {
            assert_eq!(spawn, Cell::new(4, 0));
            assert_eq!((columns, rows), (4, 4));
        }
        other => panic!("expected SpawnOutOfBounds, got {other:?}"),
    }
    assert_eq!(w.level.state(), LevelState::Unloaded);
    assert!(w.level.enemies().pawns.is_empty());
    assert!(!w.script.loaded);
}

#[test]
fn broken_map_unloads_the_previous_level() {
    let mut w = World::loaded(4, 4, &[], Cell::new(0, 0), vec![]);
    std::fs::write(&w.map_path, "<map width=\"4\"").unwrap();

    assert!(matches!(w.load(), Err(LevelError::Asset(_))));
    assert_eq!(w.level.state(), LevelState::Unloaded);
    assert!(!w.script.loaded);
}

#[test]
fn missing_map_file_is_an_asset_error() {
    let mut w = World::new(4, 4, &[], Cell::new(0, 0), vec![]);
    std::fs::remove_file(&w.map_path).unwrap();
    assert!(matches!(w.load(), Err(LevelError::Asset(AssetParseError::Io { .. }))));
}

#[test]
fn unknown_level_is_a_script_error() {
    let mut w = World::new(4, 4, &[], Cell::new(0, 0), vec![]);
    assert!(matches!(
        w.load_named("elsewhere"),
        Err(LevelError::Script(ScriptError::UnknownLevel(name))) if name == "elsewhere"
    ));
    assert_eq!(w.level.state(), LevelState::Unloaded);
}

#[test]
fn map_dimensions_win_over_the_script() {
    let mut w = World::new(4, 3, &[], Cell::new(0, 0), vec![]);
    w.script.params.size = GridSize::new(40, 30);
    w.load().unwrap();
    assert_eq!(w.level.collision().unwrap().size(), GridSize::new(4, 3));
    assert_eq!(w.level.items().unwrap().size(), GridSize::new(4, 3));
}

// ── Navigation ────────────────────────────────────────────────────────────────

#[test]
fn hero_walks_around_an_obstacle() {
    let mut w = World::loaded(5, 5, &[block(2, 2)], Cell::new(0, 2), vec![]);

    assert_eq!(w.goto(Cell::new(4, 2)), Ok(6));
    let marker = *w.level.marker().unwrap();
    assert!(!marker.is_hidden());
    assert_eq!(marker.pos(), [128.0, 64.0]);

    w.ticks(5);
    assert!(!w.level.marker().unwrap().is_hidden());
    w.tick();

    assert_eq!(w.hero(), Cell::new(4, 2));
    assert!(w.level.marker().unwrap().is_hidden());
    assert!(w.level.path().unwrap().is_empty());
    assert_eq!(w.script.positions.len(), 6);
    assert_eq!(w.script.positions.last(), Some(&Cell::new(4, 2)));
    assert!(!w.script.positions.contains(&Cell::new(2, 2)));
}

#[test]
fn hero_follows_the_planned_route_exactly() {
    let mut w = World::loaded(6, 6, &[block(2, 2), block(3, 2), block(1, 4)], Cell::new(0, 0), vec![]);
    let steps = w.goto(Cell::new(4, 5)).unwrap();
    let planned: Vec<Cell> = w.level.path().unwrap().iter().copied().collect();
    assert_eq!(planned.len(), steps);

    let mut walked = Vec::new();
    for _ in 0..steps {
        w.tick();
        walked.push(w.hero());
    }
    assert_eq!(walked, planned);
    assert_eq!(w.hero(), Cell::new(4, 5));

    w.tick();
    assert_eq!(w.hero(), Cell::new(4, 5));
}

#[test]
fn off_grid_target_leaves_path_and_marker_alone() {
    let mut w = World::loaded(5, 5, &[], Cell::new(0, 0), vec![]);
    w.goto(Cell::new(3, 3)).unwrap();
    let path = w.level.path().unwrap().clone();
    let marker = *w.level.marker().unwrap();

    // One pixel column past the right edge.
    assert_eq!(w.level.move_to_point(5 * TILE, 0), Err(CommandError::OutOfBounds(Cell::new(5, 0))));
    assert_eq!(w.level.move_to_point(0, 5 * TILE + 3), Err(CommandError::OutOfBounds(Cell::new(0, 5))));
    // Just left of and just above the map.
    assert_eq!(w.level.move_to_point(-5, 10), Err(CommandError::OutOfBounds(Cell::new(-1, 0))));
    assert_eq!(w.level.move_to_point(10, -1), Err(CommandError::OutOfBounds(Cell::new(0, -1))));

    assert_eq!(w.level.path().unwrap(), &path);
    assert_eq!(w.level.marker().unwrap(), &marker);
}

#[test]
fn unreachable_goal_shows_then_hides_the_marker() {
    let walls = [block(2, 0), block(2, 1), block(2, 2)];
    let mut w = World::loaded(5, 3, &walls, Cell::new(0, 1), vec![]);

    assert_eq!(w.goto(Cell::new(4, 1)), Ok(0));
    assert!(!w.level.marker().unwrap().is_hidden());

    w.tick();
    assert_eq!(w.hero(), Cell::new(0, 1));
    assert!(w.level.marker().unwrap().is_hidden());
    assert!(w.script.positions.is_empty());
}

#[test]
fn blocked_goal_yields_empty_path() {
    let mut w = World::loaded(4, 4, &[block(3, 3)], Cell::new(0, 0), vec![]);
    assert_eq!(w.goto(Cell::new(3, 3)), Ok(0));
}

#[test]
fn new_destination_replaces_the_old_path() {
    let mut w = World::loaded(5, 5, &[], Cell::new(0, 0), vec![]);
    w.goto(Cell::new(4, 0)).unwrap();
    w.goto(Cell::new(0, 4)).unwrap();
    assert_eq!(w.level.path().unwrap().goal(), Some(Cell::new(0, 4)));

    w.tick();
    assert_eq!(w.hero(), Cell::new(0, 1));
}

#[test]
fn enemies_block_paths() {
    let mut w = World::loaded(5, 3, &[], Cell::new(0, 1), vec![pawn(2, 1, vec![])]);
    assert_eq!(w.goto(Cell::new(4, 1)), Ok(6));
    assert!(!w.level.path().unwrap().iter().any(|&c| c == Cell::new(2, 1)));
}

#[test]
fn step_hero_checks_the_target_cell() {
    let mut w = World::loaded(3, 3, &[block(1, 0)], Cell::new(0, 0), vec![]);

    assert_eq!(w.step(Direction::East), Err(CommandError::Blocked(Cell::new(1, 0))));
    assert_eq!(w.step(Direction::North), Err(CommandError::OutOfBounds(Cell::new(0, -1))));
    assert_eq!(w.hero(), Cell::new(0, 0));

    w.goto(Cell::new(2, 2)).unwrap();
    assert_eq!(w.step(Direction::South), Ok(Cell::new(0, 1)));
    assert_eq!(w.hero(), Cell::new(0, 1));
    assert!(w.level.path().unwrap().is_empty());
    assert!(w.level.marker().unwrap().is_hidden());
    assert_eq!(w.script.positions, vec![Cell::new(0, 1)]);
}

#[test]
fn pixel_lookup_respects_the_grid() {
    let w = World::loaded(4, 3, &[], Cell::new(0, 0), vec![]);
    assert_eq!(w.level.pixel_to_cell(40, 70), Some(Cell::new(1, 2)));
    assert_eq!(w.level.pixel_to_cell(4 * TILE, 0), None);
    assert_eq!(w.level.pixel_to_cell(-1, 0), None);
}

// ── Materials ─────────────────────────────────────────────────────────────────

#[test]
fn trail_paints_the_cell_the_hero_leaves() {
    let mut w = World::loaded(5, 5, &[], Cell::new(3, 3), vec![]);
    w.set_material(MaterialKind::Blue).unwrap();
    w.goto(Cell::new(3, 1)).unwrap();

    w.tick();
    assert_eq!(w.hero(), Cell::new(3, 2));
    assert_eq!(w.material_at(Cell::new(3, 3)), Some(MaterialKind::Blue));
    assert_eq!(w.material_at(Cell::new(3, 2)), None);
    let item = w.level.items().unwrap().get(Cell::new(3, 3)).unwrap();
    assert_eq!(item.overlay().alpha8(), 100);

    w.set_material(MaterialKind::Red).unwrap();
    w.tick();
    assert_eq!(w.material_at(Cell::new(3, 2)), Some(MaterialKind::Red));
    assert_eq!(w.material_at(Cell::new(3, 3)), Some(MaterialKind::Blue));
}

#[test]
fn default_trail_is_transparent() {
    let mut w = World::loaded(4, 1, &[], Cell::new(0, 0), vec![]);
    w.goto(Cell::new(2, 0)).unwrap();
    w.tick();

    let item = w.level.items().unwrap().get(Cell::new(0, 0)).unwrap();
    assert_eq!(item.material().map(|m| m.kind()), Some(MaterialKind::Default));
    assert!(!item.has_material());
    assert_eq!(item.overlay().alpha8(), 0);
}

#[test]
fn missing_library_entry_gives_the_default_material() {
    let mut w = World::loaded(3, 3, &[], Cell::new(0, 0), vec![]);
    w.materials = MaterialLibrary::with_kinds(&[MaterialKind::Red]);
    w.set_material(MaterialKind::Blue).unwrap();
    assert_eq!(w.level.hero().unwrap().material().kind(), MaterialKind::Default);
}

// ── Enemies ───────────────────────────────────────────────────────────────────

#[test]
fn interactions_track_enemy_cells_and_patterns() {
    let mut w = World::loaded(5, 5, &[], Cell::new(0, 4), vec![pawn(1, 1, vec![(1, 0), (0, -1)])]);
    let red = w.level.config().highlight_color;

    w.tick();
    assert_eq!(
        w.level.interactions(),
        &[
            InteractionRecord { row: 1, column: 1, tint: None },
            InteractionRecord { row: 1, column: 2, tint: Some(red) },
            InteractionRecord { row: 0, column: 1, tint: Some(red) },
        ]
    );

    // Fractional positions round up.
    w.level.enemies_mut().place(0, 1.2, 0.6);
    w.tick();
    assert_eq!(w.level.interactions().len(), 3);
    assert_eq!(w.level.interactions()[0].cell(), Cell::new(2, 1));
    assert_eq!(w.level.collision().unwrap().marker(Cell::new(2, 1)), Some(DYNAMIC_BODY));
    assert_eq!(w.level.collision().unwrap().marker(Cell::new(1, 1)), Some(-1));

    w.level.enemies_mut().place(0, -3.0, 0.0);
    w.tick();
    assert!(w.level.interactions().is_empty());
}

#[test]
fn enemies_on_materials_trigger_collision_hooks() {
    let mut w = World::loaded(5, 5, &[], Cell::new(2, 1), vec![pawn(4, 4, vec![])]);
    w.set_material(MaterialKind::Red).unwrap();
    w.goto(Cell::new(2, 4)).unwrap();

    w.tick();
    assert_eq!(w.material_at(Cell::new(2, 1)), Some(MaterialKind::Red));
    assert!(w.level.enemies().pawns[0].hits.is_empty());

    w.level.enemies_mut().place(0, 1.5, 0.2);
    w.tick();
    assert_eq!(w.level.enemies().pawns[0].hits, vec![MaterialKind::Red]);

    // Fires again every tick the enemy stays.
    w.tick();
    assert_eq!(w.level.enemies().pawns[0].hits.len(), 2);
}

#[test]
fn default_material_cells_do_not_fire_hooks() {
    let mut w = World::loaded(5, 5, &[], Cell::new(0, 0), vec![pawn(4, 4, vec![])]);
    w.goto(Cell::new(0, 2)).unwrap();
    w.tick();
    assert_eq!(w.material_at(Cell::new(0, 0)), Some(MaterialKind::Default));

    w.level.enemies_mut().place(0, 0.0, 0.0);
    w.tick();
    assert!(w.level.enemies().pawns[0].hits.is_empty());
}

// ── Tick bookkeeping ──────────────────────────────────────────────────────────

#[test]
fn every_tick_updates_enemies_and_triggers() {
    let mut w = World::loaded(3, 3, &[], Cell::new(0, 0), vec![]);
    w.ticks(3);
    assert_eq!(w.script.trigger_calls, 3);
    assert_eq!(w.level.enemies().updates, 3);
    assert_eq!(w.level.hero().unwrap().frame(), 0);
    w.tick();
    assert_eq!(w.level.hero().unwrap().frame(), 1);
}

// ── Drawing ───────────────────────────────────────────────────────────────────

#[test]
fn draw_order_is_grid_highlights_marker_hero_enemies() {
    let mut w = World::new(5, 5, &[], Cell::new(0, 0), vec![pawn(3, 3, vec![(1, 0)])]);
    let config = CoordinatorConfig { draw_highlights: true, ..CoordinatorConfig::default() };
    w.level = LevelCoordinator::with_config(config, TestEnemies::default());
    w.load().unwrap();
    w.goto(Cell::new(0, 4)).unwrap();
    w.tick();

    let frame = w.frame();
    // 25 tiles, plus the transparent trail overlay on (0, 0).
    assert_eq!(frame.len(), 26 + 4);
    assert_eq!(frame.iter().take(26).filter(|c| matches!(c, DrawCommand::Tile { .. })).count(), 25);

    let tail = &frame[26..];
    let highlight = w.level.config().highlight_color;
    assert_eq!(tail[0], DrawCommand::Rect { pos: [128.0, 96.0], size: [32.0, 32.0], color: highlight });
    assert_eq!(
        tail[1],
        DrawCommand::Circle { pos: [0.0, 128.0], radius: 12.0, color: w.level.config().marker_color }
    );
    assert!(matches!(tail[2], DrawCommand::Rect { pos: [0.0, 32.0], .. }));
    assert_eq!(tail[3], DrawCommand::Circle { pos: [96.0, 96.0], radius: 4.0, color: Color::WHITE });
}

#[test]
fn highlights_are_recorded_but_not_drawn_by_default() {
    let mut w = World::loaded(3, 3, &[], Cell::new(0, 0), vec![pawn(1, 1, vec![(1, 0)])]);
    w.tick();
    assert_eq!(w.level.interactions().len(), 2);

    let frame = w.frame();
    // 9 tiles, hidden marker, hero, enemy.
    assert_eq!(frame.len(), 11);
    assert!(matches!(frame[9], DrawCommand::Rect { pos: [0.0, 0.0], .. }));
}
