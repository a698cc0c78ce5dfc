//! Level definitions stored as JSON files.
//!
//! [`JsonLevelScript`] is a data-only stand-in for a level script host: level
//! `name` lives at `<root>/<name>.json`, and every path inside it is relative
//! to that file.
//!
//! ```json
//! {
//!   "columns": 10, "rows": 8,
//!   "map": "maps/arena.tmx",
//!   "hero": { "id": 1, "spawn": [1, 1], "behavior": "heroes/warrior.json" },
//!   "beat": { "pause": 0.5, "buffer": 0.1 },
//!   "enemies": [ { "kind": "slime", "spawn": [5, 5], "route": [[8, 5]], "pattern": [[1, 0]] } ],
//!   "triggers": [ { "name": "exit", "cell": [9, 7] } ]
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info};

use crate::error::ScriptError;
use crate::geometry::{Cell, GridSize};
use crate::hero::HeroDefinition;
use crate::services::{BeatTiming, EnemySpawn, LevelParams, LevelScript};

// ── Trigger ──────────────────────────────────────────────────────────────────

/// Fires once, the first tick the hero stands on `cell`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Trigger {
    pub name: String,
    pub cell: Cell,
    pub fired: bool,
}

struct ActiveLevel {
    hero: HeroDefinition,
    hero_cell: Cell,
    triggers: Vec<Trigger>,
    fired: Vec<String>,
}

// ── JsonLevelScript ──────────────────────────────────────────────────────────

pub struct JsonLevelScript {
    root: PathBuf,
    active: Option<ActiveLevel>,
}

impl JsonLevelScript {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into(), active: None }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Hero coordinates as last reported by the level.
    pub fn hero_position(&self) -> Option<Cell> {
        self.active.as_ref().map(|a| a.hero_cell)
    }

    /// Names of triggers that have fired, in firing order.
    pub fn fired_triggers(&self) -> &[String] {
        match &self.active {
            Some(active) => &active.fired,
            None => &[],
        }
    }

    pub fn triggers(&self) -> &[Trigger] {
        match &self.active {
            Some(active) => &active.triggers,
            None => &[],
        }
    }
}

impl LevelScript for JsonLevelScript {
    fn load_level(&mut self, level: &str) -> Result<LevelParams, ScriptError> {
        let path = self.root.join(format!("{level}.json"));
        if !path.is_file() {
            return Err(ScriptError::UnknownLevel(level.to_string()));
        }
        let text = std::fs::read_to_string(&path).map_err(|source| ScriptError::Io {
            path: path.clone(),
            source,
        })?;
        let raw: RawLevel = serde_json::from_str(&text).map_err(|source| ScriptError::Json {
            path: path.clone(),
            source,
        })?;

        let dir = path.parent().unwrap_or_else(|| Path::new(""));
        let hero_cell = cell(raw.hero.spawn);

        let params = LevelParams {
            size: GridSize::new(raw.columns, raw.rows),
            hero_spawn: hero_cell,
            beat: BeatTiming { pause: raw.beat.pause, buffer: raw.beat.buffer },
            map_path: dir.join(&raw.map),
            enemies: raw
                .enemies
                .into_iter()
                .map(|e| EnemySpawn {
                    kind: e.kind,
                    cell: cell(e.spawn),
                    route: e.route.into_iter().map(cell).collect(),
                    pattern: e.pattern.into_iter().map(|[dx, dy]| (dx, dy)).collect(),
                })
                .collect(),
        };

        self.active = Some(ActiveLevel {
            hero: HeroDefinition { id: raw.hero.id, behavior: dir.join(&raw.hero.behavior) },
            hero_cell,
            triggers: raw
                .triggers
                .into_iter()
                .map(|t| Trigger { name: t.name, cell: cell(t.cell), fired: false })
                .collect(),
            fired: Vec::new(),
        });

        debug!(level, path = %path.display(), "level definition loaded");
        Ok(params)
    }

    fn hero_definition(&self) -> HeroDefinition {
        match &self.active {
            Some(active) => active.hero.clone(),
            None => HeroDefinition { id: 0, behavior: PathBuf::new() },
        }
    }

    fn update_triggers(&mut self) {
        let Some(active) = self.active.as_mut() else {
            return;
        };
        for trigger in active.triggers.iter_mut().filter(|t| !t.fired) {
            if trigger.cell == active.hero_cell {
                trigger.fired = true;
                info!(trigger = %trigger.name, "trigger fired");
                active.fired.push(trigger.name.clone());
            }
        }
    }

    fn set_hero_position(&mut self, cell: Cell) {
        if let Some(active) = self.active.as_mut() {
            active.hero_cell = cell;
        }
    }

    fn clear(&mut self) {
        self.active = None;
    }
}

fn cell([x, y]: [i32; 2]) -> Cell {
    Cell::new(x, y)
}

// ── Raw (JSON-facing) types ───────────────────────────────────────────────────

#[derive(Deserialize)]
struct RawLevel {
    columns: i32,
    rows: i32,
    map: PathBuf,
    hero: RawHero,
    #[serde(default)]
    beat: RawBeat,
    #[serde(default)]
    enemies: Vec<RawEnemy>,
    #[serde(default)]
    triggers: Vec<RawTrigger>,
}

#[derive(Deserialize)]
struct RawHero {
    #[serde(default = "default_hero_id")]
    id: u32,
    spawn: [i32; 2],
    #[serde(default)]
    behavior: PathBuf,
}

fn default_hero_id() -> u32 {
    1
}

#[derive(Deserialize, Default)]
struct RawBeat {
    pause: f64,
    buffer: f64,
}

#[derive(Deserialize)]
struct RawEnemy {
    kind: String,
    spawn: [i32; 2],
    #[serde(default)]
    route: Vec<[i32; 2]>,
    #[serde(default)]
    pattern: Vec<[i32; 2]>,
}

#[derive(Deserialize)]
struct RawTrigger {
    name: String,
    cell: [i32; 2],
}
