//! Headless level runner.
//!
//! Loads a level, optionally sends the hero somewhere, and ticks the level a
//! fixed number of times, logging what happens. Useful for checking level
//! files without a renderer attached.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use materials_grid::config::CoordinatorConfig;
use materials_grid::enemy::WaypointEnemies;
use materials_grid::level::LevelCoordinator;
use materials_grid::material::{MaterialKind, MaterialLibrary};
use materials_grid::render::DrawQueue;
use materials_grid::script::JsonLevelScript;
use materials_grid::services::Services;

#[derive(Parser)]
#[command(name = "materials-grid")]
#[command(about = "Run a grid level headless", long_about = None)]
#[command(version)]
struct Cli {
    /// Directory holding `<level>.json` definitions
    #[arg(long, default_value = "assets/levels")]
    levels: PathBuf,

    /// Level to load
    #[arg(default_value = "arena")]
    level: String,

    /// Pixel position to send the hero to
    #[arg(long, num_args = 2, value_names = ["PX", "PY"])]
    goto: Option<Vec<i32>>,

    /// Material the hero carries: red, blue or none
    #[arg(long, default_value = "none")]
    material: String,

    /// Number of ticks to simulate
    #[arg(long, default_value_t = 20)]
    ticks: u32,

    /// Enemy movement speed, in ticks per cell
    #[arg(long, default_value_t = 4)]
    enemy_step: u32,

    /// Optional coordinator config JSON
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            CoordinatorConfig::from_json(&text).context("parsing coordinator config")?
        }
        None => CoordinatorConfig::default(),
    };
    let material = match cli.material.to_ascii_lowercase().as_str() {
        "red" => MaterialKind::Red,
        "blue" => MaterialKind::Blue,
        "none" | "default" => MaterialKind::Default,
        other => anyhow::bail!("unknown material '{other}'"),
    };

    let materials = MaterialLibrary::new();
    let mut script = JsonLevelScript::new(cli.levels.clone());
    let enemies = WaypointEnemies::new(cli.enemy_step);
    let mut level = LevelCoordinator::with_config(config, enemies);

    {
        let mut services = Services::new(&mut script, &materials);
        level
            .load_level(&cli.level, &mut services)
            .with_context(|| format!("loading level '{}'", cli.level))?;
        level.set_material(material, &services)?;
    }

    if let Some(target) = &cli.goto {
        let steps = level.move_to_point(target[0], target[1])?;
        info!(steps, "path planned");
    }

    let mut frame = DrawQueue::new();
    for tick in 0..cli.ticks {
        let mut services = Services::new(&mut script, &materials);
        level.update(&mut services);
        level.draw(&mut frame);

        let commands = frame.drain().len();
        if let Some(hero) = level.hero() {
            info!(
                tick,
                x = hero.cell().x,
                y = hero.cell().y,
                interactions = level.interactions().len(),
                commands,
                "tick"
            );
        }
    }

    for name in script.fired_triggers() {
        info!(trigger = %name, "fired during run");
    }
    Ok(())
}
