//! secretdoors - headless driver for secret door and trapdoor scenes
//!
//! Loads a config and a scene, replays the scene's clicks against an
//! in-memory world and optionally writes a JSONL event log.

mod config;
mod replay;
mod scene_script;

use anyhow::{Context, Result};
use clap::Parser;
use config::{SecretDoorsConfig, DEFAULT_CONFIG_PATH};
use scene_script::SceneScript;
use secretdoors_openable::InteractionDispatcher;
use secretdoors_testkit::JsonlSink;
use secretdoors_world::MemoryWorld;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Replay secret door interactions against an in-memory world",
    long_about = None
)]
struct Args {
    /// TOML config file (missing file means defaults)
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// JSON scene with starting blocks and timed interactions
    #[arg(long, required_unless_present = "write_config")]
    scene: Option<PathBuf>,

    /// Write the effective config to this path and exit
    #[arg(long)]
    write_config: Option<PathBuf>,

    /// Write one JSON line per replayed interaction
    #[arg(long)]
    event_log: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Initialize tracing with WARN level by default (can be overridden via RUST_LOG env var).
    // Logs go to stderr; stdout carries the replay summary.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    info!("Starting secretdoors v{}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();
    let config = SecretDoorsConfig::load_from_path(&args.config);
    let base_dir = args.config.parent().unwrap_or(Path::new("."));
    if let Some(path) = &args.write_config {
        config.save_to_path(path)?;
        info!("Wrote config to {}", path.display());
        return Ok(());
    }
    let catalog = config.load_catalog(base_dir)?;
    info!(blocks = catalog.len(), dispatch = ?config.dispatch, "configuration loaded");

    let Some(scene) = args.scene else {
        anyhow::bail!("--scene is required");
    };
    let mut script = SceneScript::from_path(&scene)?;
    let mut world = MemoryWorld::new(catalog.clone());
    script.populate(&mut world)?;
    let mut dispatcher = InteractionDispatcher::new(config.dispatch, catalog);

    let mut sink = args
        .event_log
        .as_deref()
        .map(JsonlSink::create)
        .transpose()?;

    let summary = replay::run(&mut script, &mut world, &mut dispatcher, sink.as_mut())
        .with_context(|| format!("Failed to replay scene {}", scene.display()))?;
    println!("{}", serde_json::to_string(&summary)?);
    Ok(())
}
