//! # Bogey Roguelike Main Entry Point
//!
//! Parses the command line, sets up logging and the save repository, and
//! runs the scene manager once per macroquad frame.

use bogey::{
    window_conf, BogeyResult, FileSaveRepository, GameConfig, MacroquadDisplay, SceneManager,
};
use clap::Parser;
use macroquad::prelude::next_frame;
use std::path::PathBuf;

/// Command line arguments for the Bogey roguelike.
#[derive(Parser, Debug)]
#[command(name = "bogey")]
#[command(about = "A turn-based roguelike with procedural dungeons and save slots")]
#[command(version)]
struct Args {
    /// Random seed for dungeon generation
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON file overriding the default configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding save slots
    #[arg(long)]
    save_dir: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[macroquad::main(window_conf)]
async fn main() -> BogeyResult<()> {
    let args = Args::parse();

    initialize_logging(&args.log_level);
    log::info!("Starting Bogey v{}", bogey::VERSION);

    let config = load_config(&args)?;
    let saves = FileSaveRepository::new(&config.save_dir, config.max_saves)?;
    log::info!(
        "Seed {}, saves in {}",
        config.generation.seed,
        saves.base_dir().display()
    );

    let mut scenes = SceneManager::new(config, Box::new(saves));
    let mut display = MacroquadDisplay::new();

    while scenes.tick(&mut display)? {
        next_frame().await;
    }

    log::info!("Game loop ended");
    Ok(())
}

/// Initializes `env_logger` at the given level. `RUST_LOG` takes precedence.
fn initialize_logging(log_level: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_target(false)
        .init();
}

/// Builds the session configuration from defaults, the optional config
/// file and the command line overrides.
fn load_config(args: &Args) -> BogeyResult<GameConfig> {
    let mut config = match &args.config {
        Some(path) => GameConfig::from_json_file(path)?,
        None => GameConfig::default(),
    };

    match args.seed {
        Some(seed) => config.generation.seed = seed,
        None if args.config.is_none() => config.generation.seed = rand::random(),
        None => {}
    }
    if let Some(dir) = &args.save_dir {
        config.save_dir = dir.clone();
    }
    config.validate()?;
    Ok(config)
}
