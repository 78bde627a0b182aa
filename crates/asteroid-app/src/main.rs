//! Command-line front end: load config, generate an asteroid, report it.

mod preview;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use asteroid_config::{CliArgs, Config, ConfigError};
use asteroid_terrain::{GridStats, TerrainError};
use clap::Parser;
use tracing::{error, info, warn};

const APP_NAME: &str = "asteroid";

fn config_dir(args: &CliArgs) -> PathBuf {
    args.config.clone().unwrap_or_else(|| {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_NAME)
    })
}

/// Load the config file (creating it when missing) and layer CLI flags on top.
///
/// A file that exists but cannot be read, parsed or validated is an error.
fn load_config(config_dir: &Path, args: &CliArgs) -> Result<Config, ConfigError> {
    let mut config = Config::load_or_create(config_dir)?;
    config.apply_cli_overrides(args);
    Ok(config)
}

fn main() -> ExitCode {
    let args = CliArgs::parse();
    let config_dir = config_dir(&args);

    let config = match load_config(&config_dir, &args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config from {}: {e}", config_dir.display());
            return ExitCode::FAILURE;
        }
    };

    let log_dir = config_dir.join("logs");
    asteroid_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("generation failed: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let settings = &config.generation;
    let generator = settings.generator()?;
    let seed = settings.seed.unwrap_or_else(rand::random);

    let span = tracing::info_span!("generate", seed, grid_size = settings.grid_size);
    let _guard = span.enter();

    let asteroid = match generator.generate_with_retries(settings.grid_size, seed, settings.retries) {
        Ok(asteroid) => asteroid,
        Err(e @ TerrainError::NoLandingSite { .. }) => {
            warn!("gave up after {} seed(s); pass --retries to try more", settings.retries);
            return Err(e.into());
        }
        Err(e) => return Err(e.into()),
    };

    let stats = GridStats::collect(&asteroid.grid);
    info!(
        seed = asteroid.seed,
        solid = stats.solid,
        open_floor = stats.open_floor,
        empty = stats.empty,
        "asteroid generated"
    );
    for (material, count) in &stats.walls {
        info!("  {material}: {count}");
    }
    for (layer, count) in &stats.layers {
        info!("  layer {layer}: {count}");
    }
    info!(
        "starting position: ({:.2}, {:.2})",
        asteroid.start.x, asteroid.start.y
    );

    if config.debug.preview {
        print!("{}", preview::render(&asteroid.grid, asteroid.start.cell()));
    }
    Ok(())
}
