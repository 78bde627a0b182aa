//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Asteroid generator command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug)]
#[command(name = "asteroid", about = "Generate a procedural asteroid from a seed")]
pub struct CliArgs {
    /// Grid side length in cells.
    #[arg(long)]
    pub size: Option<usize>,

    /// Generation seed (random if neither this nor the config sets one).
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of consecutive seeds to try when no landing site is found.
    #[arg(long)]
    pub retries: Option<u32>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Print an ASCII dump of the grid.
    #[arg(long)]
    pub preview: bool,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(size) = args.size {
            self.generation.grid_size = size;
        }
        if let Some(seed) = args.seed {
            self.generation.seed = Some(seed);
        }
        if let Some(retries) = args.retries {
            self.generation.retries = retries;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
        if args.preview {
            self.debug.preview = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs::parse_from(["asteroid", "--size", "96", "--seed", "12", "--preview"]);
        config.apply_cli_overrides(&args);
        assert_eq!(config.generation.grid_size, 96);
        assert_eq!(config.generation.seed, Some(12));
        assert!(config.debug.preview);
        // Non-overridden fields retain defaults
        assert_eq!(config.generation.retries, 1);
        assert_eq!(config.debug.log_level, "info");
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        let args = CliArgs::parse_from(["asteroid"]);
        config.apply_cli_overrides(&args);
        assert_eq!(config, original);
    }

    #[test]
    fn test_config_seed_survives_missing_cli_seed() {
        let mut config = Config::default();
        config.generation.seed = Some(5);
        config.apply_cli_overrides(&CliArgs::parse_from(["asteroid", "--retries", "3"]));
        assert_eq!(config.generation.seed, Some(5));
        assert_eq!(config.generation.retries, 3);
    }
}
