//! Configuration structs with defaults and RON persistence.

use std::path::Path;

use asteroid_terrain::{AsteroidGenerator, GenerationParams, MaterialRuleSet};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// File name of the persisted configuration inside the config directory.
pub const CONFIG_FILE: &str = "config.ron";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Asteroid generation settings.
    pub generation: GenerationConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// What to generate and how.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GenerationConfig {
    /// Side length of the square grid, in cells.
    pub grid_size: usize,
    /// Fixed seed; `None` picks a fresh seed per run.
    pub seed: Option<u64>,
    /// Seeds to try before giving up on finding a landing site.
    pub retries: u32,
    /// Shape, noise, depth and landing constants.
    pub params: GenerationParams,
    /// Custom rule table; `None` uses the stock rules.
    pub rules: Option<MaterialRuleSet>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            grid_size: 200,
            seed: None,
            retries: 1,
            params: GenerationParams::default(),
            rules: None,
        }
    }
}

impl GenerationConfig {
    /// Build a generator from these settings after validating them.
    pub fn generator(&self) -> Result<AsteroidGenerator, ConfigError> {
        self.params.validate(self.grid_size).map_err(ConfigError::Invalid)?;
        let generator = match &self.rules {
            Some(rules) => AsteroidGenerator::with_rules(self.params.clone(), rules.clone()),
            None => AsteroidGenerator::new(self.params.clone()),
        };
        Ok(generator)
    }
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Print an ASCII dump of the generated grid.
    pub preview: bool,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            preview: false,
        }
    }
}

// --- Load / Save ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let config = Self::read(&config_path)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    fn read(config_path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(config_path).map_err(ConfigError::ReadError)?;
        let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
        config
            .generation
            .params
            .validate(config.generation.grid_size)
            .map_err(ConfigError::Invalid)?;
        Ok(config)
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join(CONFIG_FILE);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(4)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }
}
