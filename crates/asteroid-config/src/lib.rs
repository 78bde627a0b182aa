//! Configuration for the asteroid generator.
//!
//! Settings persist to disk as a RON file, are validated on load, and can be
//! overridden from the command line via clap.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{CONFIG_FILE, Config, DebugConfig, GenerationConfig};
pub use error::ConfigError;
