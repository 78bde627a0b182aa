//! Structured logging for the asteroid generator.
//!
//! Installs a `tracing` subscriber with console output and, in debug builds,
//! a JSON log file. Records emitted through the `log` facade by the library
//! crates are bridged into the same subscriber.

use std::path::Path;

use asteroid_config::Config;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter applied when neither `RUST_LOG` nor the config sets a level.
///
/// Generator crates log at `info`; everything else is held to `warn`.
pub const DEFAULT_FILTER: &str =
    "warn,asteroid=info,asteroid_terrain=info,asteroid_config=info,asteroid_log=info";

/// File name of the JSON log written in debug builds.
pub const LOG_FILE: &str = "asteroid.log";

/// Resolve the filter directive from the config, falling back to [`DEFAULT_FILTER`].
pub fn filter_directive(config: Option<&Config>) -> String {
    config
        .map(|c| c.debug.log_level.trim())
        .filter(|level| !level.is_empty())
        .unwrap_or(DEFAULT_FILTER)
        .to_string()
}

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the config's `debug.log_level`. When
/// `debug_build` is set and `log_dir` can be created, a JSON file layer is
/// added alongside the console layer.
///
/// # Examples
///
/// ```no_run
/// use asteroid_config::Config;
/// use asteroid_log::init_logging;
///
/// let config = Config::default();
/// init_logging(None, false, Some(&config));
/// ```
pub fn init_logging(log_dir: Option<&Path>, debug_build: bool, config: Option<&Config>) {
    let filter_str = filter_directive(config);
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    if debug_build
        && let Some(log_dir) = log_dir
        && std::fs::create_dir_all(log_dir).is_ok()
        && let Ok(log_file) = std::fs::File::create(log_dir.join(LOG_FILE))
    {
        let file_layer = fmt::layer()
            .with_writer(log_file)
            .with_ansi(false)
            .with_target(true)
            .with_timer(fmt::time::uptime())
            .json();

        subscriber.with(file_layer).init();
        return;
    }

    subscriber.init();
}
