//! Logger setup. The terminal belongs to the game, so records go to a file.

use std::fs::OpenOptions;

use env_logger::{Builder, Env, Target};

use crate::config::LoggingConfig;
use crate::error::LoggingError;

/// Install the global logger. `RUST_LOG` overrides the configured level.
/// Does nothing when logging is disabled or a logger is already installed.
pub fn init(config: &LoggingConfig) -> Result<(), LoggingError> {
    if !config.enabled {
        return Ok(());
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.file)
        .map_err(|e| LoggingError::Open {
            path: config.file.clone(),
            source: e,
        })?;

    let _ = Builder::from_env(Env::default().default_filter_or(config.level.as_str()))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init();
    Ok(())
}
