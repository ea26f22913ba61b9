use std::path::PathBuf;

/// Errors raised while reading or writing persisted stats.
///
/// Stores log these and fall back to defaults; they never reach the game.
#[derive(Debug, thiserror::Error)]
pub enum StatsError {
    #[error("no storage available for stats")]
    Unavailable,

    #[error("failed to read stats from {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write stats to {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed stats in {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("failed to serialize TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

/// Errors from playing a feedback cue.
#[derive(Debug, thiserror::Error)]
pub enum FeedbackError {
    #[error("playback failed: {0}")]
    Playback(#[from] std::io::Error),
}

/// Errors from setting up the log file.
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("failed to open log file {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
}
