use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::game::{TerminalPrecedence, HEIGHT, MAX_SIDE, MIN_SIDE, WIDTH};
use crate::stats::DEFAULT_KEY;

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub board: BoardConfig,
    pub rules: RulesConfig,
    pub stats: StatsConfig,
    pub feedback: FeedbackConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub width: usize,
    pub height: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig {
            width: WIDTH,
            height: HEIGHT,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Result reported when the final piece fills the board and completes a run
    pub precedence: TerminalPrecedence,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsConfig {
    pub enabled: bool,
    pub path: PathBuf,
    pub key: String,
}

impl Default for StatsConfig {
    fn default() -> Self {
        StatsConfig {
            enabled: true,
            path: PathBuf::from("connect_four_stats.json"),
            key: DEFAULT_KEY.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedbackConfig {
    pub sound: bool,
    pub animation: bool,
    /// Time the drop animation spends on each row
    pub animation_step_ms: u64,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        FeedbackConfig {
            sound: true,
            animation: true,
            animation_step_ms: 40,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub enabled: bool,
    pub file: PathBuf,
    /// Level filter when `RUST_LOG` is unset
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            enabled: true,
            file: PathBuf::from("connect_four.log"),
            level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            eprintln!("Warning: config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let side = MIN_SIDE..=MAX_SIDE;
        if !side.contains(&self.board.width) {
            return Err(ConfigError::Validation(format!(
                "board.width must be in [{MIN_SIDE}, {MAX_SIDE}]"
            )));
        }
        if !side.contains(&self.board.height) {
            return Err(ConfigError::Validation(format!(
                "board.height must be in [{MIN_SIDE}, {MAX_SIDE}]"
            )));
        }
        if self.stats.enabled && self.stats.path.as_os_str().is_empty() {
            return Err(ConfigError::Validation("stats.path must not be empty".into()));
        }
        if self.stats.key.is_empty() {
            return Err(ConfigError::Validation("stats.key must not be empty".into()));
        }
        if self.feedback.animation_step_ms == 0 || self.feedback.animation_step_ms > 1000 {
            return Err(ConfigError::Validation(
                "feedback.animation_step_ms must be in [1, 1000]".into(),
            ));
        }
        if self.logging.level.parse::<log::LevelFilter>().is_err() {
            return Err(ConfigError::Validation(format!(
                "logging.level '{}' is not a log level",
                self.logging.level
            )));
        }
        if self.logging.enabled && self.logging.file.as_os_str().is_empty() {
            return Err(ConfigError::Validation("logging.file must not be empty".into()));
        }
        Ok(())
    }

    /// Default configuration rendered as TOML.
    pub fn default_toml() -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(&AppConfig::default())?)
    }
}
