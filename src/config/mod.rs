//! Configuration module for AlgoVis-RS
//!
//! Engine configuration is a single TOML document. Every section and field
//! has a default, so an empty file is a valid configuration.
//!
//! # Example file
//!
//! ```toml
//! default_algorithm = "merge-sort"
//!
//! [pacing]
//! step_delay_ms = 16
//! yield_each_step = true
//!
//! [channel]
//! capacity = 256
//! send_timeout_ms = 500
//!
//! [logging]
//! filter = "algovis_rs=debug"
//! directory = "logs"
//! ```
//!
//! # Example
//!
//! ```ignore
//! use algovis_rs::config::EngineConfig;
//!
//! let config = EngineConfig::load_or_default("algovis.toml");
//! let _guard = algovis_rs::logging::init(&config.logging);
//! ```

use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default bound of a channel sink's queue
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1024;

/// Default time a channel sink waits for queue space, in milliseconds
pub const DEFAULT_SEND_TIMEOUT_MS: u64 = 1000;

/// Default tracing filter directive
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Algorithm run when no id is given
pub const DEFAULT_ALGORITHM: &str = "insertion-sort";

/// Top-level engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Catalog id executed by `SortingEngine::execute_default`
    pub default_algorithm: String,

    /// Step pacing applied by the runner
    pub pacing: PacingConfig,

    /// Settings for channel sinks
    pub channel: ChannelConfig,

    /// Log output settings
    pub logging: LoggingConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_algorithm: DEFAULT_ALGORITHM.to_string(),
            pacing: PacingConfig::default(),
            channel: ChannelConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Suspension after each published step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    /// Sleep after every broadcast, in milliseconds (0 disables)
    pub step_delay_ms: u64,

    /// Yield to the async scheduler after every broadcast
    pub yield_each_step: bool,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            step_delay_ms: 0,
            yield_each_step: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelConfig {
    /// Maximum queued messages before senders block
    pub capacity: usize,

    /// How long a send may block before failing, in milliseconds
    pub send_timeout_ms: u64,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CHANNEL_CAPACITY,
            send_timeout_ms: DEFAULT_SEND_TIMEOUT_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is unset
    pub filter: String,

    /// Directory for a daily-rolling log file; stderr only when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_LOG_FILTER.to_string(),
            directory: None,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| EngineError::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| EngineError::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Load a config file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            EngineError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Load a config file, returning defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            tracing::warn!("Failed to load engine config, using defaults: {}", e);
            Self::default()
        })
    }

    /// Save config to disk as TOML
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                EngineError::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = self.to_toml_string()?;
        std::fs::write(path, content).map_err(|e| {
            EngineError::Config(format!("Failed to write config file {:?}: {}", path, e))
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.channel.capacity == 0 {
            return Err(EngineError::invalid_argument(
                "channel.capacity",
                "must be greater than zero",
            ));
        }
        if self.logging.filter.trim().is_empty() {
            return Err(EngineError::invalid_argument("logging.filter", "must not be blank"));
        }
        if self.default_algorithm.trim().is_empty() {
            return Err(EngineError::invalid_argument(
                "default_algorithm",
                "must not be blank",
            ));
        }
        Ok(())
    }
}
