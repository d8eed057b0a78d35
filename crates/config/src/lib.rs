#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Configuration management for pkgweb
//!
//! This crate handles loading and merging configuration from:
//! - Default values (hard-coded)
//! - Configuration file (~/.config/pkgweb/config.toml)
//! - Environment variables
//! - CLI flags (applied by the binary)

pub mod constants;
pub mod core;

pub use self::core::{ClientConfig, GeneralConfig, TrackerConfig};

use constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, ENV_JSON_LOGS, ENV_LOG_LEVEL, ENV_TRACKER_DURATION_MS,
};
use pkgweb_errors::{ConfigError, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub tracker: TrackerConfig,

    #[serde(default)]
    pub client: ClientConfig,
}

impl Config {
    /// Get the default config file path
    ///
    /// # Errors
    ///
    /// Returns an error if the system config directory cannot be determined.
    pub fn default_path() -> Result<PathBuf, Error> {
        let config_dir = dirs::config_dir().ok_or_else(|| ConfigError::NotFound {
            path: "config directory".to_string(),
        })?;
        Ok(config_dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load configuration from file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML,
    /// or holds values that fail validation.
    pub async fn load_from_file(path: &Path) -> Result<Self, Error> {
        let contents = fs::read_to_string(path)
            .await
            .map_err(|_| ConfigError::NotFound {
                path: path.display().to_string(),
            })?;

        let config: Self = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            message: e.to_string(),
        })?;
        config.validate()?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Load configuration with fallback to defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file exists but cannot be read
    /// or contains invalid TOML syntax.
    pub async fn load() -> Result<Self, Error> {
        let config_path = Self::default_path()?;

        if config_path.exists() {
            Self::load_from_file(&config_path).await
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from an optional path or use default
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed
    pub async fn load_or_default(path: Option<&Path>) -> Result<Self, Error> {
        match path {
            Some(config_path) => Self::load_from_file(config_path).await,
            None => Self::load().await,
        }
    }

    /// Merge with environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if environment variables contain invalid values
    /// that cannot be parsed into the expected types.
    pub fn merge_env(&mut self) -> Result<(), Error> {
        if let Ok(duration) = std::env::var(ENV_TRACKER_DURATION_MS) {
            self.tracker.duration_ms =
                duration.parse().map_err(|_| ConfigError::InvalidValue {
                    field: ENV_TRACKER_DURATION_MS.to_string(),
                    value: duration,
                })?;
        }

        if let Ok(level) = std::env::var(ENV_LOG_LEVEL) {
            if !LOG_LEVELS.contains(&level.as_str()) {
                return Err(ConfigError::InvalidValue {
                    field: ENV_LOG_LEVEL.to_string(),
                    value: level,
                }
                .into());
            }
            self.general.log_level = level;
        }

        if let Ok(json) = std::env::var(ENV_JSON_LOGS) {
            self.general.json_logs = match json.as_str() {
                "true" | "1" | "yes" => true,
                "false" | "0" | "no" => false,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        field: ENV_JSON_LOGS.to_string(),
                        value: json,
                    }
                    .into())
                }
            };
        }

        self.validate()
    }

    /// Check values that serde cannot check on its own
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for a zero tracker duration, a
    /// zero poll interval or an unknown log level.
    pub fn validate(&self) -> Result<(), Error> {
        if self.tracker.duration_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "tracker.duration_ms".to_string(),
                value: "0".to_string(),
            }
            .into());
        }
        if self.client.poll_interval_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "client.poll_interval_ms".to_string(),
                value: "0".to_string(),
            }
            .into());
        }
        if !LOG_LEVELS.contains(&self.general.log_level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.log_level".to_string(),
                value: self.general.log_level.clone(),
            }
            .into());
        }
        Ok(())
    }

    /// Render the configuration as TOML
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_toml(&self) -> Result<String, Error> {
        toml::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializeError {
                error: e.to_string(),
            })
            .map_err(Into::into)
    }
}
