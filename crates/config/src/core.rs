//! Configuration sections shared across crates

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// General application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub json_logs: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            json_logs: false,
        }
    }
}

/// Operation state tracker configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// How long a tracked operation may stay pending before it is dropped
    #[serde(default = "default_tracker_duration_ms")]
    pub duration_ms: u64,
}

impl TrackerConfig {
    /// Tracker lifetime as a `Duration`
    #[must_use]
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            duration_ms: default_tracker_duration_ms(),
        }
    }
}

/// Package client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

impl ClientConfig {
    /// Poll interval as a `Duration`
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

// Default value functions for serde
fn default_log_level() -> String {
    "info".to_string()
}

fn default_tracker_duration_ms() -> u64 {
    30_000 // 30 seconds
}

fn default_poll_interval_ms() -> u64 {
    500
}
