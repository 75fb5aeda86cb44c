//! Supervisor configuration.

use std::time::Duration;

use serde::Deserialize;

use crate::application::DEFAULT_HEARTBEAT_INTERVAL;
use crate::runtime::SupervisorSettings;

/// Supervisor configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct SupervisorConfig {
    /// Seconds units get to stop after shutdown before being aborted (default: 30).
    #[serde(default = "default_shutdown_timeout_secs")]
    pub shutdown_timeout_secs: u64,
    /// Seconds between heartbeat log lines (default: 600).
    #[serde(default = "default_heartbeat_interval_secs")]
    pub heartbeat_interval_secs: u64,
    /// Stop every unit when one fails instead of isolating the failure.
    #[serde(default)]
    pub cascade_on_failure: bool,
}

const fn default_shutdown_timeout_secs() -> u64 {
    30
}

const fn default_heartbeat_interval_secs() -> u64 {
    DEFAULT_HEARTBEAT_INTERVAL.as_secs()
}

impl SupervisorConfig {
    #[must_use]
    pub const fn settings(&self) -> SupervisorSettings {
        SupervisorSettings {
            shutdown_timeout: Duration::from_secs(self.shutdown_timeout_secs),
            cascade_on_failure: self.cascade_on_failure,
        }
    }

    #[must_use]
    pub const fn heartbeat_interval(&self) -> Duration {
        Duration::from_secs(self.heartbeat_interval_secs)
    }
}

impl Default for SupervisorConfig {
    fn default() -> Self {
        Self {
            shutdown_timeout_secs: default_shutdown_timeout_secs(),
            heartbeat_interval_secs: default_heartbeat_interval_secs(),
            cascade_on_failure: false,
        }
    }
}
