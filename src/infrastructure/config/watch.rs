//! Price-watch polling and retry configuration.

use std::time::Duration;

use serde::Deserialize;

use crate::application::watch::WatchConfig;

/// Polling cadence and fetch-failure policy for watch workers.
#[derive(Debug, Clone, Deserialize)]
pub struct WatchAppConfig {
    /// Seconds between polls (default: 10).
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
    /// Consecutive fetch failures before a worker gives up (default: 5).
    #[serde(default = "default_max_consecutive_failures")]
    pub max_consecutive_failures: u32,
    /// Delay after the first failed fetch (milliseconds).
    #[serde(default = "default_initial_backoff_ms")]
    pub initial_backoff_ms: u64,
    /// Maximum delay between retries (milliseconds).
    #[serde(default = "default_max_backoff_ms")]
    pub max_backoff_ms: u64,
    /// Multiplier applied to the delay after each failure.
    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: f64,
    /// Successful polls without a trigger before a worker expires.
    #[serde(default)]
    pub max_polls: Option<u32>,
}

const fn default_poll_interval_secs() -> u64 {
    10
}

const fn default_max_consecutive_failures() -> u32 {
    5
}

const fn default_initial_backoff_ms() -> u64 {
    1000 // 1 second
}

const fn default_max_backoff_ms() -> u64 {
    60000 // 60 seconds
}

fn default_backoff_multiplier() -> f64 {
    2.0
}

impl Default for WatchAppConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval_secs(),
            max_consecutive_failures: default_max_consecutive_failures(),
            initial_backoff_ms: default_initial_backoff_ms(),
            max_backoff_ms: default_max_backoff_ms(),
            backoff_multiplier: default_backoff_multiplier(),
            max_polls: None,
        }
    }
}

impl WatchAppConfig {
    /// Convert to the worker's runtime settings.
    #[must_use]
    pub fn to_watch_config(&self) -> WatchConfig {
        WatchConfig {
            poll_interval: Duration::from_secs(self.poll_interval_secs),
            max_consecutive_failures: self.max_consecutive_failures,
            initial_backoff: Duration::from_millis(self.initial_backoff_ms),
            max_backoff: Duration::from_millis(self.max_backoff_ms),
            backoff_multiplier: self.backoff_multiplier,
            max_polls: self.max_polls,
            jitter: true,
        }
    }
}
