//! Canonical test configurations.

use std::time::Duration;

use crate::application::watch::WatchConfig;

/// Watch settings with short, jitter-free delays.
///
/// One-second poll interval, three-failure budget, 100 ms initial backoff
/// doubling up to 1 s.
pub fn fast_watch_config() -> WatchConfig {
    WatchConfig {
        poll_interval: Duration::from_secs(1),
        max_consecutive_failures: 3,
        initial_backoff: Duration::from_millis(100),
        max_backoff: Duration::from_secs(1),
        backoff_multiplier: 2.0,
        max_polls: None,
        jitter: false,
    }
}
