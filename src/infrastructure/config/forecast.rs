//! Forecast endpoint configuration.

use std::path::PathBuf;

use serde::Deserialize;

fn default_data_path() -> PathBuf {
    PathBuf::from("data/dataset.csv")
}

const fn default_lag_window() -> usize {
    7
}

const fn default_horizon() -> usize {
    7
}

/// Settings for the "forecast next week" operation.
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastConfig {
    /// CSV file with `date` and `price` columns.
    #[serde(default = "default_data_path")]
    pub data_path: PathBuf,
    /// Number of past observations per model input (default: 7).
    #[serde(default = "default_lag_window")]
    pub lag_window: usize,
    /// Number of days to project (default: 7).
    #[serde(default = "default_horizon")]
    pub horizon: usize,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            data_path: default_data_path(),
            lag_window: default_lag_window(),
            horizon: default_horizon(),
        }
    }
}
