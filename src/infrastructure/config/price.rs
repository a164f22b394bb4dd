//! Live price source configuration.

use serde::Deserialize;

fn default_field() -> String {
    "price".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

/// HTTP price source settings. Absent means no live source is available.
#[derive(Debug, Clone, Deserialize)]
pub struct PriceSourceConfig {
    /// URL template; `{model_id}` is replaced per subscription.
    pub url: String,
    /// Top-level JSON field holding the price (default: "price").
    #[serde(default = "default_field")]
    pub field: String,
    /// Request timeout in seconds (default: 10).
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}
