//! Subscription intake configuration.

use serde::Deserialize;

use crate::application::dispatch::{DEFAULT_MODEL_ID, DEFAULT_REFERENCE_URL};

fn default_model_id() -> String {
    DEFAULT_MODEL_ID.to_string()
}

fn default_url() -> String {
    DEFAULT_REFERENCE_URL.to_string()
}

/// Defaults applied to every accepted subscription.
#[derive(Debug, Clone, Deserialize)]
pub struct DispatchAppConfig {
    /// Identifier of the watched item.
    #[serde(default = "default_model_id")]
    pub model_id: String,
    /// Link used when a request carries none.
    #[serde(default = "default_url")]
    pub default_url: String,
}

impl Default for DispatchAppConfig {
    fn default() -> Self {
        Self {
            model_id: default_model_id(),
            default_url: default_url(),
        }
    }
}
