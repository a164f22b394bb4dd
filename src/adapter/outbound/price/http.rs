//! JSON-over-HTTP price source.
//!
//! Fetches `GET <url>` where `{model_id}` in the configured template is
//! replaced by the subscription's model id, and reads one top-level field
//! of the JSON response as the price. The field may be a number or a
//! numeric string.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::domain::Subscription;
use crate::error::FetchError;
use crate::port::PriceSource;

/// Placeholder substituted with the subscription's model id.
pub const MODEL_ID_PLACEHOLDER: &str = "{model_id}";

/// HTTP-backed [`PriceSource`].
#[derive(Debug, Clone)]
pub struct HttpPriceSource {
    client: Client,
    url_template: String,
    field: String,
}

impl HttpPriceSource {
    /// Create a source for `url_template`, reading `field` from the response.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Request`] if the HTTP client cannot be built.
    pub fn new(
        url_template: impl Into<String>,
        field: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| FetchError::Request(e.to_string()))?;
        Ok(Self {
            client,
            url_template: url_template.into(),
            field: field.into(),
        })
    }

    /// Resolve the request URL for one subscription.
    #[must_use]
    pub fn url_for(&self, subscription: &Subscription) -> String {
        self.url_template.replace(MODEL_ID_PLACEHOLDER, &subscription.model_id)
    }
}

#[async_trait]
impl PriceSource for HttpPriceSource {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn fetch(&self, subscription: &Subscription) -> Result<f64, FetchError> {
        let url = self.url_for(subscription);
        debug!(url = %url, "Fetching live price");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FetchError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| FetchError::Malformed(e.to_string()))?;
        extract_price(&body, &self.field)
    }
}

/// Read `field` from a JSON object as a price.
pub(crate) fn extract_price(body: &Value, field: &str) -> Result<f64, FetchError> {
    let value = body
        .get(field)
        .ok_or_else(|| FetchError::Malformed(format!("missing field `{field}`")))?;

    let price = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    price.ok_or_else(|| FetchError::Malformed(format!("field `{field}` is not numeric")))
}
