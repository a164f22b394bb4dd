//! HTTP transport used by the Telegram sink.
//!
//! Kept behind a trait so the sink can be exercised without network access.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::error::DeliveryError;

/// Posts a JSON body to a URL.
#[async_trait]
pub trait MessageTransport: Send + Sync {
    /// POST `body` as JSON to `url`.
    ///
    /// # Errors
    ///
    /// Returns [`DeliveryError::Transport`] on network failure and
    /// [`DeliveryError::Status`] on a non-success response.
    async fn post_json(&self, url: &str, body: &Value) -> Result<(), DeliveryError>;
}

/// [`MessageTransport`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Create a transport with the given request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`DeliveryError::Transport`] if the HTTP client cannot be built.
    pub fn new(timeout: Duration) -> Result<Self, DeliveryError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DeliveryError::Transport(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl MessageTransport for HttpTransport {
    async fn post_json(&self, url: &str, body: &Value) -> Result<(), DeliveryError> {
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| DeliveryError::Transport(e.without_url().to_string()))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(DeliveryError::Status(status.as_u16()))
        }
    }
}
