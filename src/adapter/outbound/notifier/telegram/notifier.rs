//! Telegram Bot API notification sink.
//!
//! Sends alerts with `sendMessage` as a plain JSON POST. Credentials are
//! passed in explicitly; when they are absent every delivery is a silent
//! no-op.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, info, warn};

use super::transport::MessageTransport;
use crate::domain::NotificationMessage;
use crate::error::DeliveryError;
use crate::port::NotificationSink;

/// Public Bot API endpoint.
pub const DEFAULT_API_BASE: &str = "https://api.telegram.org";

/// Bot credentials for the Telegram sink.
#[derive(Clone)]
pub struct TelegramConfig {
    /// Bot API token obtained from BotFather.
    pub bot_token: String,
    /// Target chat or channel identifier.
    pub chat_id: String,
}

impl std::fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramConfig")
            .field("bot_token", &"<redacted>")
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

impl TelegramConfig {
    /// Create configuration from environment variables.
    ///
    /// Reads `TELEGRAM_BOT_TOKEN` and `TELEGRAM_CHAT_ID`. Returns `None` if
    /// either is missing or empty.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let bot_token = std::env::var("TELEGRAM_BOT_TOKEN")
            .ok()
            .filter(|s| !s.trim().is_empty())?;
        let chat_id = std::env::var("TELEGRAM_CHAT_ID")
            .ok()
            .filter(|s| !s.trim().is_empty())?;

        Some(Self { bot_token, chat_id })
    }
}

/// Notification sink posting to the Telegram Bot API.
pub struct TelegramSink {
    credentials: Option<TelegramConfig>,
    api_base: String,
    transport: Arc<dyn MessageTransport>,
}

impl TelegramSink {
    /// Create a sink with an explicit transport.
    #[must_use]
    pub fn with_transport(
        credentials: Option<TelegramConfig>,
        transport: Arc<dyn MessageTransport>,
    ) -> Self {
        Self {
            credentials,
            api_base: DEFAULT_API_BASE.to_string(),
            transport,
        }
    }

    /// Override the Bot API base URL.
    #[must_use]
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    /// True when credentials are present and deliveries hit the network.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.credentials.is_some()
    }

    fn send_message_url(&self, bot_token: &str) -> String {
        format!("{}/bot{}/sendMessage", self.api_base, bot_token)
    }
}

#[async_trait]
impl NotificationSink for TelegramSink {
    async fn deliver(&self, message: &NotificationMessage) -> Result<(), DeliveryError> {
        let Some(credentials) = &self.credentials else {
            debug!(
                subscription_id = %message.subscription_id,
                "Telegram not configured, skipping alert"
            );
            return Ok(());
        };

        let body = json!({
            "chat_id": credentials.chat_id,
            "text": message.text,
        });
        let url = self.send_message_url(&credentials.bot_token);

        match self.transport.post_json(&url, &body).await {
            Ok(()) => {
                info!(
                    subscription_id = %message.subscription_id,
                    chat_id = %credentials.chat_id,
                    "Telegram alert sent"
                );
                Ok(())
            }
            Err(err) => {
                warn!(
                    subscription_id = %message.subscription_id,
                    error = %err,
                    "Failed to send Telegram message"
                );
                Err(err)
            }
        }
    }
}
