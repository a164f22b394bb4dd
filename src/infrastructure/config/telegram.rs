//! Telegram notification configuration.
//!
//! Only non-secret settings live in the file; the bot token and chat id are
//! read from `TELEGRAM_BOT_TOKEN` and `TELEGRAM_CHAT_ID`.

use serde::Deserialize;

use crate::adapter::outbound::notifier::telegram::notifier::DEFAULT_API_BASE;

const fn default_true() -> bool {
    true
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

/// Telegram notification configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct TelegramAppConfig {
    /// Enable telegram notifications.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Bot API base URL.
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Request timeout in seconds (default: 10).
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for TelegramAppConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            api_base: default_api_base(),
            timeout_secs: default_timeout_secs(),
        }
    }
}
