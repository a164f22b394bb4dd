//! Notification sink factory.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::adapter::outbound::notifier::telegram::notifier::{TelegramConfig, TelegramSink};
use crate::adapter::outbound::notifier::telegram::transport::HttpTransport;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::port::{LogSink, NotificationSink};

/// Build the notification sink from configuration.
///
/// With Telegram disabled, alerts only go to the log. With Telegram enabled
/// but `credentials` absent, the Telegram sink is built unconfigured and
/// every delivery is a no-op.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built.
#[allow(clippy::result_large_err)]
pub fn build_notification_sink(
    config: &Config,
    credentials: Option<TelegramConfig>,
) -> Result<Arc<dyn NotificationSink>> {
    if !config.telegram.enabled {
        info!("Telegram disabled, alerts are logged only");
        return Ok(Arc::new(LogSink));
    }

    if credentials.is_none() {
        warn!("Telegram enabled but TELEGRAM_BOT_TOKEN or TELEGRAM_CHAT_ID not set");
    }

    let transport = HttpTransport::new(Duration::from_secs(config.telegram.timeout_secs))?;
    let sink = TelegramSink::with_transport(credentials, Arc::new(transport))
        .with_api_base(config.telegram.api_base.as_str());
    if sink.is_configured() {
        info!(api_base = %config.telegram.api_base, "Telegram notifier enabled");
    }
    Ok(Arc::new(sink))
}
