//! Telegram alert delivery.
//!
//! Provides [`TelegramSink`](notifier::TelegramSink), which posts alerts to
//! the Bot API through a swappable [`MessageTransport`](transport::MessageTransport).

pub mod notifier;
pub mod transport;
