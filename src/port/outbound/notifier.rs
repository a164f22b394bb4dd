//! Notification sink port.
//!
//! A sink delivers a composed [`NotificationMessage`] to an external channel.
//! Delivery is fire-and-forget from the caller's point of view: failures are
//! reported as a soft [`DeliveryError`] and must never abort the caller.

use async_trait::async_trait;
use tracing::info;

use crate::domain::NotificationMessage;
use crate::error::DeliveryError;

/// Trait for notification delivery backends.
///
/// # Implementation Notes
///
/// - Implementations must be thread-safe (`Send + Sync`)
/// - An unconfigured sink succeeds without doing anything
/// - Implementations do not retry; callers do not retry either
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Deliver one message.
    ///
    /// # Errors
    ///
    /// Returns [`DeliveryError`] if the transport failed. Callers log and
    /// discard it.
    async fn deliver(&self, message: &NotificationMessage) -> Result<(), DeliveryError>;
}

/// A no-op sink for testing or when notifications are disabled.
pub struct NullSink;

#[async_trait]
impl NotificationSink for NullSink {
    async fn deliver(&self, _message: &NotificationMessage) -> Result<(), DeliveryError> {
        Ok(())
    }
}

/// A sink that only logs messages via tracing.
pub struct LogSink;

#[async_trait]
impl NotificationSink for LogSink {
    async fn deliver(&self, message: &NotificationMessage) -> Result<(), DeliveryError> {
        info!(
            subscription_id = %message.subscription_id,
            recipient = %message.recipient,
            price = message.observed_price,
            "Price alert"
        );
        Ok(())
    }
}
