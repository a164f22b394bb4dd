//! Live price source port.

use async_trait::async_trait;

use crate::domain::Subscription;
use crate::error::FetchError;

/// Capability to look up the current live price of a subscribed item.
///
/// Watch workers must behave correctly for any implementation, including
/// one that always fails.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Fetch the current price for the item behind `subscription`.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] if the price could not be obtained. Workers
    /// retry with backoff up to their failure budget.
    async fn fetch(&self, subscription: &Subscription) -> Result<f64, FetchError>;
}
