//! Price-watch subscriptions and the alerts they produce.

use std::fmt;

use uuid::Uuid;

/// Currency symbol used in alert text.
pub const CURRENCY_SYMBOL: &str = "₪";

/// Unique subscription identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    /// Generate a fresh random identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SubscriptionId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for SubscriptionId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A subscriber's request to be told when an item drops to a target price.
///
/// Lives for as long as its watch worker; nothing is persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Subscription {
    pub id: SubscriptionId,
    /// Identifier of the watched item.
    pub model_id: String,
    /// Phone number or channel handle the subscriber gave.
    pub recipient: String,
    /// Alert fires once the live price is at or below this value.
    pub desired_price: f64,
    pub description: String,
    /// Link included in the alert.
    pub reference_url: String,
    /// Price the subscriber saw when subscribing (0 when not supplied).
    pub reference_price: f64,
}

impl Subscription {
    /// True when `price` meets this subscription's target.
    #[must_use]
    pub fn is_met_by(&self, price: f64) -> bool {
        price <= self.desired_price
    }
}

/// Plain-text alert composed from a subscription and an observed price.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationMessage {
    pub subscription_id: SubscriptionId,
    pub recipient: String,
    pub observed_price: f64,
    pub text: String,
}

impl NotificationMessage {
    /// Compose the price-drop alert for `subscription` at `observed_price`.
    #[must_use]
    pub fn price_drop(subscription: &Subscription, observed_price: f64) -> Self {
        let text = format!(
            "🚨 Price Drop Alert!\n\
             Model: {model}\n\
             Description: {description}\n\
             Your Target: {cur}{target:.2}\n\
             New Price Alert: {cur}{observed:.2}\n\
             Link: {url}",
            model = subscription.model_id,
            description = subscription.description,
            cur = CURRENCY_SYMBOL,
            target = subscription.desired_price,
            observed = observed_price,
            url = subscription.reference_url,
        );

        Self {
            subscription_id: subscription.id,
            recipient: subscription.recipient.clone(),
            observed_price,
            text,
        }
    }
}
