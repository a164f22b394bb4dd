//! Core domain types: price series, forecasts, subscriptions.

mod forecast;
mod series;
mod subscription;

pub use forecast::{
    round_price, ForecastPoint, ForecastRequest, ForecastResult, FORECAST_DATE_FORMAT,
};
pub use series::{PricePoint, PriceSeries};
pub use subscription::{NotificationMessage, Subscription, SubscriptionId, CURRENCY_SYMBOL};

pub(crate) use series::is_valid_price;
