//! Builders for domain primitives: series and subscriptions.

use chrono::{Days, NaiveDate};

use crate::domain::{PriceSeries, Subscription, SubscriptionId};

/// Series with one point per day starting at `start`.
pub fn daily_series_from(start: NaiveDate, prices: &[f64]) -> PriceSeries {
    PriceSeries::from_observations(
        prices
            .iter()
            .enumerate()
            .map(|(i, p)| (start + Days::new(i as u64), *p)),
    )
}

/// Series with one point per day starting 2025-01-01.
pub fn daily_series(prices: &[f64]) -> PriceSeries {
    let start = NaiveDate::from_ymd_opt(2025, 1, 1).expect("valid start date");
    daily_series_from(start, prices)
}

/// A subscription targeting `desired_price` with placeholder details.
pub fn subscription(desired_price: f64) -> Subscription {
    Subscription {
        id: SubscriptionId::new(),
        model_id: "1226219".into(),
        recipient: "+15550000000".into(),
        desired_price,
        description: "Test TV".into(),
        reference_url: "https://example.com/item".into(),
        reference_price: 0.0,
    }
}
