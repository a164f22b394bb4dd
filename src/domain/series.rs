//! Cleaned, time-ordered price series.

use chrono::NaiveDate;
use serde::Serialize;

/// A single observation in a cleaned series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PricePoint {
    /// Calendar date of the observation.
    pub date: NaiveDate,
    /// Observed price. Always finite and non-negative.
    pub price: f64,
    /// Zero-based position of this point in the cleaned series.
    pub day_index: usize,
}

/// Ordered, immutable sequence of [`PricePoint`]s.
///
/// Dates are non-decreasing and `day_index` runs `0..len` without gaps.
/// Construct through [`PriceSeries::from_observations`] or the series loader.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Build a series from raw `(date, price)` observations.
    ///
    /// Observations with a non-finite or negative price are discarded; the
    /// rest are stably sorted by date and re-indexed from zero.
    #[must_use]
    pub fn from_observations(observations: impl IntoIterator<Item = (NaiveDate, f64)>) -> Self {
        let mut kept: Vec<(NaiveDate, f64)> = observations
            .into_iter()
            .filter(|(_, price)| is_valid_price(*price))
            .collect();
        kept.sort_by_key(|(date, _)| *date);

        let points = kept
            .into_iter()
            .enumerate()
            .map(|(day_index, (date, price))| PricePoint {
                date,
                price,
                day_index,
            })
            .collect();

        Self { points }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[must_use]
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// Prices in series order.
    #[must_use]
    pub fn prices(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.price).collect()
    }

    /// The most recent observation, if any.
    #[must_use]
    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }
}

/// A price survives cleaning only if it is finite and non-negative.
pub(crate) fn is_valid_price(price: f64) -> bool {
    price.is_finite() && price >= 0.0
}
