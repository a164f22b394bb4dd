//! Forecast request and result types.

use chrono::NaiveDate;
use serde::{Serialize, Serializer};

use crate::error::ForecastError;

/// Date layout used when a forecast is rendered for the boundary layer.
pub const FORECAST_DATE_FORMAT: &str = "%d %b %Y";

/// Lag window and horizon for one forecast call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForecastRequest {
    lag_window: usize,
    horizon: usize,
}

impl ForecastRequest {
    /// Create a request, rejecting a zero lag window or horizon.
    ///
    /// # Errors
    ///
    /// Returns [`ForecastError::InvalidParameter`] if either value is zero.
    pub fn new(lag_window: usize, horizon: usize) -> Result<Self, ForecastError> {
        if lag_window == 0 {
            return Err(ForecastError::InvalidParameter {
                field: "lag_window",
                reason: "must be at least 1".to_string(),
            });
        }
        if horizon == 0 {
            return Err(ForecastError::InvalidParameter {
                field: "horizon",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(Self {
            lag_window,
            horizon,
        })
    }

    #[must_use]
    pub fn lag_window(&self) -> usize {
        self.lag_window
    }

    #[must_use]
    pub fn horizon(&self) -> usize {
        self.horizon
    }
}

/// One projected day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ForecastPoint {
    #[serde(serialize_with = "serialize_forecast_date")]
    pub date: NaiveDate,
    /// Predicted price, rounded to two decimals.
    pub price: f64,
}

/// Ordered projection of `horizon` days.
///
/// Serializes as a bare JSON array of `{ "date": "DD Mon YYYY", "price": f64 }`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ForecastResult {
    points: Vec<ForecastPoint>,
}

impl ForecastResult {
    pub(crate) fn new(points: Vec<ForecastPoint>) -> Self {
        Self { points }
    }

    #[must_use]
    pub fn points(&self) -> &[ForecastPoint] {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Predicted prices in order.
    #[must_use]
    pub fn prices(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.price).collect()
    }
}

impl IntoIterator for ForecastResult {
    type Item = ForecastPoint;
    type IntoIter = std::vec::IntoIter<ForecastPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.into_iter()
    }
}

fn serialize_forecast_date<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&date.format(FORECAST_DATE_FORMAT))
}

/// Magnitude past which an `f64` carries no cent digits.
const CENT_PRECISION_LIMIT: f64 = 1e15;

/// Round to two decimal places, half away from zero.
///
/// Values at or beyond `1e15` are returned unchanged, so a finite input
/// always gives a finite output.
#[must_use]
pub fn round_price(value: f64) -> f64 {
    if value.abs() >= CENT_PRECISION_LIMIT {
        return value;
    }
    (value * 100.0).round() / 100.0
}
