//! Forecast driver and the "forecast next week" service.

use std::path::PathBuf;

use chrono::NaiveDate;
use tracing::{debug, info};

use super::ols::LagModel;
use crate::application::loader;
use crate::domain::{round_price, ForecastPoint, ForecastRequest, ForecastResult, PriceSeries};
use crate::error::ForecastError;

/// Forecast `horizon` days past the end of `series` from a `lag_window`
/// autoregressive model.
///
/// # Errors
///
/// - [`ForecastError::InvalidParameter`] if either parameter is 0
/// - [`ForecastError::InsufficientData`] if `series.len() <= lag_window`
/// - [`ForecastError::NumericInstability`] if the fit or any prediction is
///   not finite, or a projected date is out of range
pub fn forecast(
    series: &PriceSeries,
    lag_window: usize,
    horizon: usize,
) -> Result<ForecastResult, ForecastError> {
    let request = ForecastRequest::new(lag_window, horizon)?;
    Forecaster::new(request).run(series)
}

/// Stateless forecaster bound to one [`ForecastRequest`].
#[derive(Debug, Clone, Copy)]
pub struct Forecaster {
    request: ForecastRequest,
}

impl Forecaster {
    #[must_use]
    pub fn new(request: ForecastRequest) -> Self {
        Self { request }
    }

    /// Fit and project. No partial result is returned on failure.
    ///
    /// # Errors
    ///
    /// See [`forecast`].
    pub fn run(&self, series: &PriceSeries) -> Result<ForecastResult, ForecastError> {
        let lag_window = self.request.lag_window();
        let horizon = self.request.horizon();

        let last = match series.last() {
            Some(point) if series.len() > lag_window => *point,
            _ => {
                return Err(ForecastError::InsufficientData {
                    len: series.len(),
                    lag_window,
                })
            }
        };

        let days_left = (NaiveDate::MAX - last.date).num_days();
        if u64::try_from(horizon).map_or(true, |h| h > days_left.unsigned_abs()) {
            return Err(ForecastError::NumericInstability(format!(
                "{horizon} days after {} is out of range",
                last.date
            )));
        }

        let mut history = series.prices();
        let model = LagModel::fit(&history, lag_window)?;
        debug!(
            intercept = model.intercept(),
            coefficients = ?model.coefficients(),
            "Lag model fitted"
        );

        let mut points = Vec::new();
        let mut date = last.date;

        for _ in 0..horizon {
            let window = &history[history.len() - lag_window..];
            let next = model.predict_next(window)?;
            history.push(next);

            date = date.succ_opt().ok_or_else(|| {
                ForecastError::NumericInstability(format!("date after {date} is out of range"))
            })?;
            points.push(ForecastPoint {
                date,
                price: round_price(next),
            });
        }

        info!(
            observations = series.len(),
            lag_window,
            horizon,
            "Forecast complete"
        );
        Ok(ForecastResult::new(points))
    }
}

/// Boundary operation behind the "forecast next week" request: load the
/// configured history and forecast with the configured lag and horizon.
#[derive(Debug, Clone)]
pub struct ForecastService {
    data_path: PathBuf,
    request: ForecastRequest,
}

impl ForecastService {
    #[must_use]
    pub fn new(data_path: impl Into<PathBuf>, request: ForecastRequest) -> Self {
        Self {
            data_path: data_path.into(),
            request,
        }
    }

    #[must_use]
    pub fn data_path(&self) -> &std::path::Path {
        &self.data_path
    }

    /// Load the history file and run the forecast.
    ///
    /// # Errors
    ///
    /// Any loader or forecaster error, unchanged.
    pub fn forecast_next_week(&self) -> Result<ForecastResult, ForecastError> {
        let series = loader::load_path(&self.data_path)?;
        Forecaster::new(self.request).run(&series)
    }
}
