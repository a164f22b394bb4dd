//! Autoregressive multi-step forecasting.
//!
//! A [`LagModel`] is fitted on the whole history, then rolled forward one
//! day at a time. Each prediction is appended to the working buffer and
//! becomes part of the next input window, so estimation error compounds
//! across the horizon.
//!
//! Projected dates assume a daily cadence: the first point is dated the
//! day after the last observation and every following point one day later,
//! whatever the spacing of the source history.

mod forecaster;
mod ols;

pub use forecaster::{forecast, ForecastService, Forecaster};
pub use ols::LagModel;
