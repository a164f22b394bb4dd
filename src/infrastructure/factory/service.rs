//! Service-level factories.

use std::path::PathBuf;
use std::sync::Arc;

use crate::application::dispatch::SubscriptionDispatcher;
use crate::application::forecast::ForecastService;
use crate::domain::ForecastRequest;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::port::{NotificationSink, PriceSource};

/// Per-invocation overrides for the forecast command.
#[derive(Debug, Clone, Default)]
pub struct ForecastOverrides {
    pub data_path: Option<PathBuf>,
    pub lag_window: Option<usize>,
    pub horizon: Option<usize>,
}

/// Build the forecast service from configuration and overrides.
///
/// # Errors
///
/// Returns an error if the effective lag window or horizon is zero.
#[allow(clippy::result_large_err)]
pub fn build_forecast_service(
    config: &Config,
    overrides: ForecastOverrides,
) -> Result<ForecastService> {
    let lag_window = overrides.lag_window.unwrap_or(config.forecast.lag_window);
    let horizon = overrides.horizon.unwrap_or(config.forecast.horizon);
    let request = ForecastRequest::new(lag_window, horizon)?;
    let data_path = overrides
        .data_path
        .unwrap_or_else(|| config.forecast.data_path.clone());

    Ok(ForecastService::new(data_path, request))
}

/// Build the subscription dispatcher around the given adapters.
#[must_use]
pub fn build_dispatcher(
    config: &Config,
    source: Arc<dyn PriceSource>,
    sink: Arc<dyn NotificationSink>,
) -> SubscriptionDispatcher {
    SubscriptionDispatcher::new(config.dispatch_config(), source, sink)
}
