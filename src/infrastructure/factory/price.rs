//! Live price source factory.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::adapter::outbound::price::http::HttpPriceSource;
use crate::error::{ConfigError, Result};
use crate::infrastructure::config::settings::Config;
use crate::port::PriceSource;

/// Build the live price source from the `[price_source]` section.
///
/// # Errors
///
/// Returns [`ConfigError::MissingField`] if no price source is configured,
/// or a fetch error if the HTTP client cannot be built.
#[allow(clippy::result_large_err)]
pub fn build_price_source(config: &Config) -> Result<Arc<dyn PriceSource>> {
    let settings = config
        .price_source
        .as_ref()
        .ok_or(ConfigError::MissingField {
            field: "price_source",
        })?;

    let source = HttpPriceSource::new(
        settings.url.as_str(),
        settings.field.as_str(),
        Duration::from_secs(settings.timeout_secs),
    )?;
    info!(url = %settings.url, field = %settings.field, "Price source configured");
    Ok(Arc::new(source))
}
