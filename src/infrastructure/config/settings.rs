//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Configuration is loaded from a TOML file; Telegram credentials come only
//! from `TELEGRAM_BOT_TOKEN` and `TELEGRAM_CHAT_ID`.
//!
//! # Example
//!
//! ```no_run
//! use pricewatch::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use serde::Deserialize;
use url::Url;

use super::dispatch::DispatchAppConfig;
use super::forecast::ForecastConfig;
use super::logging::LoggingConfig;
use super::price::PriceSourceConfig;
use super::telegram::TelegramAppConfig;
use super::watch::WatchAppConfig;
use crate::adapter::outbound::price::http::MODEL_ID_PLACEHOLDER;
use crate::application::dispatch::DispatchConfig;
use crate::error::{ConfigError, Result};

/// Main application configuration.
///
/// Every section is optional. Load from a TOML file using [`Config::load`]
/// or parse directly with [`Config::parse_toml`].
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Data file and model parameters for the forecast command.
    #[serde(default)]
    pub forecast: ForecastConfig,

    /// Polling cadence and retry policy for watch workers.
    #[serde(default)]
    pub watch: WatchAppConfig,

    /// Defaults applied to accepted subscriptions.
    #[serde(default)]
    pub dispatch: DispatchAppConfig,

    /// Telegram notification configuration.
    #[serde(default)]
    pub telegram: TelegramAppConfig,

    /// Live price source. Subscriptions cannot be watched without one.
    #[serde(default)]
    pub price_source: Option<PriceSourceConfig>,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Validate configuration values.
    #[allow(clippy::result_large_err)]
    fn validate(&self) -> Result<()> {
        if self.forecast.lag_window == 0 {
            return Err(invalid("lag_window", "must be greater than 0"));
        }
        if self.forecast.horizon == 0 {
            return Err(invalid("horizon", "must be greater than 0"));
        }

        let watch = &self.watch;
        if watch.poll_interval_secs == 0 {
            return Err(invalid("poll_interval_secs", "must be greater than 0"));
        }
        if watch.max_consecutive_failures == 0 {
            return Err(invalid("max_consecutive_failures", "must be greater than 0"));
        }
        if watch.initial_backoff_ms == 0 {
            return Err(invalid("initial_backoff_ms", "must be greater than 0"));
        }
        if watch.max_backoff_ms < watch.initial_backoff_ms {
            return Err(invalid("max_backoff_ms", "must be >= initial_backoff_ms"));
        }
        if !watch.backoff_multiplier.is_finite() || watch.backoff_multiplier < 1.0 {
            return Err(invalid("backoff_multiplier", "must be finite and >= 1.0"));
        }
        if watch.max_polls == Some(0) {
            return Err(invalid("max_polls", "must be greater than 0 when set"));
        }

        if self.dispatch.model_id.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "model_id" }.into());
        }

        if self.telegram.timeout_secs == 0 {
            return Err(invalid("telegram.timeout_secs", "must be greater than 0"));
        }
        check_url("api_base", &self.telegram.api_base)?;

        if let Some(source) = &self.price_source {
            if source.url.trim().is_empty() {
                return Err(ConfigError::MissingField {
                    field: "price_source.url",
                }
                .into());
            }
            check_url(
                "price_source.url",
                &source.url.replace(MODEL_ID_PLACEHOLDER, "0"),
            )?;
            if source.field.trim().is_empty() {
                return Err(ConfigError::MissingField {
                    field: "price_source.field",
                }
                .into());
            }
            if source.timeout_secs == 0 {
                return Err(invalid("price_source.timeout_secs", "must be greater than 0"));
            }
        }

        Ok(())
    }

    /// Runtime settings for the subscription dispatcher.
    #[must_use]
    pub fn dispatch_config(&self) -> DispatchConfig {
        DispatchConfig {
            model_id: self.dispatch.model_id.clone(),
            default_url: self.dispatch.default_url.clone(),
            watch: self.watch.to_watch_config(),
        }
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}

fn invalid(field: &'static str, reason: &str) -> crate::error::Error {
    ConfigError::InvalidValue {
        field,
        reason: reason.to_string(),
    }
    .into()
}

#[allow(clippy::result_large_err)]
fn check_url(field: &'static str, value: &str) -> Result<()> {
    let parsed = Url::parse(value).map_err(|e| invalid(field, &e.to_string()))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(invalid(field, "scheme must be http or https"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::time::Duration;

    #[test]
    fn empty_file_uses_defaults() {
        let config = Config::parse_toml("").unwrap();

        assert_eq!(config.forecast.lag_window, 7);
        assert_eq!(config.forecast.horizon, 7);
        assert_eq!(config.watch.poll_interval_secs, 10);
        assert_eq!(config.watch.max_consecutive_failures, 5);
        assert_eq!(config.dispatch.model_id, "1226219");
        assert!(config.telegram.enabled);
        assert!(config.price_source.is_none());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn watch_section_converts_to_runtime_config() {
        let config = Config::parse_toml(
            r#"
            [watch]
            poll_interval_secs = 30
            initial_backoff_ms = 250
            max_backoff_ms = 4000
            backoff_multiplier = 3.0
            max_polls = 12
            "#,
        )
        .unwrap();

        let dispatch = config.dispatch_config();
        assert_eq!(dispatch.watch.poll_interval, Duration::from_secs(30));
        assert_eq!(dispatch.watch.initial_backoff, Duration::from_millis(250));
        assert_eq!(dispatch.watch.max_backoff, Duration::from_secs(4));
        assert_eq!(dispatch.watch.max_polls, Some(12));
        assert!(dispatch.watch.jitter);
    }

    #[test]
    fn price_source_template_is_accepted() {
        let config = Config::parse_toml(
            r#"
            [price_source]
            url = "https://prices.example/api/{model_id}"
            "#,
        )
        .unwrap();

        let source = config.price_source.unwrap();
        assert_eq!(source.field, "price");
        assert_eq!(source.timeout_secs, 10);
    }

    #[test]
    fn rejects_zero_lag_window() {
        let err = Config::parse_toml("[forecast]\nlag_window = 0").unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidValue {
                field: "lag_window",
                ..
            })
        ));
    }

    #[test]
    fn rejects_backoff_cap_below_initial() {
        let err = Config::parse_toml("[watch]\ninitial_backoff_ms = 500\nmax_backoff_ms = 100")
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidValue {
                field: "max_backoff_ms",
                ..
            })
        ));
    }

    #[test]
    fn rejects_shrinking_backoff() {
        let err = Config::parse_toml("[watch]\nbackoff_multiplier = 0.5").unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidValue {
                field: "backoff_multiplier",
                ..
            })
        ));
    }

    #[test]
    fn rejects_infinite_backoff_multiplier() {
        let err = Config::parse_toml("[watch]\nbackoff_multiplier = inf").unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidValue {
                field: "backoff_multiplier",
                ..
            })
        ));
    }

    #[test]
    fn rejects_unparseable_price_url() {
        let err = Config::parse_toml("[price_source]\nurl = \"not a url\"").unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidValue {
                field: "price_source.url",
                ..
            })
        ));
    }

    #[test]
    fn rejects_non_http_api_base() {
        let err = Config::parse_toml("[telegram]\napi_base = \"ftp://example.com\"").unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidValue {
                field: "api_base",
                ..
            })
        ));
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        let err = Config::parse_toml("[watch\n").unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::Parse(_))));
    }
}
