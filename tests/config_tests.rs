mod support;

use std::path::Path;
use std::time::Duration;

use pricewatch::error::{ConfigError, Error};
use pricewatch::infrastructure::config::settings::Config;

use support::fixtures::temp_config;

#[test]
fn full_config_file_loads() {
    let file = temp_config(
        r#"
[logging]
level = "debug"
format = "json"

[forecast]
data_path = "history/prices.csv"
lag_window = 5
horizon = 10

[watch]
poll_interval_secs = 60
max_consecutive_failures = 8
initial_backoff_ms = 500
max_backoff_ms = 30000
backoff_multiplier = 1.5
max_polls = 1440

[dispatch]
model_id = "999"
default_url = "https://shop.example/999"

[telegram]
enabled = true
api_base = "http://localhost:8081"
timeout_secs = 5

[price_source]
url = "https://prices.example/items/{model_id}"
field = "current"
timeout_secs = 3
"#,
    );

    let config = Config::load(file.path()).unwrap();

    assert_eq!(config.logging.format, "json");
    assert_eq!(config.forecast.data_path, Path::new("history/prices.csv"));
    assert_eq!(config.forecast.lag_window, 5);
    assert_eq!(config.forecast.horizon, 10);

    let dispatch = config.dispatch_config();
    assert_eq!(dispatch.model_id, "999");
    assert_eq!(dispatch.default_url, "https://shop.example/999");
    assert_eq!(dispatch.watch.poll_interval, Duration::from_secs(60));
    assert_eq!(dispatch.watch.max_consecutive_failures, 8);
    assert_eq!(dispatch.watch.max_polls, Some(1440));

    assert_eq!(config.telegram.api_base, "http://localhost:8081");
    let source = config.price_source.unwrap();
    assert_eq!(source.field, "current");
    assert_eq!(source.timeout_secs, 3);
}

#[test]
fn missing_file_is_read_error() {
    let err = Config::load("does/not/exist.toml").unwrap_err();
    assert!(matches!(err, Error::Config(ConfigError::ReadFile(_))));
}

#[test]
fn rejects_zero_poll_interval() {
    let file = temp_config("[watch]\npoll_interval_secs = 0\n");
    let err = Config::load(file.path()).unwrap_err();
    assert!(err.to_string().contains("poll_interval_secs"));
}

#[test]
fn rejects_zero_failure_budget() {
    let err = Config::parse_toml("[watch]\nmax_consecutive_failures = 0\n").unwrap_err();
    assert!(matches!(
        err,
        Error::Config(ConfigError::InvalidValue {
            field: "max_consecutive_failures",
            ..
        })
    ));
}

#[test]
fn rejects_zero_horizon() {
    let err = Config::parse_toml("[forecast]\nhorizon = 0\n").unwrap_err();
    assert!(err.to_string().contains("horizon"));
}

#[test]
fn rejects_blank_model_id() {
    let err = Config::parse_toml("[dispatch]\nmodel_id = \"  \"\n").unwrap_err();
    assert!(matches!(
        err,
        Error::Config(ConfigError::MissingField { field: "model_id" })
    ));
}

#[test]
fn unknown_format_falls_back_to_pretty_logging() {
    let config = Config::parse_toml("[logging]\nformat = \"fancy\"\n").unwrap();
    // Must not panic; an unknown format uses the human-readable formatter.
    config.init_logging();
    config.init_logging();
}
