use thiserror::Error;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Errors raised while loading a price series or forecasting from it.
///
/// All variants are returned synchronously to the caller; none of them
/// are retried.
#[derive(Error, Debug)]
pub enum ForecastError {
    #[error("data format error: {0}")]
    DataFormat(String),

    #[error("not enough data to forecast: {len} points for lag window {lag_window}")]
    InsufficientData { len: usize, lag_window: usize },

    #[error("numeric instability: {0}")]
    NumericInstability(String),

    #[error("invalid value for {field}: {reason}")]
    InvalidParameter { field: &'static str, reason: String },

    #[error("failed to read price data: {0}")]
    Read(#[source] std::io::Error),
}

impl ForecastError {
    /// True when the failure is caused by the request or its input data
    /// rather than by the process (the 4xx-equivalent cases).
    #[must_use]
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InsufficientData { .. } | Self::InvalidParameter { .. } | Self::DataFormat(_)
        )
    }
}

/// Live-price lookup failure inside a watch worker.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    #[error("price request failed: {0}")]
    Request(String),

    #[error("price source returned status {0}")]
    Status(u16),

    #[error("malformed price response: {0}")]
    Malformed(String),
}

/// Notification transport failure. Soft by contract: logged and discarded.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DeliveryError {
    #[error("notification transport failed: {0}")]
    Transport(String),

    #[error("notification endpoint returned status {0}")]
    Status(u16),
}

/// Subscribe request validation failure.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SubscribeError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Forecast(#[from] ForecastError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Delivery(#[from] DeliveryError),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
