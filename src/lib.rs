//! Pricewatch - short-term price forecasting and price-drop alerts.
//!
//! The crate has two cores: an autoregressive forecaster that turns an
//! ordered daily price series into a multi-day projection, and a price-watch
//! worker that polls a live price for one subscriber and alerts exactly once
//! when the target is met.
//!
//! # Architecture
//!
//! The crate follows a ports-and-adapters layout:
//!
//! - **`domain`** - Price series, forecast and subscription types
//! - **`application`** - Series loading, forecasting, watch workers and the
//!   subscription dispatcher
//! - **`port`** - `PriceSource` and `NotificationSink` traits
//! - **`adapter`** - CLI (inbound), Telegram and HTTP price source (outbound)
//! - **`infrastructure`** - Configuration, logging and component factories
//!
//! # Features
//!
//! - `testkit` - Exposes scripted price sources, recording sinks and series
//!   builders for integration tests
//!
//! # Example
//!
//! ```no_run
//! use pricewatch::application::{forecast, loader};
//!
//! let series = loader::load_path("data/dataset.csv")?;
//! let result = forecast::forecast(&series, 7, 7)?;
//! for point in result.points() {
//!     println!("{} {:.2}", point.date, point.price);
//! }
//! # Ok::<(), pricewatch::error::ForecastError>(())
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
