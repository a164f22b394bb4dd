//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`price`] — Mock [`PriceSource`](crate::port::PriceSource)
//!   implementations: `ScriptedPriceSource`, `FailingPriceSource`.
//! - [`notifier`] — `RecordingSink` and `RecordingTransport`.
//! - [`domain`] — Builders for series and subscriptions.
//! - [`config`] — Canonical test configurations.

pub mod config;
pub mod domain;
pub mod notifier;
pub mod price;
