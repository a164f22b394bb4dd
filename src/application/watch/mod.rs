//! Price-watch workers.
//!
//! One [`PriceWatchWorker`] runs per subscription as an independent tokio
//! task. The worker moves through
//!
//! ```text
//! Scheduled ──spawn──> Polling ──price <= target──> Triggered
//!                         │
//!                         ├──cancel──────────────> Cancelled
//!                         └──failure budget spent─> Failed
//! ```
//!
//! Each polling cycle waits (the poll interval, or a backoff delay after a
//! failed fetch), fetches the live price through the injected
//! [`PriceSource`](crate::port::PriceSource), and compares it with the
//! target. At most one alert is ever delivered per worker, and none after
//! cancellation or failure.

mod backoff;
mod worker;

pub use backoff::Backoff;
pub use worker::{
    FailureReason, PriceWatchWorker, WatchConfig, WatchHandle, WatchOutcome, WatchState,
};
