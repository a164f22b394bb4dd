//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! # Architecture
//!
//! ```text
//!                 ┌──────────────────────────┐
//!                 │       Application        │
//!                 │  forecast · watch ·      │
//!                 │  dispatch                │
//!                 └────────────┬─────────────┘
//!                              │
//!              ┌───────────────┴───────────────┐
//!              ▼                               ▼
//!      ┌───────────────┐               ┌────────────────┐
//!      │  PriceSource  │               │NotificationSink│
//!      │ (HTTP, tests) │               │(Telegram, log) │
//!      └───────────────┘               └────────────────┘
//! ```
//!
//! # Available Ports
//!
//! - [`PriceSource`] - Live price lookup for watch workers
//! - [`NotificationSink`] - Alert delivery

pub mod outbound;

pub use outbound::notifier::{LogSink, NotificationSink, NullSink};
pub use outbound::price::PriceSource;
