//! Notification adapters.
//!
//! Implements the `port::NotificationSink` trait for external backends.

pub mod telegram;
