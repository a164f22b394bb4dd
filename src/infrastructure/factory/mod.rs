//! Factory modules for building infrastructure components.
//!
//! Provides factory functions that construct fully-configured components
//! from application configuration. These factories handle dependency
//! injection and wiring.
//!
//! # Submodules
//!
//! - [`notifier`] - Notification sink construction
//! - [`price`] - Live price source construction
//! - [`service`] - Forecast service and subscription dispatcher construction

pub mod notifier;
pub mod price;
pub mod service;
