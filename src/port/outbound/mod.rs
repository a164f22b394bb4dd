//! Outbound ports: capabilities the application calls out to.

pub mod notifier;
pub mod price;
