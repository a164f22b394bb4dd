//! Implementations of ports (hexagonal adapters).
//!
//! - [`inbound`] - Driving side: the command-line interface
//! - [`outbound`] - Driven side: Telegram delivery, HTTP price lookup

pub mod inbound;
pub mod outbound;
