//! Inbound adapters: the ways requests reach the application.

pub mod cli;
