//! CLI module graph.

pub mod command;
pub mod forecast;
pub mod subscribe;
