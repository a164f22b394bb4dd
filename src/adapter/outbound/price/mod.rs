//! Live price source adapters.

pub mod http;
