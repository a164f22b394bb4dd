//! Application services: loading, forecasting, watching, dispatch.
//!
//! The loader and forecaster are synchronous and stateless; watch workers
//! and the dispatcher run on tokio.

pub mod dispatch;
pub mod forecast;
pub mod loader;
pub mod watch;
