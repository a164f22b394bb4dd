//! Infrastructure configuration modules.

pub mod dispatch;
pub mod forecast;
pub mod logging;
pub mod price;
pub mod settings;
pub mod telegram;
pub mod watch;
