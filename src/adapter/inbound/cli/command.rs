//! Command-line interface definitions.
//!
//! Defines the CLI structure for the pricewatch application using `clap`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Price forecasting and price-drop alerts
#[derive(Parser, Debug)]
#[command(name = "pricewatch")]
#[command(version)]
pub struct Cli {
    /// Path to the TOML configuration file [default: config.toml if present]
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands for the pricewatch CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Forecast the next days of prices from historical data
    Forecast(ForecastArgs),

    /// Watch a live price and alert once it drops to a target
    Subscribe(SubscribeArgs),
}

/// Arguments for the `forecast` command.
#[derive(Args, Debug, Default)]
pub struct ForecastArgs {
    /// CSV file with `date` and `price` columns (overrides config)
    #[arg(long, value_name = "PATH")]
    pub data: Option<PathBuf>,

    /// Number of past observations per model input (overrides config)
    #[arg(long, value_name = "N")]
    pub lag: Option<usize>,

    /// Number of days to forecast (overrides config)
    #[arg(long, value_name = "N")]
    pub horizon: Option<usize>,

    /// Print the forecast as a JSON array
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `subscribe` command.
#[derive(Args, Debug)]
pub struct SubscribeArgs {
    /// Subscribe request body, e.g. '{"phone_number":"...","desired_price":1200}'
    #[arg(long, value_name = "JSON")]
    pub payload: String,
}
