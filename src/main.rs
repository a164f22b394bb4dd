use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use pricewatch::adapter::inbound::cli::command::{Cli, Commands};
use pricewatch::adapter::inbound::cli::{forecast, subscribe};
use pricewatch::infrastructure::config::settings::Config;
use tracing::{error, info};

const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    config.init_logging();
    info!("pricewatch starting");

    let result = match &cli.command {
        Commands::Forecast(args) => forecast::execute(&config, args),
        Commands::Subscribe(args) => subscribe::execute(&config, args).await,
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            error!(error = %e, "Fatal error");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Load the explicit config file, or `config.toml` when it exists, or the
/// built-in defaults.
fn load_config(explicit: Option<&Path>) -> anyhow::Result<Config> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let default = PathBuf::from(DEFAULT_CONFIG_PATH);
            if !default.exists() {
                return Ok(Config::default());
            }
            default
        }
    };

    Config::load(&path).with_context(|| format!("reading {}", path.display()))
}
