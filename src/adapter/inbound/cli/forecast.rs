//! Handler for the `forecast` command.

use std::process::ExitCode;

use serde_json::json;
use tabled::{Table, Tabled};

use crate::adapter::inbound::cli::command::ForecastArgs;
use crate::domain::{ForecastResult, FORECAST_DATE_FORMAT};
use crate::error::{Error, ForecastError, Result};
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::factory::service::{build_forecast_service, ForecastOverrides};

/// Exit code for requests the data cannot satisfy.
pub const EXIT_CLIENT_ERROR: u8 = 2;

/// Message reported when the series is too short for the lag window.
pub const NOT_ENOUGH_DATA: &str = "Not enough data to forecast";

#[derive(Tabled)]
struct ForecastRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Price")]
    price: String,
}

/// Execute the forecast command.
///
/// Client errors (too little data, bad parameters, malformed CSV) are
/// reported on the output and mapped to exit code 2.
///
/// # Errors
///
/// Returns an error if the data file cannot be read or the model is
/// numerically unstable.
#[allow(clippy::result_large_err)]
pub fn execute(config: &Config, args: &ForecastArgs) -> Result<ExitCode> {
    let overrides = ForecastOverrides {
        data_path: args.data.clone(),
        lag_window: args.lag,
        horizon: args.horizon,
    };

    let outcome = build_forecast_service(config, overrides)
        .and_then(|service| service.forecast_next_week().map_err(Error::from));

    match outcome {
        Ok(result) => {
            if args.json {
                println!("{}", serde_json::to_string(&result)?);
            } else {
                print_table(&result);
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(Error::Forecast(err)) if err.is_client_error() => {
            report_client_error(&err, args.json);
            Ok(ExitCode::from(EXIT_CLIENT_ERROR))
        }
        Err(err) => Err(err),
    }
}

fn print_table(result: &ForecastResult) {
    let rows: Vec<ForecastRow> = result
        .points()
        .iter()
        .map(|point| ForecastRow {
            date: point.date.format(FORECAST_DATE_FORMAT).to_string(),
            price: format!("{:.2}", point.price),
        })
        .collect();
    println!("{}", Table::new(rows));
}

fn report_client_error(err: &ForecastError, json: bool) {
    let message = client_message(err);
    if json {
        println!("{}", json!({ "error": message }));
    } else {
        eprintln!("error: {message}");
    }
}

fn client_message(err: &ForecastError) -> String {
    match err {
        ForecastError::InsufficientData { .. } => NOT_ENOUGH_DATA.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_data_uses_fixed_message() {
        let err = ForecastError::InsufficientData {
            len: 3,
            lag_window: 7,
        };
        assert_eq!(client_message(&err), NOT_ENOUGH_DATA);
    }

    #[test]
    fn other_client_errors_keep_their_detail() {
        let err = ForecastError::DataFormat("missing required column `price`".into());
        assert!(client_message(&err).contains("`price`"));
    }
}
