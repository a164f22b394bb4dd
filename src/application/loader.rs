//! CSV price history loader.
//!
//! Reads a table with at least `date` and `price` columns and produces a
//! cleaned [`PriceSeries`]: unparseable or invalid prices drop their row,
//! rows are sorted by date, and each retained row gets a sequential index.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use tracing::debug;

use crate::domain::{is_valid_price, PriceSeries};
use crate::error::ForecastError;

const DATE_COLUMN: &str = "date";
const PRICE_COLUMN: &str = "price";

/// Date-only layouts accepted in the `date` column, tried in order.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d %b %Y", "%d-%b-%Y"];

/// Date-time layouts accepted in the `date` column; the time part is ignored.
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];

/// Load a price series from a CSV file.
///
/// # Errors
///
/// Returns [`ForecastError::Read`] if the file cannot be opened and
/// [`ForecastError::DataFormat`] if the table is malformed.
pub fn load_path(path: impl AsRef<Path>) -> Result<PriceSeries, ForecastError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(ForecastError::Read)?;
    debug!(path = %path.display(), "Loading price history");
    load_reader(file)
}

/// Load a price series from any CSV reader.
///
/// # Errors
///
/// Returns [`ForecastError::DataFormat`] if a required column is missing, a
/// date cannot be parsed, or the CSV itself is malformed.
pub fn load_reader<R: Read>(reader: R) -> Result<PriceSeries, ForecastError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers().map_err(csv_error)?.clone();
    let date_col = column_index(&headers, DATE_COLUMN)?;
    let price_col = column_index(&headers, PRICE_COLUMN)?;

    let mut observations = Vec::new();
    let mut total = 0usize;

    for (row, record) in reader.records().enumerate() {
        let record = record.map_err(csv_error)?;
        total += 1;

        let raw_date = record.get(date_col).unwrap_or_default();
        let date = parse_date(raw_date).ok_or_else(|| {
            // Header is line 1, so data row `row` sits on line `row + 2`.
            ForecastError::DataFormat(format!(
                "unparseable date {raw_date:?} on line {}",
                row + 2
            ))
        })?;

        if let Some(price) = record.get(price_col).and_then(parse_price) {
            observations.push((date, price));
        }
    }

    let series = PriceSeries::from_observations(observations);
    debug!(
        rows = total,
        kept = series.len(),
        dropped = total - series.len(),
        "Price history cleaned"
    );
    Ok(series)
}

fn column_index(headers: &csv::StringRecord, name: &'static str) -> Result<usize, ForecastError> {
    headers
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case(name))
        .ok_or_else(|| ForecastError::DataFormat(format!("missing required column `{name}`")))
}

fn csv_error(err: csv::Error) -> ForecastError {
    ForecastError::DataFormat(err.to_string())
}

/// Parse a calendar date from the supported layouts.
pub(crate) fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

/// Coerce a price cell to a number; anything unusable counts as missing.
fn parse_price(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|price| is_valid_price(*price))
}
