use std::io::Write;

use tempfile::{Builder, NamedTempFile};

/// Write `contents` to a temporary file ending in `suffix`.
pub fn temp_file(suffix: &str, contents: &str) -> NamedTempFile {
    let mut file = Builder::new()
        .prefix("pricewatch-test-")
        .suffix(suffix)
        .tempfile()
        .expect("create temp file");
    file.write_all(contents.as_bytes()).expect("write temp file");
    file.flush().expect("flush temp file");
    file
}

pub fn temp_csv(contents: &str) -> NamedTempFile {
    temp_file(".csv", contents)
}

pub fn temp_config(contents: &str) -> NamedTempFile {
    temp_file(".toml", contents)
}

/// CSV with `days` consecutive daily rows starting 2025-01-01 and a rising,
/// slightly uneven price.
pub fn rising_csv(days: u32) -> String {
    let mut csv = String::from("date,price\n");
    for day in 0..days {
        let date = chrono::NaiveDate::from_ymd_opt(2025, 1, 1)
            .expect("valid date")
            .checked_add_days(chrono::Days::new(u64::from(day)))
            .expect("date in range");
        let price = 1400 + day * 5 + (day * day) % 7;
        csv.push_str(&format!("{},{price}\n", date.format("%Y-%m-%d")));
    }
    csv
}
