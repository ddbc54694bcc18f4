use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::NaiveDate;

use crate::error::Error;

pub const REPORT_PREFIX: &str = "aave-dead-liquidity";

pub fn report_file_name(token_symbol: &str, date: Option<NaiveDate>) -> String {
    let symbol = token_symbol.to_lowercase();
    match date {
        Some(date) => format!(
            "{}-{}-{}.csv",
            REPORT_PREFIX,
            symbol,
            date.format("%Y-%m-%d")
        ),
        None => format!("{}-{}.csv", REPORT_PREFIX, symbol),
    }
}

/// Writes `csv` to `directory/file_name`, replacing any previous report.
pub fn write_report(
    directory: &Path,
    file_name: &str,
    csv: &str,
) -> Result<PathBuf, Error> {
    fs::create_dir_all(directory)?;
    let path = directory.join(file_name);
    fs::write(&path, csv)?;
    Ok(path)
}
