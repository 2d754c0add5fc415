//! Parsers for the league CSV exports

pub mod standings;
pub mod week_table;

pub use standings::StandingsParser;
pub use week_table::WeekTableParser;

use crate::error::CoreError;
use crate::models::Week;
use csv::{ReaderBuilder, StringRecord};
use std::path::Path;

/// Name of the key column shared by every export
pub const WEEK_COLUMN: &str = "week";

/// Read a whole CSV file into its header and records
pub(crate) async fn read_csv(path: &Path) -> Result<(StringRecord, Vec<StringRecord>), CoreError> {
    let content = tokio::fs::read_to_string(path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            CoreError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            CoreError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;

    let csv_error = |e: csv::Error| CoreError::CsvParse {
        path: path.to_path_buf(),
        message: e.to_string(),
        source: e,
    };

    let mut reader = ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());
    let headers = reader.headers().map_err(csv_error)?.clone();
    let records = reader
        .records()
        .collect::<Result<Vec<_>, _>>()
        .map_err(csv_error)?;

    Ok((headers, records))
}

/// Position of a required header column
pub(crate) fn require_column(
    headers: &StringRecord,
    name: &str,
    path: &Path,
) -> Result<usize, CoreError> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| CoreError::MissingColumn {
            path: path.to_path_buf(),
            column: name.to_string(),
        })
}

/// 1-based line of a record, for error messages
pub(crate) fn line_of(record: &StringRecord) -> u64 {
    record.position().map(|p| p.line()).unwrap_or(0)
}

/// Parse a week value; pandas sometimes writes integral floats (`3.0`)
pub(crate) fn parse_week(raw: &str, record: &StringRecord, path: &Path) -> Result<Week, CoreError> {
    let invalid = || CoreError::InvalidValue {
        path: path.to_path_buf(),
        line: line_of(record),
        column: WEEK_COLUMN.to_string(),
        value: raw.to_string(),
    };

    if let Ok(week) = raw.parse::<Week>() {
        return Ok(week);
    }
    match raw.parse::<f64>() {
        Ok(value) if value.fract() == 0.0 && value >= 0.0 && value <= Week::MAX as f64 => {
            Ok(value as Week)
        }
        _ => Err(invalid()),
    }
}
