//! Parser for week-keyed tables (`df_ranks.csv`, `df_matrices.csv`)

use super::{parse_week, read_csv, require_column, WEEK_COLUMN};
use crate::error::CoreError;
use crate::models::{Cell, WeekRow, WeekTable};
use std::path::Path;
use tracing::debug;

/// Loads a CSV with a `week` column into a [`WeekTable`]
///
/// The `week` column is lifted out of the row values; every other column is
/// kept in file order and typed per cell. Label columns stay text.
#[derive(Debug, Default)]
pub struct WeekTableParser {
    /// Columns that must exist besides `week`
    required: Vec<String>,
    /// Columns holding names, never typed as numbers
    labels: Vec<String>,
}

impl WeekTableParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn require(mut self, column: impl Into<String>) -> Self {
        self.required.push(column.into());
        self
    }

    /// Keep `column` verbatim, if present
    pub fn label(mut self, column: impl Into<String>) -> Self {
        self.labels.push(column.into());
        self
    }

    pub async fn parse(&self, path: &Path) -> Result<WeekTable, CoreError> {
        let (headers, records) = read_csv(path).await?;

        let week_idx = require_column(&headers, WEEK_COLUMN, path)?;
        for column in &self.required {
            require_column(&headers, column, path)?;
        }

        // pandas index columns come out unnamed; drop them
        let kept: Vec<usize> = headers
            .iter()
            .enumerate()
            .filter(|(i, h)| *i != week_idx && !h.is_empty() && !h.starts_with("Unnamed:"))
            .map(|(i, _)| i)
            .collect();
        let columns = kept.iter().map(|&i| headers[i].to_string()).collect();
        let is_label: Vec<bool> = kept
            .iter()
            .map(|&i| self.labels.iter().any(|l| l.as_str() == &headers[i]))
            .collect();

        let mut rows = Vec::with_capacity(records.len());
        for record in &records {
            let week = parse_week(record.get(week_idx).unwrap_or(""), record, path)?;
            let cells = kept
                .iter()
                .zip(&is_label)
                .map(|(&i, &label)| {
                    let raw = record.get(i).unwrap_or("");
                    if label {
                        Cell::label(raw)
                    } else {
                        Cell::parse(raw)
                    }
                })
                .collect();
            rows.push(WeekRow { week, cells });
        }

        debug!(path = %path.display(), rows = rows.len(), "Week table parsed");
        Ok(WeekTable::new(columns, rows))
    }
}
