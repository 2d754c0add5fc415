//! Week-keyed tables (ranks and head-to-head matrices)

use super::Week;
use serde::Serialize;
use std::fmt;

/// A single table value
///
/// CSV fields are typed on load: plain decimal numbers become `Number`, blank
/// fields and missing-value markers become `Empty` and everything else stays
/// as `Text`. Label columns skip number typing entirely (see [`Cell::label`]).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Number(f64),
    Text(String),
    Empty,
}

/// Markers pandas writes for missing values
const MISSING_MARKERS: [&str; 3] = ["NaN", "nan", "NA"];

impl Cell {
    /// Type a raw CSV field from a value column
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || MISSING_MARKERS.contains(&trimmed) {
            return Cell::Empty;
        }
        match parse_decimal(trimmed) {
            Some(value) => Cell::Number(value),
            None => Cell::Text(trimmed.to_string()),
        }
    }

    /// Type a raw CSV field from a label column: kept verbatim as text
    pub fn label(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(trimmed.to_string())
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(value) => Some(*value),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Number(value) => write!(f, "{}", format_number(*value)),
            Cell::Text(text) => f.write_str(text),
            Cell::Empty => Ok(()),
        }
    }
}

/// Format a number the way the exports show it: `3` rather than `3.0`
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// Finite number in plain decimal notation (`-3`, `2.5`, `.5`, `1e-3`)
///
/// Rejects `inf`, `nan` and the other spellings `f64::from_str` accepts.
fn parse_decimal(s: &str) -> Option<f64> {
    let unsigned = s
        .strip_prefix('-')
        .or_else(|| s.strip_prefix('+'))
        .unwrap_or(s);
    let (mantissa, exponent) = match unsigned.find(|c: char| c == 'e' || c == 'E') {
        Some(idx) => (&unsigned[..idx], Some(&unsigned[idx + 1..])),
        None => (unsigned, None),
    };

    let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
    let (int, frac) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    if (int.is_empty() && frac.is_empty()) || !all_digits(int) || !all_digits(frac) {
        return None;
    }
    if let Some(exponent) = exponent {
        let digits = exponent
            .strip_prefix('-')
            .or_else(|| exponent.strip_prefix('+'))
            .unwrap_or(exponent);
        if digits.is_empty() || !all_digits(digits) {
            return None;
        }
    }

    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// One row of a week-keyed table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekRow {
    pub week: Week,
    /// Values aligned with `WeekTable::columns`
    pub cells: Vec<Cell>,
}

/// Table with a `week` key column lifted out of the regular columns
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WeekTable {
    columns: Vec<String>,
    rows: Vec<WeekRow>,
}

impl WeekTable {
    pub fn new(columns: Vec<String>, rows: Vec<WeekRow>) -> Self {
        Self { columns, rows }
    }

    /// Display columns, without `week`
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[WeekRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Look up a row's value by column name
    pub fn cell<'a>(&self, row: &'a WeekRow, column: &str) -> Option<&'a Cell> {
        self.column_index(column).and_then(|idx| row.cells.get(idx))
    }

    /// Columns whose name contains `marker` (e.g. `_rank`)
    pub fn columns_containing(&self, marker: &str) -> Vec<String> {
        self.columns
            .iter()
            .filter(|c| c.contains(marker))
            .cloned()
            .collect()
    }

    /// Distinct weeks in order of first appearance
    pub fn weeks(&self) -> Vec<Week> {
        let mut weeks: Vec<Week> = Vec::new();
        for row in &self.rows {
            if !weeks.contains(&row.week) {
                weeks.push(row.week);
            }
        }
        weeks
    }

    pub fn max_week(&self) -> Option<Week> {
        self.rows.iter().map(|r| r.week).max()
    }

    /// Reorder a row's values to match `columns`; unknown columns yield `Empty`
    pub fn project(&self, row: &WeekRow, columns: &[String]) -> Vec<Cell> {
        columns
            .iter()
            .map(|c| self.cell(row, c).cloned().unwrap_or(Cell::Empty))
            .collect()
    }
}
