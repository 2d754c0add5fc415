//! Color-bucket classifier for numeric table columns
//!
//! Splits the global `[min, max]` of the selected columns into equal-width
//! bins and maps each bin to a background color. Rules are computed once from
//! the full table, so bucket boundaries stay put whatever week is displayed.

use crate::error::CoreError;
use crate::models::WeekTable;
use crate::palette::{self, Rgb};
use serde::Serialize;

/// Default number of buckets
pub const DEFAULT_BIN_COUNT: usize = 7;

/// Conditional cell style: `column` values in `[lower, upper)` get these colors
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyleRule {
    pub column: String,
    pub lower: f64,
    /// `None` for the last bin, which is unbounded above
    pub upper: Option<f64>,
    pub background: Rgb,
    pub color: Rgb,
}

impl StyleRule {
    pub fn matches(&self, column: &str, value: f64) -> bool {
        self.column == column
            && value >= self.lower
            && self.upper.map_or(true, |upper| value < upper)
    }

    /// The rule as a DataTable-style filter query, e.g. `{a_rank} >= 1 && {a_rank} < 2`
    pub fn filter_query(&self) -> String {
        let mut query = format!("{{{}}} >= {}", self.column, self.lower);
        if let Some(upper) = self.upper {
            query.push_str(&format!(" && {{{}}} < {}", self.column, upper));
        }
        query
    }
}

/// One legend swatch: bucket color and its lower bound
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    /// Lower bound rounded to two decimals
    pub lower: f64,
    pub color: Rgb,
}

/// Output of [`classify`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    /// Ordered rules, bins ascending, columns in the requested order per bin
    pub rules: Vec<StyleRule>,
    pub legend: Vec<LegendEntry>,
    pub min: f64,
    pub max: f64,
    pub bin_count: usize,
    /// `min == max`: every bin collapsed onto a single value
    pub degenerate: bool,
}

impl Classification {
    /// Style for a cell, last matching rule wins
    pub fn style_for(&self, column: &str, value: f64) -> Option<&StyleRule> {
        self.rules.iter().rev().find(|r| r.matches(column, value))
    }

    /// Columns the rules apply to, in rule order
    pub fn columns(&self) -> Vec<&str> {
        let mut columns: Vec<&str> = Vec::new();
        for rule in &self.rules {
            if !columns.contains(&rule.column.as_str()) {
                columns.push(&rule.column);
            }
        }
        columns
    }
}

/// Build bucket style rules and a legend for `columns` of `table`
pub fn classify(
    table: &WeekTable,
    columns: &[String],
    bin_count: usize,
) -> Result<Classification, CoreError> {
    if columns.is_empty() {
        return Err(CoreError::InvalidConfig {
            message: "no columns selected for color bucketing".to_string(),
        });
    }
    let scale = palette::rd_yl_gn(bin_count + 4).ok_or_else(|| CoreError::InvalidConfig {
        message: format!(
            "bin count {} unsupported (expected {}..={})",
            bin_count,
            palette::MIN_BINS,
            palette::MAX_BINS
        ),
    })?;

    let mut indices = Vec::with_capacity(columns.len());
    for column in columns {
        let idx = table
            .column_index(column)
            .ok_or_else(|| CoreError::InvalidConfig {
                message: format!("column '{}' not present in table", column),
            })?;
        indices.push(idx);
    }

    let (min, max) = table
        .rows()
        .iter()
        .flat_map(|row| indices.iter().filter_map(|&i| row.cells.get(i)))
        .filter_map(|cell| cell.as_number())
        .fold(None, |acc: Option<(f64, f64)>, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
        .ok_or_else(|| CoreError::InvalidConfig {
            message: format!("columns {:?} contain no numeric values", columns),
        })?;

    let step = 1.0 / bin_count as f64;
    let ranges: Vec<f64> = (0..=bin_count)
        .map(|i| (max - min) * (i as f64 * step) + min)
        .collect();

    let mut rules = Vec::with_capacity(bin_count * columns.len());
    let mut legend = Vec::with_capacity(bin_count);
    for i in 1..=bin_count {
        let lower = ranges[i - 1];
        let upper = (i < bin_count).then_some(ranges[i]);
        let background = scale[i + 1];

        for column in columns {
            rules.push(StyleRule {
                column: column.clone(),
                lower,
                upper,
                background,
                color: Rgb::BLACK,
            });
        }
        legend.push(LegendEntry {
            lower: round2(lower),
            color: background,
        });
    }

    let degenerate = min == max;
    if degenerate {
        tracing::warn!(value = min, "All bucketed values are equal, every cell gets the top bucket");
    }

    Ok(Classification {
        rules,
        legend,
        min,
        max,
        bin_count,
        degenerate,
    })
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
