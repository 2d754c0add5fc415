//! Derived views for a selected week
//!
//! Every function here is pure over the loaded tables. The selected week is
//! always passed in by the caller; nothing in this module stores it.

use crate::error::CoreError;
use crate::models::{Cell, StandingRow, StandingsTable, Week, WeekRow, WeekTable};
use crate::palette;
use serde::Serialize;

/// Label column of the head-to-head matrix
pub const TEAM_COLUMN: &str = "Team";

pub const CHART_TITLE: &str = "Cumulative Points by Week";

/// Rows of a table laid out for display
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TableView {
    pub columns: Vec<String>,
    /// Values aligned with `columns`
    pub rows: Vec<Vec<Cell>>,
}

impl TableView {
    pub fn from_rows(table: &WeekTable, columns: Vec<String>, rows: &[WeekRow]) -> Self {
        let rows = rows.iter().map(|r| table.project(r, &columns)).collect();
        Self { columns, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Rank rows of the selected week, in file order
pub fn ranks_for_week(table: &WeekTable, week: Week) -> Vec<WeekRow> {
    rows_for_week(table, week)
}

/// Matrix rows of the selected week, in file order
pub fn matrix_for_week(table: &WeekTable, week: Week) -> Vec<WeekRow> {
    rows_for_week(table, week)
}

fn rows_for_week(table: &WeekTable, week: Week) -> Vec<WeekRow> {
    table
        .rows()
        .iter()
        .filter(|r| r.week == week)
        .cloned()
        .collect()
}

/// Matrix columns for a filtered row set: `Team`, then each row's team label
pub fn matrix_columns_for(table: &WeekTable, rows: &[WeekRow]) -> Result<Vec<String>, CoreError> {
    let mut columns = Vec::with_capacity(rows.len() + 1);
    columns.push(TEAM_COLUMN.to_string());

    for (idx, row) in rows.iter().enumerate() {
        match table.cell(row, TEAM_COLUMN) {
            Some(cell) if !cell.is_empty() => columns.push(cell.to_string()),
            _ => {
                return Err(CoreError::MissingTeam {
                    week: row.week,
                    row: idx,
                })
            }
        }
    }
    Ok(columns)
}

/// Head-to-head matrix for one week
///
/// Columns are always derived from the rows selected in the same call, so
/// they can never lag behind a week change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatrixView {
    pub week: Week,
    pub columns: Vec<String>,
    pub rows: Vec<WeekRow>,
}

impl MatrixView {
    pub fn derive(table: &WeekTable, week: Week) -> Result<Self, CoreError> {
        let rows = matrix_for_week(table, week);
        let columns = matrix_columns_for(table, &rows)?;
        Ok(Self {
            week,
            columns,
            rows,
        })
    }

    /// Row values aligned with the derived columns
    pub fn to_table_view(&self, table: &WeekTable) -> TableView {
        TableView::from_rows(table, self.columns.clone(), &self.rows)
    }
}

/// Standings of the selected week, highest points first
///
/// Ties keep their file order.
pub fn league_for_week(standings: &StandingsTable, week: Week) -> Vec<StandingRow> {
    let mut rows: Vec<StandingRow> = standings
        .rows()
        .iter()
        .filter(|r| r.week == week)
        .cloned()
        .collect();
    rows.sort_by(|a, b| b.points.total_cmp(&a.points));
    rows
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChartPoint {
    pub week: Week,
    pub points: f64,
}

/// One line of the chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub team: String,
    pub color: String,
    pub points: Vec<ChartPoint>,
}

/// Cumulative points line chart, one series per team
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub legend_title: String,
    pub series: Vec<ChartSeries>,
}

impl Chart {
    pub fn is_empty(&self) -> bool {
        self.series.iter().all(|s| s.points.is_empty())
    }

    /// Smallest and largest week plotted
    pub fn week_range(&self) -> Option<(Week, Week)> {
        let weeks = self.series.iter().flat_map(|s| s.points.iter().map(|p| p.week));
        weeks.fold(None, |acc: Option<(Week, Week)>, w| match acc {
            None => Some((w, w)),
            Some((lo, hi)) => Some((lo.min(w), hi.max(w))),
        })
    }

    /// Smallest and largest points value plotted
    pub fn points_range(&self) -> Option<(f64, f64)> {
        let values = self
            .series
            .iter()
            .flat_map(|s| s.points.iter().map(|p| p.points));
        values.fold(None, |acc: Option<(f64, f64)>, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }
}

/// Cumulative points of every team for all weeks up to and including `week`
pub fn chart_for_week(standings: &StandingsTable, week: Week) -> Chart {
    let mut series: Vec<ChartSeries> = Vec::new();

    for row in standings.rows().iter().filter(|r| r.week <= week) {
        let point = ChartPoint {
            week: row.week,
            points: row.points,
        };
        match series.iter_mut().find(|s| s.team == row.team) {
            Some(existing) => existing.points.push(point),
            None => {
                let color = palette::series_color(series.len()).to_string();
                series.push(ChartSeries {
                    team: row.team.clone(),
                    color,
                    points: vec![point],
                });
            }
        }
    }

    for s in &mut series {
        s.points.sort_by_key(|p| p.week);
    }

    Chart {
        title: CHART_TITLE.to_string(),
        x_label: "week".to_string(),
        y_label: "Points".to_string(),
        legend_title: TEAM_COLUMN.to_string(),
        series,
    }
}

/// Weeks offered by the selector, in order of first appearance
pub fn available_weeks(table: &WeekTable) -> Vec<Week> {
    table.weeks()
}

/// Initial selection: the latest week, capped at `cap`
pub fn default_week(table: &WeekTable, cap: Week) -> Option<Week> {
    table.max_week().map(|max| max.min(cap))
}

/// Everything the dashboard shows for one selected week
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub week: Week,
    pub ranks: TableView,
    pub chart: Chart,
    pub league: Vec<StandingRow>,
    pub matrix: TableView,
}
