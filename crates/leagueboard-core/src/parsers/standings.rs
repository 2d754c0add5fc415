//! Parser for cumulative standings (`df_cum_standings.csv`)

use super::{line_of, parse_week, read_csv, require_column, WEEK_COLUMN};
use crate::error::CoreError;
use crate::models::{StandingRow, StandingsTable};
use std::path::Path;
use tracing::debug;

/// Loads `(week, team, cumulative points)` triples
#[derive(Debug)]
pub struct StandingsParser {
    team_column: String,
    points_column: String,
}

impl Default for StandingsParser {
    fn default() -> Self {
        Self {
            team_column: "team_name".to_string(),
            points_column: "cum_points".to_string(),
        }
    }
}

impl StandingsParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_columns(mut self, team: impl Into<String>, points: impl Into<String>) -> Self {
        self.team_column = team.into();
        self.points_column = points.into();
        self
    }

    pub async fn parse(&self, path: &Path) -> Result<StandingsTable, CoreError> {
        let (headers, records) = read_csv(path).await?;

        let week_idx = require_column(&headers, WEEK_COLUMN, path)?;
        let team_idx = require_column(&headers, &self.team_column, path)?;
        let points_idx = require_column(&headers, &self.points_column, path)?;

        let mut rows = Vec::with_capacity(records.len());
        for record in &records {
            let week = parse_week(record.get(week_idx).unwrap_or(""), record, path)?;
            let team = record.get(team_idx).unwrap_or("").to_string();
            if team.is_empty() {
                return Err(CoreError::InvalidValue {
                    path: path.to_path_buf(),
                    line: line_of(record),
                    column: self.team_column.clone(),
                    value: team,
                });
            }

            let raw_points = record.get(points_idx).unwrap_or("");
            let points = raw_points
                .parse::<f64>()
                .ok()
                .filter(|p| p.is_finite())
                .ok_or_else(|| CoreError::InvalidValue {
                    path: path.to_path_buf(),
                    line: line_of(record),
                    column: self.points_column.clone(),
                    value: raw_points.to_string(),
                })?;

            rows.push(StandingRow { week, team, points });
        }

        debug!(path = %path.display(), rows = rows.len(), "Standings parsed");
        Ok(StandingsTable::new(rows))
    }
}
