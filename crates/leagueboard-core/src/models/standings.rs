//! Cumulative standings (points accumulated per team up to each week)

use super::Week;
use serde::Serialize;

/// Cumulative points of one team after one week
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StandingRow {
    pub week: Week,
    pub team: String,
    pub points: f64,
}

/// All cumulative standings, in file order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StandingsTable {
    rows: Vec<StandingRow>,
}

impl StandingsTable {
    pub fn new(rows: Vec<StandingRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[StandingRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Teams whose cumulative points go down between two consecutive entries
    ///
    /// Returns `(team, week, previous points, points)` per offending entry.
    pub fn decreasing_points(&self) -> Vec<(String, Week, f64, f64)> {
        let mut teams: Vec<&str> = Vec::new();
        for row in &self.rows {
            if !teams.contains(&row.team.as_str()) {
                teams.push(&row.team);
            }
        }

        let mut offenders = Vec::new();
        for team in teams {
            let mut history: Vec<&StandingRow> =
                self.rows.iter().filter(|r| r.team == team).collect();
            history.sort_by_key(|r| r.week);
            for pair in history.windows(2) {
                if pair[1].points < pair[0].points {
                    offenders.push((
                        team.to_string(),
                        pair[1].week,
                        pair[0].points,
                        pair[1].points,
                    ));
                }
            }
        }
        offenders
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(week: Week, team: &str, points: f64) -> StandingRow {
        StandingRow {
            week,
            team: team.to_string(),
            points,
        }
    }

    #[test]
    fn test_monotonic_standings_have_no_offenders() {
        let table = StandingsTable::new(vec![
            row(1, "Lions", 3.0),
            row(1, "Bears", 0.0),
            row(2, "Lions", 3.0),
            row(2, "Bears", 3.0),
        ]);
        assert!(table.decreasing_points().is_empty());
    }

    #[test]
    fn test_decreasing_points_detected_regardless_of_row_order() {
        let table = StandingsTable::new(vec![
            row(3, "Lions", 4.0),
            row(1, "Lions", 3.0),
            row(2, "Lions", 6.0),
        ]);
        let offenders = table.decreasing_points();
        assert_eq!(offenders, vec![("Lions".to_string(), 3, 6.0, 4.0)]);
    }
}
