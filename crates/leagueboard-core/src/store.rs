//! Loaded dashboard data
//!
//! The three tables and the rank color buckets are read once at startup and
//! never change afterwards, so the store can be shared as `Arc<DataStore>`
//! without any locking.

use crate::classifier::{classify, Classification};
use crate::config::DashboardConfig;
use crate::error::{CoreError, LoadError, LoadReport};
use crate::models::{StandingRow, StandingsTable, Week, WeekRow, WeekTable};
use crate::parsers::{StandingsParser, WeekTableParser};
use crate::views::{self, Chart, DashboardView, MatrixView, TableView, TEAM_COLUMN};
use tracing::{debug, info};

pub struct DataStore {
    config: DashboardConfig,
    ranks: WeekTable,
    standings: StandingsTable,
    matrix: WeekTable,
    /// Bucket rules computed from the full, unfiltered rank table
    classification: Classification,
}

impl DataStore {
    /// Read all three exports and classify the rank columns
    pub async fn load(config: DashboardConfig) -> Result<(Self, LoadReport), CoreError> {
        config.validate()?;
        info!(data_dir = %config.data_dir.display(), "Loading league tables");

        let ranks_path = config.ranks_path();
        let standings_path = config.standings_path();
        let matrix_path = config.matrix_path();

        let ranks_parser = WeekTableParser::new().label(config.ranks_team_column.clone());
        let standings_parser = StandingsParser::new().with_columns(
            config.standings_team_column.clone(),
            config.standings_points_column.clone(),
        );
        let matrix_parser = WeekTableParser::new()
            .require(TEAM_COLUMN)
            .label(TEAM_COLUMN);

        let (ranks, standings, matrix) = tokio::try_join!(
            ranks_parser.parse(&ranks_path),
            standings_parser.parse(&standings_path),
            matrix_parser.parse(&matrix_path),
        )?;

        Self::from_tables(config, ranks, standings, matrix)
    }

    /// Build a store from tables that are already in memory
    pub fn from_tables(
        config: DashboardConfig,
        ranks: WeekTable,
        standings: StandingsTable,
        matrix: WeekTable,
    ) -> Result<(Self, LoadReport), CoreError> {
        let mut report = LoadReport::new();
        report.rank_rows = ranks.len();
        report.standing_rows = standings.len();
        report.matrix_rows = matrix.len();

        let rank_columns = ranks.columns_containing(&config.rank_column_marker);
        let classification = classify(&ranks, &rank_columns, config.bin_count)?;
        if classification.degenerate {
            report.add_warning(
                "ranks",
                format!(
                    "All rank values equal {}; every cell uses the top bucket color",
                    classification.min
                ),
            );
        }

        for (team, week, before, after) in standings.decreasing_points() {
            report.add_warning(
                "standings",
                format!(
                    "Cumulative points for {} drop from {} to {} in week {}",
                    team, before, after, week
                ),
            );
        }

        for team in unmatched_matrix_teams(&matrix) {
            report.add_error(
                LoadError::error(
                    "matrix",
                    format!("Team '{}' has no column in the matrix header", team),
                )
                .with_suggestion("Its head-to-head cells will show as empty"),
            );
        }

        info!(
            rank_rows = report.rank_rows,
            standing_rows = report.standing_rows,
            matrix_rows = report.matrix_rows,
            rank_columns = rank_columns.len(),
            warnings = report.errors.len(),
            "League tables loaded"
        );

        let store = Self {
            config,
            ranks,
            standings,
            matrix,
            classification,
        };
        Ok((store, report))
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn ranks(&self) -> &WeekTable {
        &self.ranks
    }

    pub fn standings(&self) -> &StandingsTable {
        &self.standings
    }

    pub fn matrix(&self) -> &WeekTable {
        &self.matrix
    }

    pub fn classification(&self) -> &Classification {
        &self.classification
    }

    /// Weeks offered by the selector
    pub fn available_weeks(&self) -> Vec<Week> {
        views::available_weeks(&self.ranks)
    }

    /// Initial selection, `min(latest week, cap)`
    pub fn default_week(&self) -> Option<Week> {
        views::default_week(&self.ranks, self.config.default_week_cap)
    }

    /// The requested week, or the default when none was given
    pub fn resolve_week(&self, requested: Option<Week>) -> Option<Week> {
        requested.or_else(|| self.default_week())
    }

    pub fn ranks_for_week(&self, week: Week) -> Vec<WeekRow> {
        views::ranks_for_week(&self.ranks, week)
    }

    /// Ranks for the week laid out over every column except `week`
    pub fn ranks_view(&self, week: Week) -> TableView {
        let rows = self.ranks_for_week(week);
        TableView::from_rows(&self.ranks, self.ranks.columns().to_vec(), &rows)
    }

    pub fn matrix_view(&self, week: Week) -> Result<MatrixView, CoreError> {
        MatrixView::derive(&self.matrix, week)
    }

    pub fn league_for_week(&self, week: Week) -> Vec<StandingRow> {
        views::league_for_week(&self.standings, week)
    }

    pub fn chart_for_week(&self, week: Week) -> Chart {
        views::chart_for_week(&self.standings, week)
    }

    /// Every derived view for one selection
    pub fn dashboard(&self, week: Week) -> Result<DashboardView, CoreError> {
        debug!(week, "Deriving dashboard views");
        let ranks = self.ranks_view(week);
        let chart = self.chart_for_week(week);
        let league = self.league_for_week(week);
        let matrix = self.matrix_view(week)?.to_table_view(&self.matrix);

        Ok(DashboardView {
            week,
            ranks,
            chart,
            league,
            matrix,
        })
    }
}

/// Team labels in the matrix that never appear as a column
fn unmatched_matrix_teams(matrix: &WeekTable) -> Vec<String> {
    let mut unmatched: Vec<String> = Vec::new();
    for row in matrix.rows() {
        let Some(cell) = matrix.cell(row, TEAM_COLUMN) else {
            continue;
        };
        if cell.is_empty() {
            continue;
        }
        let team = cell.to_string();
        if matrix.column_index(&team).is_none() && !unmatched.contains(&team) {
            unmatched.push(team);
        }
    }
    unmatched
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Cell;

    fn ranks() -> WeekTable {
        let row = |week, team: &str, rank: f64| WeekRow {
            week,
            cells: vec![Cell::Text(team.into()), Cell::Number(rank)],
        };
        WeekTable::new(
            vec!["team".into(), "points_rank".into()],
            vec![
                row(20, "Lions", 1.0),
                row(20, "Bears", 2.0),
                row(21, "Lions", 2.0),
                row(21, "Bears", 1.0),
            ],
        )
    }

    fn matrix() -> WeekTable {
        WeekTable::new(
            vec!["Team".into(), "Lions".into()],
            vec![
                WeekRow {
                    week: 20,
                    cells: vec![Cell::Text("Lions".into()), Cell::Empty],
                },
                WeekRow {
                    week: 20,
                    cells: vec![Cell::Text("Bears".into()), Cell::Number(1.0)],
                },
            ],
        )
    }

    fn standings() -> StandingsTable {
        StandingsTable::new(vec![
            StandingRow {
                week: 20,
                team: "Lions".into(),
                points: 40.0,
            },
            StandingRow {
                week: 21,
                team: "Lions".into(),
                points: 38.0,
            },
        ])
    }

    #[test]
    fn test_from_tables_reports_suspicious_data() {
        let (store, report) =
            DataStore::from_tables(DashboardConfig::default(), ranks(), standings(), matrix())
                .unwrap();

        assert_eq!(report.total_rows(), 8);
        let warnings: Vec<&str> = report.warnings().map(|w| w.source.as_str()).collect();
        assert_eq!(warnings, vec!["standings"]);
        let problems: Vec<&str> = report.problems().map(|e| e.source.as_str()).collect();
        assert_eq!(problems, vec!["matrix"]);
        assert_eq!(store.classification().rules.len(), 7);
    }

    #[test]
    fn test_default_week_capped_at_19() {
        let (store, _) =
            DataStore::from_tables(DashboardConfig::default(), ranks(), standings(), matrix())
                .unwrap();

        assert_eq!(store.available_weeks(), vec![20, 21]);
        assert_eq!(store.default_week(), Some(19));
        assert_eq!(store.resolve_week(None), Some(19));
        assert_eq!(store.resolve_week(Some(21)), Some(21));
    }

    #[test]
    fn test_dashboard_for_week() {
        let (store, _) =
            DataStore::from_tables(DashboardConfig::default(), ranks(), standings(), matrix())
                .unwrap();

        let view = store.dashboard(20).unwrap();
        assert_eq!(view.ranks.columns, vec!["team", "points_rank"]);
        assert_eq!(view.ranks.rows.len(), 2);
        assert_eq!(view.matrix.columns, vec!["Team", "Lions", "Bears"]);
        assert_eq!(view.league.len(), 1);
        assert_eq!(view.chart.series.len(), 1);
    }

    #[test]
    fn test_ranks_without_rank_columns_is_config_error() {
        let table = WeekTable::new(
            vec!["team".into()],
            vec![WeekRow {
                week: 1,
                cells: vec![Cell::Text("Lions".into())],
            }],
        );
        let result =
            DataStore::from_tables(DashboardConfig::default(), table, standings(), matrix());
        assert!(matches!(result, Err(CoreError::InvalidConfig { .. })));
    }
}
