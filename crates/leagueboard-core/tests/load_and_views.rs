//! End-to-end: CSV exports on disk -> DataStore -> per-week views

use leagueboard_core::{Cell, CoreError, DashboardConfig, DataStore};
use std::path::Path;
use tempfile::TempDir;

const RANKS: &str = "\
week,team_name,goals_rank,points_rank
1,Lions,1,2
1,Bears,2,1
1,Wolves,3,3
2,Lions,2,1
2,Bears,1,3
2,Wolves,3,2
3,Lions,1,1
3,Bears,3,2
3,Wolves,2,3
";

const STANDINGS: &str = "\
week,team_name,cum_points
1,Lions,3
1,Bears,3
1,Wolves,0
2,Lions,6
2,Bears,3
2,Wolves,3
3,Lions,7
3,Bears,6
3,Wolves,4
";

const MATRIX: &str = "\
week,Team,Lions,Bears,Wolves
1,Bears,1,,0
1,Lions,,1,3
1,Wolves,3,0,
2,Wolves,0,3,
2,Lions,,3,3
2,Bears,0,,0
3,Lions,,1,3
3,Bears,1,,3
3,Wolves,0,0,
";

fn write_exports(dir: &Path) {
    std::fs::write(dir.join("df_ranks.csv"), RANKS).unwrap();
    std::fs::write(dir.join("df_cum_standings.csv"), STANDINGS).unwrap();
    std::fs::write(dir.join("df_matrices.csv"), MATRIX).unwrap();
}

fn config_for(dir: &Path) -> DashboardConfig {
    DashboardConfig {
        data_dir: dir.to_path_buf(),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_load_all_exports() {
    let dir = TempDir::new().unwrap();
    write_exports(dir.path());

    let (store, report) = DataStore::load(config_for(dir.path())).await.unwrap();

    assert_eq!(report.rank_rows, 9);
    assert_eq!(report.standing_rows, 9);
    assert_eq!(report.matrix_rows, 9);
    assert!(report.errors.is_empty());
    assert_eq!(store.available_weeks(), vec![1, 2, 3]);
    assert_eq!(store.default_week(), Some(3));
}

#[tokio::test]
async fn test_selecting_week_two_ignores_other_weeks() {
    let dir = TempDir::new().unwrap();
    write_exports(dir.path());
    let (store, _) = DataStore::load(config_for(dir.path())).await.unwrap();

    let view = store.dashboard(2).unwrap();

    assert_eq!(view.week, 2);
    assert_eq!(view.ranks.rows.len(), 3);
    assert!(store.ranks_for_week(2).iter().all(|r| r.week == 2));
    assert_eq!(view.matrix.columns, vec!["Team", "Wolves", "Lions", "Bears"]);

    let league: Vec<(&str, f64)> = view
        .league
        .iter()
        .map(|r| (r.team.as_str(), r.points))
        .collect();
    assert_eq!(league, vec![("Lions", 6.0), ("Bears", 3.0), ("Wolves", 3.0)]);

    assert_eq!(view.chart.week_range(), Some((1, 2)));
}

#[tokio::test]
async fn test_bucket_rules_ignore_selected_week() {
    let dir = TempDir::new().unwrap();
    write_exports(dir.path());
    let (store, _) = DataStore::load(config_for(dir.path())).await.unwrap();

    let classification = store.classification();
    assert_eq!(classification.min, 1.0);
    assert_eq!(classification.max, 3.0);
    assert_eq!(classification.columns(), vec!["goals_rank", "points_rank"]);
    assert_eq!(classification.rules.len(), 14);
}

#[tokio::test]
async fn test_missing_export_is_fatal() {
    let dir = TempDir::new().unwrap();
    write_exports(dir.path());
    std::fs::remove_file(dir.path().join("df_matrices.csv")).unwrap();

    let result = DataStore::load(config_for(dir.path())).await;
    assert!(matches!(result, Err(CoreError::FileNotFound { .. })));
}

#[tokio::test]
async fn test_renamed_standings_columns_via_config() {
    let dir = TempDir::new().unwrap();
    write_exports(dir.path());
    std::fs::write(
        dir.path().join("df_cum_standings.csv"),
        STANDINGS
            .replace("team_name", "club")
            .replace("cum_points", "total"),
    )
    .unwrap();

    let config = DashboardConfig {
        standings_team_column: "club".to_string(),
        standings_points_column: "total".to_string(),
        ..config_for(dir.path())
    };
    let (store, _) = DataStore::load(config).await.unwrap();
    assert_eq!(store.league_for_week(3)[0].team, "Lions");
}

#[tokio::test]
async fn test_numeric_looking_team_names_survive_load() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("df_ranks.csv"),
        "week,team_name,x_rank\n1,007,1\n1,Nan,2\n2,007,inf\n",
    )
    .unwrap();
    std::fs::write(
        dir.path().join("df_cum_standings.csv"),
        "week,team_name,cum_points\n1,007,3\n1,Nan,0\n",
    )
    .unwrap();
    std::fs::write(
        dir.path().join("df_matrices.csv"),
        "week,Team,007,Nan\n1,007,,3\n1,Nan,0,\n",
    )
    .unwrap();

    let (store, report) = DataStore::load(config_for(dir.path())).await.unwrap();
    assert!(report.errors.is_empty());

    let view = store.dashboard(1).unwrap();
    assert_eq!(view.matrix.columns, vec!["Team", "007", "Nan"]);
    assert_eq!(
        view.matrix.rows[0],
        vec![Cell::Text("007".into()), Cell::Empty, Cell::Number(3.0)]
    );
    assert_eq!(view.ranks.rows[1][0], Cell::Text("Nan".into()));

    // `inf` is not a rank; bounds come from the finite values only
    let classification = store.classification();
    assert_eq!((classification.min, classification.max), (1.0, 2.0));
    assert!(classification.rules.iter().all(|r| r.lower.is_finite()));
    assert!(classification.style_for("x_rank", 2.0).is_some());
}
