//! Router integration tests

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use leagueboard_core::{
    Cell, DashboardConfig, DataStore, StandingRow, StandingsTable, WeekRow, WeekTable,
};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

fn store() -> Arc<DataStore> {
    let rank = |week, team: &str, rank: f64| WeekRow {
        week,
        cells: vec![Cell::Text(team.into()), Cell::Number(rank)],
    };
    let ranks = WeekTable::new(
        vec!["team_name".into(), "points_rank".into()],
        vec![
            rank(1, "Lions", 1.0),
            rank(1, "Bears", 2.0),
            rank(2, "Lions", 2.0),
            rank(2, "Bears", 1.0),
        ],
    );

    let standing = |week, team: &str, points| StandingRow {
        week,
        team: team.into(),
        points,
    };
    let standings = StandingsTable::new(vec![
        standing(1, "Lions", 3.0),
        standing(1, "Bears", 0.0),
        standing(2, "Lions", 3.0),
        standing(2, "Bears", 3.0),
    ]);

    let duel = |week, team: &str, lions: Cell, bears: Cell| WeekRow {
        week,
        cells: vec![Cell::Text(team.into()), lions, bears],
    };
    let matrix = WeekTable::new(
        vec!["Team".into(), "Lions".into(), "Bears".into()],
        vec![
            duel(1, "Lions", Cell::Empty, Cell::Number(3.0)),
            duel(1, "Bears", Cell::Number(0.0), Cell::Empty),
            duel(2, "Bears", Cell::Number(3.0), Cell::Empty),
            duel(2, "Lions", Cell::Empty, Cell::Number(0.0)),
        ],
    );

    let (store, _) =
        DataStore::from_tables(DashboardConfig::default(), ranks, standings, matrix).unwrap();
    Arc::new(store)
}

fn router() -> Router {
    leagueboard_web::create_router(store())
}

async fn get(uri: &str) -> (StatusCode, Vec<u8>) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = router().oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, body.to_vec())
}

async fn get_json(uri: &str) -> (StatusCode, Value) {
    let (status, body) = get(uri).await;
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_health() {
    let (status, json) = get_json("/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["rank_rows"], 4);
    assert_eq!(json["weeks"], 2);
}

#[tokio::test]
async fn test_weeks_and_default() {
    let (_, json) = get_json("/api/weeks").await;
    assert_eq!(json["weeks"], serde_json::json!([1, 2]));
    assert_eq!(json["default"], 2);
}

#[tokio::test]
async fn test_ranks_for_requested_week() {
    let (status, json) = get_json("/api/ranks?week=1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["week"], 1);
    assert_eq!(json["columns"], serde_json::json!(["team_name", "points_rank"]));
    assert_eq!(json["rows"], serde_json::json!([["Lions", 1.0], ["Bears", 2.0]]));
}

#[tokio::test]
async fn test_ranks_default_week_when_missing() {
    let (_, json) = get_json("/api/ranks").await;
    assert_eq!(json["week"], 2);
}

#[tokio::test]
async fn test_unknown_week_is_empty() {
    let (status, json) = get_json("/api/league?week=9").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["rows"], serde_json::json!([]));
}

#[tokio::test]
async fn test_invalid_week_is_bad_request() {
    let (status, _) = get("/api/ranks?week=two").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_matrix_columns_follow_rows() {
    let (_, json) = get_json("/api/matrix?week=2").await;
    assert_eq!(json["columns"], serde_json::json!(["Team", "Bears", "Lions"]));
    assert_eq!(json["rows"][0], serde_json::json!(["Bears", null, 3.0]));
}

#[tokio::test]
async fn test_league_sorted() {
    let (_, json) = get_json("/api/league?week=1").await;
    assert_eq!(json["rows"][0]["team"], "Lions");
    assert_eq!(json["rows"][0]["points"], 3.0);
    assert_eq!(json["rows"][1]["team"], "Bears");
}

#[tokio::test]
async fn test_chart_up_to_week() {
    let (_, json) = get_json("/api/chart?week=1").await;
    let series = json["chart"]["series"].as_array().unwrap();
    assert_eq!(series.len(), 2);
    assert_eq!(series[0]["points"].as_array().unwrap().len(), 1);
    assert_eq!(json["chart"]["title"], "Cumulative Points by Week");
}

#[tokio::test]
async fn test_styles() {
    let (_, json) = get_json("/api/styles").await;
    assert_eq!(json["bin_count"], 7);
    assert_eq!(json["rules"].as_array().unwrap().len(), 7);
    assert_eq!(json["legend"].as_array().unwrap().len(), 7);
    assert_eq!(json["rules"][0]["color"], "rgb(0,0,0)");
    assert!(json["rules"][6]["upper"].is_null());
}

#[tokio::test]
async fn test_index_page() {
    let (status, body) = get("/?week=1").await;
    assert_eq!(status, StatusCode::OK);

    let html = String::from_utf8(body).unwrap();
    assert!(html.contains("<h1>Kinder Sal</h1>"));
    assert!(html.contains("<option value=\"1\" selected>1</option>"));
    assert!(html.contains("<svg"));
    assert!(html.contains("background-color: rgb("));
    assert!(html.contains("Head to head"));
}

fn router_with_unnamed_matrix_row() -> Router {
    let ranks = WeekTable::new(
        vec!["team_name".into(), "points_rank".into()],
        vec![WeekRow {
            week: 1,
            cells: vec![Cell::Text("Lions".into()), Cell::Number(1.0)],
        }],
    );
    let matrix = WeekTable::new(
        vec!["Team".into(), "Lions".into()],
        vec![WeekRow {
            week: 1,
            cells: vec![Cell::Empty, Cell::Number(3.0)],
        }],
    );
    let (store, _) = DataStore::from_tables(
        DashboardConfig::default(),
        ranks,
        StandingsTable::default(),
        matrix,
    )
    .unwrap();
    leagueboard_web::create_router(Arc::new(store))
}

#[tokio::test]
async fn test_page_failure_renders_html() {
    let request = Request::builder().uri("/?week=1").body(Body::empty()).unwrap();
    let response = router_with_unnamed_matrix_row().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let content_type = response.headers()["content-type"].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/html"));

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let html = String::from_utf8(body.to_vec()).unwrap();
    assert!(html.contains("<h1>500 Internal Server Error</h1>"));
    assert!(html.contains("no Team value"));
}

#[tokio::test]
async fn test_api_failure_stays_json() {
    let request = Request::builder()
        .uri("/api/matrix?week=1")
        .body(Body::empty())
        .unwrap();
    let response = router_with_unnamed_matrix_row().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert!(json["error"].as_str().unwrap().contains("no Team value"));
}
