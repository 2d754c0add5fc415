//! JSON endpoints, one per derived view
//!
//! Every endpoint takes an optional `?week=N`; without it the default week is
//! used. A week with no data gives empty rows, not an error.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use leagueboard_core::{CoreError, DataStore, Week};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

/// `?week=N`
#[derive(Debug, Default, Deserialize)]
pub struct WeekQuery {
    pub week: Option<Week>,
}

/// Errors surfaced to HTTP clients
#[derive(Debug)]
pub enum ApiError {
    /// No week requested and none to default to
    NoWeeks,
    Core(CoreError),
}

impl From<CoreError> for ApiError {
    fn from(e: CoreError) -> Self {
        ApiError::Core(e)
    }
}

impl ApiError {
    /// Status code and client-facing message
    pub(crate) fn into_parts(self) -> (StatusCode, String) {
        match self {
            ApiError::NoWeeks => (StatusCode::NOT_FOUND, "No weeks loaded".to_string()),
            ApiError::Core(e) => {
                tracing::error!(error = %e, "Failed to derive view");
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.into_parts();
        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Requested week or the store's default
pub fn selected_week(store: &DataStore, query: &WeekQuery) -> Result<Week, ApiError> {
    store.resolve_week(query.week).ok_or(ApiError::NoWeeks)
}

pub async fn health_handler(State(store): State<Arc<DataStore>>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "rank_rows": store.ranks().len(),
        "standing_rows": store.standings().len(),
        "matrix_rows": store.matrix().len(),
        "weeks": store.available_weeks().len(),
    }))
}

pub async fn weeks_handler(State(store): State<Arc<DataStore>>) -> Json<Value> {
    Json(json!({
        "weeks": store.available_weeks(),
        "default": store.default_week(),
    }))
}

pub async fn ranks_handler(
    State(store): State<Arc<DataStore>>,
    Query(query): Query<WeekQuery>,
) -> Result<Json<Value>, ApiError> {
    let week = selected_week(&store, &query)?;
    let view = store.ranks_view(week);
    Ok(Json(json!({
        "week": week,
        "columns": view.columns,
        "rows": view.rows,
    })))
}

pub async fn matrix_handler(
    State(store): State<Arc<DataStore>>,
    Query(query): Query<WeekQuery>,
) -> Result<Json<Value>, ApiError> {
    let week = selected_week(&store, &query)?;
    let view = store.matrix_view(week)?.to_table_view(store.matrix());
    Ok(Json(json!({
        "week": week,
        "columns": view.columns,
        "rows": view.rows,
    })))
}

pub async fn league_handler(
    State(store): State<Arc<DataStore>>,
    Query(query): Query<WeekQuery>,
) -> Result<Json<Value>, ApiError> {
    let week = selected_week(&store, &query)?;
    Ok(Json(json!({
        "week": week,
        "rows": store.league_for_week(week),
    })))
}

pub async fn chart_handler(
    State(store): State<Arc<DataStore>>,
    Query(query): Query<WeekQuery>,
) -> Result<Json<Value>, ApiError> {
    let week = selected_week(&store, &query)?;
    Ok(Json(json!({
        "week": week,
        "chart": store.chart_for_week(week),
    })))
}

pub async fn styles_handler(State(store): State<Arc<DataStore>>) -> Json<Value> {
    let classification = store.classification();
    let rules: Vec<Value> = classification
        .rules
        .iter()
        .map(|rule| {
            json!({
                "column": rule.column,
                "lower": rule.lower,
                "upper": rule.upper,
                "filter_query": rule.filter_query(),
                "background": rule.background.to_string(),
                "color": rule.color.to_string(),
            })
        })
        .collect();
    let legend: Vec<Value> = classification
        .legend
        .iter()
        .map(|entry| json!({ "lower": entry.lower, "color": entry.color.to_string() }))
        .collect();

    Json(json!({
        "min": classification.min,
        "max": classification.max,
        "bin_count": classification.bin_count,
        "degenerate": classification.degenerate,
        "rules": rules,
        "legend": legend,
    }))
}
