//! Web router using Axum

use axum::{routing::get, Router};
use leagueboard_core::DataStore;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::{api, page};

/// Create the web router
pub fn create_router(store: Arc<DataStore>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(page::index_handler))
        .route("/api/health", get(api::health_handler))
        .route("/api/weeks", get(api::weeks_handler))
        .route("/api/ranks", get(api::ranks_handler))
        .route("/api/matrix", get(api::matrix_handler))
        .route("/api/league", get(api::league_handler))
        .route("/api/chart", get(api::chart_handler))
        .route("/api/styles", get(api::styles_handler))
        .layer(cors)
        .with_state(store)
}
