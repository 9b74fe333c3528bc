//! Axum router for the SymptoScore API.
//!
//! # Routes
//!
//! - `GET /health` - liveness probe
//! - `GET /api/questions` - question catalog
//! - `POST /api/assessments` - submit answers (requires a session)
//! - `GET /api/reports` - report history
//! - `GET /api/reports/trend` - wellness trend
//! - `GET /api/reports/:id` - report detail, `?condition=` selects the active condition
//! - `GET /api/profile` - profile overview

use axum::{
    middleware,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tower_http::trace::TraceLayer;

use super::assessment::{list_questions, submit_assessment};
use super::middleware::auth_middleware;
use super::profile::get_profile;
use super::reports::{get_report, get_wellness_trend, list_reports};
use super::state::AppState;

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/questions", get(list_questions))
        .route("/assessments", post(submit_assessment))
        .route("/reports", get(list_reports))
        .route("/reports/trend", get(get_wellness_trend))
        .route("/reports/:id", get(get_report))
        .route("/profile", get(get_profile))
}

/// Complete router with auth and tracing layers applied.
pub fn app_router(state: AppState) -> Router {
    let validator = state.validator.clone();

    Router::new()
        .nest(
            "/api",
            api_routes().layer(middleware::from_fn_with_state(validator, auth_middleware)),
        )
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
