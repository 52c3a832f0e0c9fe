//! HTTP route handlers for the sync service.
//!
//! # Route Structure
//!
//! ```text
//! GET  /minimal       - Emergency dish sync (query-string transport)
//! POST /minimal       - Dish sync (JSON body transport)
//! GET  /ping          - Liveness marker (plain text)
//! GET  /health/ready  - Readiness check (verifies database connectivity)
//! ```
//!
//! The two `/minimal` variants are thin adapters over one internal upsert
//! operation; the GET form exists for callers whose body-based requests are
//! blocked somewhere along the path.

pub mod sync;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::get,
};

use crate::state::AppState;

/// Build the service router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/minimal", get(sync::minimal_get).post(sync::minimal_post))
        .route("/ping", get(ping))
        .route("/health/ready", get(readiness))
}

/// Liveness marker.
///
/// Returns a fixed body if the server is running. Does not check dependencies.
async fn ping() -> &'static str {
    "pong"
}

/// Readiness health check endpoint.
///
/// Verifies database connectivity before returning OK.
/// Returns 503 Service Unavailable if the database is not reachable.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match sqlx::query("SELECT 1").fetch_one(state.pool()).await {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}
