//! Service health endpoint

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub warehouse: &'static str,
    /// Genres in the loaded vocabulary; 0 would mean every title decodes
    /// to "Unknown", which is worth surfacing here
    pub genre_count: usize,
}

/// GET /health
///
/// Liveness plus a warehouse round-trip. The service stays up when the
/// database is unreachable, so monitors get "degraded" rather than a
/// connection refusal.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let warehouse_ok = sqlx::query("SELECT 1")
        .execute(state.warehouse.pool())
        .await
        .is_ok();

    Json(HealthResponse {
        status: if warehouse_ok { "ok" } else { "degraded" },
        service: "cinestat-dash",
        version: env!("CARGO_PKG_VERSION"),
        warehouse: if warehouse_ok { "reachable" } else { "unreachable" },
        genre_count: state.codec.vocabulary().len(),
    })
}

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
