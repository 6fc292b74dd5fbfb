//! Health check controller.

use crate::state::AppState;
use axum::{extract::State, routing::get, Json, Router};
use roster_core::HealthReport;

/// Creates the health router.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

/// Reports the reachability of the record store and the cache.
///
/// Always answers 200; each dependency is described by its own status string.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Per-dependency status: ok, fail or error: <detail>", body = HealthReport)
    )
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthReport> {
    Json(state.user_service.health_check().await)
}
