//! Liveness probe

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;
use top20_core::HealthStatus;
use crate::AppState;

/// Report whether the database answers
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "health",
    responses(
        (status = 200, description = "Database reachable", body = HealthStatus),
        (status = 503, description = "Database unreachable", body = HealthStatus),
    )
)]
pub async fn health(
    State(state): State<Arc<AppState>>,
) -> (StatusCode, Json<HealthStatus>) {
    match state.db.ping().await {
        Ok(()) => (StatusCode::OK, Json(HealthStatus::healthy())),
        Err(e) => {
            tracing::warn!(error = %e, "Health check failed");
            (StatusCode::SERVICE_UNAVAILABLE, Json(HealthStatus::unhealthy(e.to_string())))
        }
    }
}
