//! REST API routes

pub mod health;
pub mod submissions;
pub mod stats;

pub use health::*;
pub use submissions::*;
pub use stats::*;

use axum::{routing::get, Router};
use std::sync::Arc;
use top20_core::{ErrorResponse, HealthStatus, Player, PlayerStats, PositionCount, Submission, SubmissionRequest};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use crate::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Top20 API",
        version = "1.0",
        description = "Submit and query top 20 player rankings. One submission per client address."
    ),
    paths(
        health::health,
        submissions::create_submission,
        submissions::list_submissions,
        stats::get_player_stats,
    ),
    components(schemas(
        Player,
        Submission,
        SubmissionRequest,
        PlayerStats,
        PositionCount,
        ErrorResponse,
        HealthStatus,
    )),
    tags(
        (name = "health", description = "Service liveness"),
        (name = "submissions", description = "Top 20 submissions"),
        (name = "players", description = "Player statistics"),
    )
)]
pub struct ApiDoc;

/// First value of `key` in a raw query string; empty values count as absent.
/// Repeated keys are not an error.
pub fn first_query_value(query: Option<&str>, key: &str) -> Option<String> {
    url::form_urlencoded::parse(query?.as_bytes())
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
        .filter(|v| !v.is_empty())
}

/// Build the API router. Unlisted methods on these paths answer 405.
/// Interactive docs are served under `/api/docs`.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/submissions", get(list_submissions).post(create_submission))
        .route("/api/players/stats", get(get_player_stats))
        .with_state(state)
        .merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any))
        .layer(TraceLayer::new_for_http())
}
