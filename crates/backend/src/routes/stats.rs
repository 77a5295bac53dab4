//! Player statistics route handler

use axum::{
    extract::{RawQuery, State},
    Json,
};
use std::sync::Arc;
use top20_core::{ErrorResponse, PlayerStats, StatsCollector};
use crate::error::ApiError;
use crate::AppState;
use super::first_query_value;

/// Position breakdown for one player over every submission
#[utoipa::path(
    get,
    path = "/api/players/stats",
    tag = "players",
    params(
        ("name" = String, Query, description = "Player name, matched case-insensitively"),
    ),
    responses(
        (status = 200, description = "Position breakdown", body = PlayerStats),
        (status = 400, description = "Player name missing", body = ErrorResponse),
        (status = 404, description = "Player not in any submission", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
pub async fn get_player_stats(
    State(state): State<Arc<AppState>>,
    RawQuery(query): RawQuery,
) -> Result<Json<PlayerStats>, ApiError> {
    let name = first_query_value(query.as_deref(), "name")
        .ok_or(ApiError::MissingPlayerName)?;

    let rows = state.db.list(None).await
        .map_err(|e| ApiError::internal("Error fetching submissions", e))?;

    let mut collector = StatsCollector::new(name.clone());
    for row in &rows {
        match row.players() {
            Ok(players) => collector.add(&players),
            Err(e) => {
                tracing::warn!(id = row.id, error = %e, "Skipping submission with unreadable players");
            }
        }
    }

    collector.finish()
        .map(Json)
        .ok_or(ApiError::PlayerNotFound(name))
}
