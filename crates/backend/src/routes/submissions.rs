//! Submission route handlers

use axum::{
    body::Bytes,
    extract::{ConnectInfo, RawQuery, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use std::net::SocketAddr;
use std::sync::Arc;
use top20_core::{ErrorResponse, Submission, SubmissionRequest};
use crate::client_addr::client_address;
use crate::db::DbError;
use crate::error::ApiError;
use crate::AppState;
use super::first_query_value;

/// Create a submission, one per client address
#[utoipa::path(
    post,
    path = "/api/submissions",
    tag = "submissions",
    request_body = SubmissionRequest,
    responses(
        (status = 201, description = "Submission created"),
        (status = 400, description = "Wrong number of players, missing field or invalid JSON", body = ErrorResponse),
        (status = 409, description = "Address already submitted", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
pub async fn create_submission(
    State(state): State<Arc<AppState>>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    // Parsed by hand so malformed bodies get the JSON error shape
    let request: SubmissionRequest = serde_json::from_slice(&body)
        .map_err(|e| ApiError::InvalidJson(e.to_string()))?;

    request.validate()?;

    let address = client_address(&headers, &peer.to_string());

    let exists = state.db.address_exists(&address).await
        .map_err(|e| ApiError::internal("Error checking submission", e))?;
    if exists {
        return Err(ApiError::DuplicateAddress);
    }

    // The unique constraint still catches a concurrent insert from the same address
    let id = state.db.insert(&request, &address).await.map_err(|e| match e {
        DbError::DuplicateAddress => ApiError::DuplicateAddress,
        e => ApiError::internal("Error saving submission", e),
    })?;

    tracing::info!(
        id,
        submitted_by = %request.submitted_by,
        address = %address,
        "Submission stored"
    );

    Ok(StatusCode::CREATED)
}

/// List submissions, newest first
#[utoipa::path(
    get,
    path = "/api/submissions",
    tag = "submissions",
    params(
        ("submittedBy" = Option<String>, Query, description = "Only submissions by this name (exact match)"),
    ),
    responses(
        (status = 200, description = "Matching submissions, possibly empty", body = [Submission]),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
pub async fn list_submissions(
    State(state): State<Arc<AppState>>,
    RawQuery(query): RawQuery,
) -> Result<Json<Vec<Submission>>, ApiError> {
    let filter = first_query_value(query.as_deref(), "submittedBy");

    let rows = state.db.list(filter.as_deref()).await
        .map_err(|e| ApiError::internal("Error fetching submissions", e))?;

    let mut submissions = Vec::with_capacity(rows.len());
    for row in rows {
        let id = row.id;
        match row.decode() {
            Ok(submission) => submissions.push(submission),
            Err(e) => {
                tracing::warn!(id, error = %e, "Skipping submission with unreadable players");
            }
        }
    }

    Ok(Json(submissions))
}
