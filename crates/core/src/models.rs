//! Data models shared between server and clients

use chrono::{NaiveDateTime, SecondsFormat};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::constants::REQUIRED_PLAYERS;

/// A ranked player inside a submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Player {
    /// One-based rank within the list
    pub position: i32,
    pub name: String,
}

/// A persisted top 20 list as returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: i32,
    pub players: Vec<Player>,
    pub submitted_by: String,
    pub ip_address: String,
    pub created_at: String,
}

/// A submission row as it comes out of storage, players still undecoded
#[derive(Debug, Clone)]
pub struct StoredSubmission {
    pub id: i32,
    pub players: serde_json::Value,
    pub submitted_by: String,
    pub ip_address: String,
    pub created_at: NaiveDateTime,
}

impl StoredSubmission {
    /// Decode the stored players list
    pub fn players(&self) -> Result<Vec<Player>, serde_json::Error> {
        Vec::<Player>::deserialize(&self.players)
    }

    /// Convert into the API representation
    pub fn decode(self) -> Result<Submission, serde_json::Error> {
        let players = self.players()?;
        Ok(Submission {
            id: self.id,
            players,
            submitted_by: self.submitted_by,
            ip_address: self.ip_address,
            created_at: format_timestamp(&self.created_at),
        })
    }
}

/// Render a stored (UTC) timestamp as RFC 3339, e.g. `2026-10-18T12:00:00Z`
pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.and_utc().to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Body of `POST /api/submissions`
///
/// Missing fields deserialize to empty values so validation can report them.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRequest {
    #[serde(default)]
    pub players: Vec<Player>,
    #[serde(default)]
    pub submitted_by: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Exactly {required} players are required, got {0}", required = REQUIRED_PLAYERS)]
    WrongPlayerCount(usize),

    #[error("submittedBy is required")]
    MissingSubmitter,
}

impl ValidationError {
    /// Short machine-friendly label used as the `error` field of responses
    pub fn label(&self) -> &'static str {
        match self {
            ValidationError::WrongPlayerCount(_) => "Invalid number of players",
            ValidationError::MissingSubmitter => "Missing required field",
        }
    }
}

impl SubmissionRequest {
    /// Check player count first, then the submitter name
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.players.len() != REQUIRED_PLAYERS {
            return Err(ValidationError::WrongPlayerCount(self.players.len()));
        }
        if self.submitted_by.is_empty() {
            return Err(ValidationError::MissingSubmitter);
        }
        Ok(())
    }
}

/// How often a player landed on one position
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PositionCount {
    pub position: i32,
    pub count: u32,
}

/// Aggregated placement of one player across all submissions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStats {
    pub player_name: String,
    pub total_submissions: u32,
    /// Sorted ascending by position
    pub position_breakdown: Vec<PositionCount>,
}

/// Body of `GET /api/health`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl HealthStatus {
    pub fn healthy() -> Self {
        Self { status: "healthy".to_string(), error: None }
    }

    pub fn unhealthy(error: impl Into<String>) -> Self {
        Self { status: "unhealthy".to_string(), error: Some(error.into()) }
    }
}

/// JSON error body: `{"error": ..., "message": ...}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}
