//! Startup and request error types

use std::time::Duration;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use top20_core::{ErrorResponse, ValidationError};

use crate::config::ConfigError;
use crate::db::DbError;

/// Anything that stops the server from coming up
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to create database pool: {0}")]
    CreatePool(#[from] deadpool_postgres::CreatePoolError),

    #[error("Database not available after {waited:?}: {last_error}")]
    DatabaseUnavailable { waited: Duration, last_error: String },

    #[error("Error creating table: {0}")]
    Schema(DbError),

    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors returned by route handlers, rendered as `{error, message}` JSON
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Request body is not valid JSON: {0}")]
    InvalidJson(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Player name is required")]
    MissingPlayerName,

    #[error("Only one submission per IP address is allowed")]
    DuplicateAddress,

    #[error("Player '{0}' was not found in any submission")]
    PlayerNotFound(String),

    /// Message is the client-facing summary; the cause is only logged
    #[error("{message}")]
    Internal {
        message: &'static str,
        source: DbError,
    },
}

impl ApiError {
    pub fn internal(message: &'static str, source: DbError) -> Self {
        ApiError::Internal { message, source }
    }

    fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidJson(_) | ApiError::Validation(_) | ApiError::MissingPlayerName => {
                StatusCode::BAD_REQUEST
            }
            ApiError::DuplicateAddress => StatusCode::CONFLICT,
            ApiError::PlayerNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn label(&self) -> &'static str {
        match self {
            ApiError::InvalidJson(_) => "Invalid JSON",
            ApiError::Validation(e) => e.label(),
            ApiError::MissingPlayerName => "Missing required parameter",
            ApiError::DuplicateAddress => "IP address already submitted",
            ApiError::PlayerNotFound(_) => "Player not found",
            ApiError::Internal { .. } => "Internal server error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal { message, source } = &self {
            tracing::error!(error = %source, "{}", message);
        }

        let body = ErrorResponse {
            error: self.label().to_string(),
            message: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}
