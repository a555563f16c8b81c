//! Error handling for the HTTP API.
//!
//! Converts application errors into HTTP responses with appropriate
//! status codes. Every error body has the same shape, a single-field
//! JSON object: `{"detail": "<client-safe message>"}`.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::db::repository::RepositoryError;

/// Detail message sent with every authentication failure. Identical
/// for a wrong username, a wrong password, and a missing header; the
/// response never reveals which part was rejected.
pub const UNAUTHORIZED_DETAIL: &str = "Incorrect username or password";

/// Wire shape of every error body.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub detail: String,
}

/// Application error type for HTTP handlers.
#[derive(Debug, Error)]
pub enum AppError {
    /// Missing, malformed, or mismatched credentials
    #[error("Incorrect username or password")]
    Unauthorized,

    /// Request parameters failed validation before any query ran
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Failure reported by the reservoir store
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Unauthorized => {
                // Re-challenge so browser clients prompt for credentials.
                (
                    StatusCode::UNAUTHORIZED,
                    [(header::WWW_AUTHENTICATE, "Basic")],
                    Json(ApiError {
                        detail: UNAUTHORIZED_DETAIL.to_string(),
                    }),
                )
                    .into_response()
            }
            AppError::BadRequest(detail) => {
                (StatusCode::BAD_REQUEST, Json(ApiError { detail })).into_response()
            }
            AppError::Repository(err) => {
                let status = match &err {
                    RepositoryError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
                    RepositoryError::NotFound { .. } => StatusCode::NOT_FOUND,
                    RepositoryError::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
                    RepositoryError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
                    RepositoryError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
                };
                if status.is_server_error() {
                    tracing::error!("Repository error surfaced as {}: {}", status, err);
                }
                // `message()` omits the diagnostic context; that stays
                // in the logs and never reaches the client.
                (
                    status,
                    Json(ApiError {
                        detail: err.message().to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}
