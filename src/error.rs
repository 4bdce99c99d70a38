/*
 * Responsibility
 * - AppError: every way a request can end badly
 * - IntoResponse (HTTP status / `{"error": "..."}` body / CORS headers)
 * - RepoError / IdentityError → AppError
 */
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::api::response;
use crate::middleware::cors::CorsHeaders;
use crate::repos::error::RepoError;
use crate::services::auth::IdentityError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Missing required fields")]
    MissingFields,
    #[error("Mood must be between 1 and 5")]
    MoodOutOfRange,
    #[error("Invalid JSON body: {0}")]
    InvalidBody(String),
    #[error("Entry already exists for this date")]
    Conflict,
    // Store refused the operation; its message goes back verbatim.
    #[error("{0}")]
    Store(String),
    #[error("{0}")]
    Unexpected(String),
}

impl AppError {
    pub fn body_read(e: impl std::fmt::Display) -> Self {
        AppError::Unexpected(format!("Failed to read request body: {e}"))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::MissingFields
            | AppError::MoodOutOfRange
            | AppError::InvalidBody(_)
            | AppError::Store(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict => StatusCode::CONFLICT,
            AppError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // The catch-all path only promises Content-Type + Allow-Origin.
        let cors = match self {
            AppError::Unexpected(ref message) => {
                tracing::error!(error = %message, "request failed unexpectedly");
                CorsHeaders::OriginOnly
            }
            _ => CorsHeaders::Full,
        };

        let body = ErrorResponse {
            error: self.to_string(),
        };

        response::json(status, &body, cors)
    }
}

impl From<RepoError> for AppError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::Conflict => AppError::Conflict,
            RepoError::Rejected(message) => AppError::Store(message),
            other => AppError::Unexpected(other.to_string()),
        }
    }
}

impl From<IdentityError> for AppError {
    fn from(_: IdentityError) -> Self {
        AppError::Unauthorized
    }
}
