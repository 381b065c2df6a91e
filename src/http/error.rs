//! HTTP error handling and response types.
//!
//! Failures serialize as `{"error": <message or message list>}` with an
//! optional `"solution"` hint on cross-field consistency failures. Conflict
//! rejections carry every triggered message as an array under the same
//! `error` key.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::db::repository::RepositoryError;
use crate::services::ServiceError;

/// The `error` field of a failure payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorDetail {
    /// A single failure message
    One(String),
    /// Every conflict message triggered by the request
    Many(Vec<String>),
}

/// API error response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Failure message(s) surfaced to the client
    pub error: ErrorDetail,
    /// Suggested fix, present for cross-field consistency failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solution: Option<String>,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: ErrorDetail::One(message.into()),
            solution: None,
        }
    }

    pub fn many(messages: Vec<String>) -> Self {
        Self {
            error: ErrorDetail::Many(messages),
            solution: None,
        }
    }

    pub fn with_solution(mut self, solution: impl Into<String>) -> Self {
        self.solution = Some(solution.into());
        self
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Resource or referenced entity not found
    NotFound(String),
    /// Invalid request (validation failure)
    BadRequest(String),
    /// Course/semester mismatch with a suggested fix
    CrossField { message: String, solution: String },
    /// Overlap categories triggered by the request
    Conflicts(Vec<String>),
    /// Duplicate schedule combination
    Duplicate(String),
    /// Internal server error
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorBody::new(msg)),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorBody::new(msg)),
            AppError::CrossField { message, solution } => (
                StatusCode::BAD_REQUEST,
                ErrorBody::new(message).with_solution(solution),
            ),
            AppError::Conflicts(messages) => (StatusCode::BAD_REQUEST, ErrorBody::many(messages)),
            AppError::Duplicate(msg) => (StatusCode::CONFLICT, ErrorBody::new(msg)),
            AppError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorBody::new(msg))
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(msg) => AppError::BadRequest(msg),
            ServiceError::NotFound(msg) => AppError::NotFound(msg),
            ServiceError::CrossField { message, solution } => {
                AppError::CrossField { message, solution }
            }
            ServiceError::Conflicts { messages } => AppError::Conflicts(messages),
            ServiceError::Duplicate(msg) => AppError::Duplicate(msg),
            ServiceError::Repository(e) => AppError::from(e),
        }
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { message, .. } => AppError::NotFound(message),
            RepositoryError::Duplicate { message, .. } => AppError::Duplicate(message),
            other => AppError::Internal(other.to_string()),
        }
    }
}
