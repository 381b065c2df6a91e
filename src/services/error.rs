//! Error types for the service layer.
//!
//! Each variant corresponds to one branch of the client-facing error
//! taxonomy; the HTTP layer maps these onto status codes and the
//! `{error, solution?}` payload shape. Storage failures that carry a
//! client-facing meaning (missing record, duplicate combination) are lifted
//! into the matching service variant so the wire message is the repository's
//! own.

use thiserror::Error;

use crate::db::RepositoryError;

/// Result type for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Error type for service-level failures.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// A request field failed a shape check (missing field, bad time
    /// ordering, unknown class type).
    #[error("{0}")]
    Validation(String),

    /// A referenced entity or addressed record does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Course/semester assignment mismatch; carries a suggested fix.
    #[error("{message}")]
    CrossField { message: String, solution: String },

    /// One or more overlap categories fired; every message is kept so the
    /// caller can surface the full list.
    #[error("{}", .messages.join(" "))]
    Conflicts { messages: Vec<String> },

    /// The full schedule combination is already stored.
    #[error("{0}")]
    Duplicate(String),

    /// Failure inside the storage layer with no client-facing mapping.
    #[error(transparent)]
    Repository(RepositoryError),
}

impl ServiceError {
    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a not found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Create a duplicate error.
    pub fn duplicate(message: impl Into<String>) -> Self {
        Self::Duplicate(message.into())
    }

    /// Create a cross-field consistency error with a suggested fix.
    pub fn cross_field(message: impl Into<String>, solution: impl Into<String>) -> Self {
        Self::CrossField {
            message: message.into(),
            solution: solution.into(),
        }
    }

    /// Create a conflict error carrying every triggered message.
    pub fn conflicts(messages: Vec<String>) -> Self {
        Self::Conflicts { messages }
    }
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { message, .. } => Self::NotFound(message),
            RepositoryError::Duplicate { message, .. } => Self::Duplicate(message),
            other => Self::Repository(other),
        }
    }
}
