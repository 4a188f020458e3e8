pub mod category_repository;
pub mod task_repository;

use crate::client::ClientError;

/// Repository errors for backend data operations
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Resource not found")]
    NotFound,

    #[error("Not authorized: {0}")]
    Unauthorized(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),
}

impl From<ClientError> for RepositoryError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::NotFound(_) => RepositoryError::NotFound,
            ClientError::Unauthorized(msg) => RepositoryError::Unauthorized(msg),
            ClientError::Conflict(msg) => RepositoryError::ConstraintViolation(msg),
            other => RepositoryError::DatabaseError(other.to_string()),
        }
    }
}

/// PostgREST filter value matching `value` exactly
pub(crate) fn eq(value: impl std::fmt::Display) -> String {
    format!("eq.{}", value)
}

/// Header asking PostgREST to echo written rows back
pub(crate) const RETURN_REPRESENTATION: (&str, &str) = ("Prefer", "return=representation");
