//! Domain-level error types.

use thiserror::Error;

use crate::ports::KvError;

/// Domain errors - business logic failures.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound { entity_type: &'static str, id: String },

    #[error("Validation failed: {0}")]
    Validation(String),
}

impl DomainError {
    pub fn post_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Post",
            id: id.into(),
        }
    }
}

/// Storage-level errors.
///
/// A missing post is not an error at this level; stores report it as
/// `None` / `false`.
#[derive(Debug, Error)]
pub enum RepoError {
    /// Backend unreachable. The operation did not happen.
    #[error("Storage connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Stored data could not be (de)serialized: {0}")]
    Serialization(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// Input rejected by a remote store.
    #[error("Rejected by store: {0}")]
    Validation(String),

    #[error("Unauthorized")]
    Unauthorized,
}

impl From<serde_json::Error> for RepoError {
    fn from(err: serde_json::Error) -> Self {
        RepoError::Serialization(err.to_string())
    }
}

impl From<KvError> for RepoError {
    fn from(err: KvError) -> Self {
        match err {
            KvError::Connection(msg) => RepoError::Connection(msg),
            KvError::Serialization(msg) => RepoError::Serialization(msg),
            KvError::Operation(msg) => RepoError::Query(msg),
        }
    }
}
