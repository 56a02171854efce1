use thiserror::Error;

use crate::context::ContextError;

/// Entity name used in recipe repository errors.
pub const RECIPE_ENTITY: &str = "Recipe";

/// Errors that can occur during repository operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("{entity_type} already exists: {id}")]
    Conflict {
        entity_type: &'static str,
        id: String,
    },
    #[error("Persistence failed: {0}")]
    Persistence(String),
    #[error("I/O failure: {0}")]
    Io(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Operation cancelled")]
    Cancelled,
    #[error("Operation timed out: {0}")]
    TimedOut(String),
}

impl RepositoryError {
    /// Shorthand for a missing recipe.
    pub fn recipe_not_found(id: impl Into<String>) -> Self {
        RepositoryError::NotFound {
            entity_type: RECIPE_ENTITY,
            id: id.into(),
        }
    }

    /// Returns true if retrying the same call may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, RepositoryError::TimedOut(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, RepositoryError::NotFound { .. })
    }
}

impl From<ContextError> for RepositoryError {
    fn from(err: ContextError) -> Self {
        match err {
            ContextError::Cancelled => RepositoryError::Cancelled,
            ContextError::DeadlineExceeded => RepositoryError::TimedOut(err.to_string()),
        }
    }
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;
