use thiserror::Error;

use crate::context::ContextError;

/// Errors that can occur during cache operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CacheError {
    #[error("Cache connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Cache operation failed: {0}")]
    OperationFailed(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Cache operation cancelled")]
    Cancelled,
    #[error("Cache operation timed out")]
    TimedOut,
}

impl CacheError {
    /// Returns true if retrying the same call may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, CacheError::TimedOut | CacheError::ConnectionFailed(_))
    }
}

impl From<ContextError> for CacheError {
    fn from(err: ContextError) -> Self {
        match err {
            ContextError::Cancelled => CacheError::Cancelled,
            ContextError::DeadlineExceeded => CacheError::TimedOut,
        }
    }
}

/// Result type for cache operations.
pub type Result<T> = std::result::Result<T, CacheError>;
