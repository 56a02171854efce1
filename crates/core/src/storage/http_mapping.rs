//! Pure functions for mapping repository errors to HTTP status codes.
//!
//! Transport layers use this at their boundary; the storage layer itself never
//! speaks HTTP.

use super::RepositoryError;

/// Maps a [`RepositoryError`] to an HTTP status code.
///
/// - `NotFound` -> 404 (Not Found)
/// - `InvalidInput` -> 400 (Bad Request)
/// - everything else -> 500 (Internal Server Error)
///
/// # Examples
///
/// ```
/// use recipes_core::storage::{RepositoryError, repository_error_to_status_code};
///
/// let error = RepositoryError::recipe_not_found("abc-123");
/// assert_eq!(repository_error_to_status_code(&error), 404);
/// ```
pub fn repository_error_to_status_code(error: &RepositoryError) -> u16 {
    match error {
        RepositoryError::NotFound { .. } => 404,
        RepositoryError::InvalidInput(_) => 400,
        RepositoryError::Conflict { .. }
        | RepositoryError::Persistence(_)
        | RepositoryError::Io(_)
        | RepositoryError::Serialization(_)
        | RepositoryError::Cancelled
        | RepositoryError::TimedOut(_) => 500,
    }
}
