use thiserror::Error;

use crate::storage::RepositoryError;

/// Errors that can occur when validating recipe input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecipeError {
    #[error("Recipe name cannot be empty")]
    EmptyName,
    #[error("Tag cannot be empty")]
    EmptyTag,
}

impl From<RecipeError> for RepositoryError {
    fn from(err: RecipeError) -> Self {
        RepositoryError::InvalidInput(err.to_string())
    }
}
