//! Pure functions for serializing/deserializing recipes to/from cache bytes.
//!
//! Cache values use the same JSON schema as the on-disk store, so a value can
//! be inspected with any Redis client.

use crate::recipe::Recipe;

use super::CacheError;

/// Serializes a recipe to JSON bytes.
pub fn serialize_recipe(recipe: &Recipe) -> Result<Vec<u8>, CacheError> {
    serde_json::to_vec(recipe).map_err(|e| CacheError::Serialization(e.to_string()))
}

/// Deserializes JSON bytes to a recipe.
pub fn deserialize_recipe(bytes: &[u8]) -> Result<Recipe, CacheError> {
    serde_json::from_slice(bytes).map_err(|e| CacheError::Serialization(e.to_string()))
}
