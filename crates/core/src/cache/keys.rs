use crate::recipe::RecipeId;

/// Prefix shared by every recipe cache key.
pub const RECIPE_KEY_PREFIX: &str = "Recipe:";

/// Returns the cache key for a single recipe.
pub fn recipe_key(id: &RecipeId) -> String {
    format!("{RECIPE_KEY_PREFIX}{id}")
}
