use super::error::RecipeError;
use super::types::{NewRecipe, Recipe};

/// Validates a tag used as a search key.
pub fn validate_tag(tag: &str) -> Result<(), RecipeError> {
    if tag.trim().is_empty() {
        return Err(RecipeError::EmptyTag);
    }
    Ok(())
}

/// Validates a recipe payload before creation.
pub fn validate_new_recipe(recipe: &NewRecipe) -> Result<(), RecipeError> {
    validate_name(&recipe.name)
}

/// Validates a recipe before update.
pub fn validate_recipe(recipe: &Recipe) -> Result<(), RecipeError> {
    validate_name(&recipe.name)
}

fn validate_name(name: &str) -> Result<(), RecipeError> {
    if name.trim().is_empty() {
        return Err(RecipeError::EmptyName);
    }
    Ok(())
}
