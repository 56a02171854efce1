mod error;
mod operations;
mod requests;
mod types;

pub use error::RecipeError;
pub use operations::{validate_new_recipe, validate_recipe, validate_tag};
pub use requests::{Patch, UpdateRecipeRequest};
pub use types::{NewRecipe, Recipe, RecipeId};
