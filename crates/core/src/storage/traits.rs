use async_trait::async_trait;

use crate::context::RequestContext;
use crate::recipe::{NewRecipe, Recipe, RecipeId};

use super::Result;

/// Repository for recipe operations.
///
/// Every call runs under a [`RequestContext`]; implementations return
/// `Cancelled` or `TimedOut` when the context stops admitting work before the
/// operation commits. Returned values are owned copies.
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    /// Stores a new recipe, assigning its id and publication time.
    async fn create(&self, ctx: &RequestContext, recipe: &NewRecipe) -> Result<Recipe>;

    /// Gets a recipe by its ID.
    async fn get_by_id(&self, ctx: &RequestContext, id: &RecipeId) -> Result<Recipe>;

    /// Gets every stored recipe.
    async fn get_all(&self, ctx: &RequestContext) -> Result<Vec<Recipe>>;

    /// Replaces the mutable fields of an existing recipe.
    ///
    /// The stored `published_at` is kept. Never creates.
    async fn update(&self, ctx: &RequestContext, recipe: &Recipe) -> Result<Recipe>;

    /// Deletes a recipe by its ID.
    async fn delete(&self, ctx: &RequestContext, id: &RecipeId) -> Result<()>;

    /// Gets every recipe tagged with `tag`. No matches is an empty result.
    async fn get_by_tag(&self, ctx: &RequestContext, tag: &str) -> Result<Vec<Recipe>>;
}
