//! Recipe service.
//!
//! Request-level rules that sit above the repository contract: input
//! validation and read-modify-write partial updates. Works against any
//! [`RecipeRepository`], cached or not.

use std::sync::Arc;

use recipes_core::context::RequestContext;
use recipes_core::recipe::{
    validate_new_recipe, validate_recipe, validate_tag, NewRecipe, Recipe, RecipeId,
    UpdateRecipeRequest,
};
use recipes_core::storage::{RecipeRepository, Result};

#[derive(Clone)]
pub struct RecipeService {
    repository: Arc<dyn RecipeRepository>,
}

impl RecipeService {
    pub fn new(repository: Arc<dyn RecipeRepository>) -> Self {
        Self { repository }
    }

    /// Creates a recipe after checking that its name is not blank.
    pub async fn create_recipe(&self, ctx: &RequestContext, recipe: NewRecipe) -> Result<Recipe> {
        validate_new_recipe(&recipe)?;
        self.repository.create(ctx, &recipe).await
    }

    pub async fn get_recipe(&self, ctx: &RequestContext, id: &RecipeId) -> Result<Recipe> {
        self.repository.get_by_id(ctx, id).await
    }

    pub async fn list_recipes(&self, ctx: &RequestContext) -> Result<Vec<Recipe>> {
        self.repository.get_all(ctx).await
    }

    /// Applies a partial update to an existing recipe.
    ///
    /// Fields left [`Patch::Unchanged`] keep their stored value. The patched
    /// recipe is validated before it is written, so a request that blanks the
    /// name fails with `InvalidInput` and leaves the recipe untouched.
    ///
    /// [`Patch::Unchanged`]: recipes_core::recipe::Patch::Unchanged
    pub async fn update_recipe(
        &self,
        ctx: &RequestContext,
        id: &RecipeId,
        request: UpdateRecipeRequest,
    ) -> Result<Recipe> {
        let mut recipe = self.repository.get_by_id(ctx, id).await?;
        request.apply_to(&mut recipe);
        validate_recipe(&recipe)?;
        self.repository.update(ctx, &recipe).await
    }

    pub async fn delete_recipe(&self, ctx: &RequestContext, id: &RecipeId) -> Result<()> {
        self.repository.delete(ctx, id).await
    }

    /// Returns every recipe carrying `tag`. A blank tag is rejected.
    pub async fn search_by_tag(&self, ctx: &RequestContext, tag: &str) -> Result<Vec<Recipe>> {
        validate_tag(tag)?;
        self.repository.get_by_tag(ctx, tag).await
    }
}
