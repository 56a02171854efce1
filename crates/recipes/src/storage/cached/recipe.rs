//! Cached recipe repository decorator.
//!
//! Wraps a `RecipeRepository` implementation with cache-aside pattern.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use recipes_core::cache::{Cache, RecipeCache};
use recipes_core::context::RequestContext;
use recipes_core::recipe::{NewRecipe, Recipe, RecipeId};
use recipes_core::storage::{RecipeRepository, Result};

/// Upper bound for a cache invalidation that follows a committed write.
const INVALIDATION_TIMEOUT: Duration = Duration::from_secs(2);

/// Cached recipe repository decorator.
///
/// Implements the cache-aside pattern:
/// - **Reads by id**: Check cache first, on miss fetch from repository and populate cache
/// - **Creates**: Persist to repository, then populate cache
/// - **Updates/Deletes**: Persist to repository, then invalidate cache
/// - **Collection reads**: Always served by the repository
///
/// Cache failures are logged and never surface to callers. Repository errors
/// are returned unchanged.
///
/// # Type Parameters
///
/// * `R` - The underlying repository implementation
/// * `C` - The cache implementation
pub struct CachedRecipeRepository<R, C>
where
    R: RecipeRepository + ?Sized,
    C: Cache + ?Sized,
{
    repository: Arc<R>,
    cache: RecipeCache<C>,
    ttl: Duration,
}

impl<R, C> CachedRecipeRepository<R, C>
where
    R: RecipeRepository + ?Sized,
    C: Cache + ?Sized,
{
    /// Creates a new cached recipe repository.
    ///
    /// # Arguments
    ///
    /// * `repository` - The underlying repository to cache
    /// * `cache` - The cache implementation
    /// * `ttl` - Time-to-live for cached recipes
    pub fn new(repository: Arc<R>, cache: Arc<C>, ttl: Duration) -> Self {
        Self {
            repository,
            cache: RecipeCache::new(cache),
            ttl,
        }
    }

    async fn populate(&self, ctx: &RequestContext, recipe: &Recipe) {
        if let Err(err) = self.cache.set(ctx, recipe, self.ttl).await {
            tracing::warn!(recipe_id = %recipe.id, error = %err, "Failed to cache recipe");
        }
    }

    /// Drops the cached entry after a committed write.
    ///
    /// Runs under its own bounded context: the write already happened, so the
    /// caller's deadline or cancellation must not leave a stale entry behind.
    async fn invalidate(&self, id: &RecipeId) {
        let ctx = RequestContext::background().child_with_timeout(INVALIDATION_TIMEOUT);
        if let Err(err) = self.cache.delete(&ctx, id).await {
            tracing::warn!(recipe_id = %id, error = %err, "Failed to invalidate recipe cache");
        }
    }
}

#[async_trait]
impl<R, C> RecipeRepository for CachedRecipeRepository<R, C>
where
    R: RecipeRepository + ?Sized + 'static,
    C: Cache + ?Sized + 'static,
{
    async fn create(&self, ctx: &RequestContext, recipe: &NewRecipe) -> Result<Recipe> {
        // 1. Persist to storage
        let created = self.repository.create(ctx, recipe).await?;

        // 2. Populate cache immediately (cache-aside on write)
        self.populate(ctx, &created).await;

        tracing::debug!(recipe_id = %created.id, name = %created.name, "Recipe created");
        Ok(created)
    }

    async fn get_by_id(&self, ctx: &RequestContext, id: &RecipeId) -> Result<Recipe> {
        // Check cache first
        match self.cache.get(ctx, id).await {
            Ok(Some(recipe)) => {
                tracing::trace!(recipe_id = %id, "Cache hit for recipe");
                return Ok(recipe);
            }
            Ok(None) => tracing::trace!(recipe_id = %id, "Cache miss for recipe"),
            Err(err) => {
                tracing::warn!(recipe_id = %id, error = %err, "Cache read failed, using repository");
            }
        }

        let recipe = self.repository.get_by_id(ctx, id).await?;
        self.populate(ctx, &recipe).await;

        Ok(recipe)
    }

    async fn get_all(&self, ctx: &RequestContext) -> Result<Vec<Recipe>> {
        self.repository.get_all(ctx).await
    }

    async fn update(&self, ctx: &RequestContext, recipe: &Recipe) -> Result<Recipe> {
        // 1. Persist to storage
        let updated = self.repository.update(ctx, recipe).await?;

        // 2. Invalidate cache (will be repopulated on next read)
        self.invalidate(&updated.id).await;

        tracing::debug!(recipe_id = %updated.id, name = %updated.name, "Recipe updated");
        Ok(updated)
    }

    async fn delete(&self, ctx: &RequestContext, id: &RecipeId) -> Result<()> {
        // 1. Persist deletion to storage
        self.repository.delete(ctx, id).await?;

        // 2. Invalidate cache
        self.invalidate(id).await;

        tracing::debug!(recipe_id = %id, "Recipe deleted");
        Ok(())
    }

    async fn get_by_tag(&self, ctx: &RequestContext, tag: &str) -> Result<Vec<Recipe>> {
        self.repository.get_by_tag(ctx, tag).await
    }
}
