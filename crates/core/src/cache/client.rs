//! Typed recipe cache client.
//!
//! Wraps a byte-level [`Cache`] with recipe keys and JSON values, and runs
//! every call under a [`RequestContext`] so a slow backend surfaces as
//! [`CacheError::TimedOut`] instead of a miss.

use std::sync::Arc;
use std::time::Duration;

use crate::context::RequestContext;
use crate::recipe::{Recipe, RecipeId};

use super::{deserialize_recipe, recipe_key, serialize_recipe, Cache, Result};

/// Recipe-level view over a byte cache.
pub struct RecipeCache<C: Cache + ?Sized> {
    cache: Arc<C>,
}

impl<C: Cache + ?Sized> Clone for RecipeCache<C> {
    fn clone(&self) -> Self {
        Self {
            cache: Arc::clone(&self.cache),
        }
    }
}

impl<C: Cache + ?Sized> RecipeCache<C> {
    pub fn new(cache: Arc<C>) -> Self {
        Self { cache }
    }

    /// Returns the cached recipe, or `None` when the key is absent or expired.
    pub async fn get(&self, ctx: &RequestContext, id: &RecipeId) -> Result<Option<Recipe>> {
        let key = recipe_key(id);
        let bytes = ctx.run(self.cache.get(&key)).await??;
        bytes.map(|b| deserialize_recipe(&b)).transpose()
    }

    /// Stores a recipe under its key with the given TTL.
    pub async fn set(&self, ctx: &RequestContext, recipe: &Recipe, ttl: Duration) -> Result<()> {
        let key = recipe_key(&recipe.id);
        let bytes = serialize_recipe(recipe)?;
        ctx.run(self.cache.set(&key, &bytes, Some(ttl))).await?
    }

    /// Removes a recipe from the cache. Removing a missing key succeeds.
    pub async fn delete(&self, ctx: &RequestContext, id: &RecipeId) -> Result<()> {
        let key = recipe_key(id);
        ctx.run(self.cache.delete(&key)).await?
    }
}
