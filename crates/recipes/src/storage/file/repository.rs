//! File-backed concurrent repository implementation.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::runtime::{Handle, RuntimeFlavor};
use tokio::sync::RwLock;

use recipes_core::context::RequestContext;
use recipes_core::recipe::{NewRecipe, Recipe, RecipeId};
use recipes_core::storage::{RecipeRepository, RepositoryError, Result};

use super::persistence::{load_recipes, write_recipes};

/// An immutable view of the store after some completed write.
#[derive(Debug, Clone, Default)]
struct Snapshot {
    version: u64,
    recipes: Arc<Vec<Recipe>>,
}

/// Concurrent recipe store persisted to a single JSON file.
///
/// All recipes live in memory behind one `RwLock`. Reads clone the current
/// snapshot handle under the shared lock. Writes hold the exclusive lock,
/// build the next snapshot, write it through to disk, and only then publish
/// it. A failed disk write leaves the previous snapshot in place, so memory
/// and disk never diverge.
///
/// One instance per file: there is no cross-process locking.
#[derive(Debug)]
pub struct FileRepository {
    path: PathBuf,
    state: RwLock<Snapshot>,
}

impl FileRepository {
    /// Opens an existing store file, loading it eagerly.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file cannot be read and `Serialization` if it does
    /// not contain a JSON array of recipes.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let recipes = load_recipes(&path).await?;

        tracing::info!(path = %path.display(), recipes = recipes.len(), "Loaded recipe store");

        Ok(Self {
            path,
            state: RwLock::new(Snapshot {
                version: 0,
                recipes: Arc::new(recipes),
            }),
        })
    }

    /// Opens the store file, creating an empty one (and its parent directory)
    /// if it does not exist yet.
    pub async fn open_or_init(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if !tokio::fs::try_exists(&path)
            .await
            .map_err(|e| RepositoryError::Io(e.to_string()))?
        {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| RepositoryError::Io(e.to_string()))?;
            }
            write_recipes(&path, &[]).map_err(|e| RepositoryError::Io(e.to_string()))?;
            tracing::info!(path = %path.display(), "Initialized empty recipe store");
        }
        Self::open(path).await
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of writes committed since the store was opened.
    pub async fn version(&self) -> u64 {
        self.state.read().await.version
    }

    /// Returns the current snapshot's recipes.
    async fn snapshot(&self, ctx: &RequestContext) -> Result<Arc<Vec<Recipe>>> {
        ctx.check()?;
        let state = ctx.run(self.state.read()).await?;
        Ok(Arc::clone(&state.recipes))
    }

    /// Writes `next` to disk and publishes it as the new snapshot.
    ///
    /// Must be called with the write lock held and without awaiting between
    /// the call and the end of the critical section.
    fn commit(&self, state: &mut Snapshot, next: Vec<Recipe>) -> Result<u64> {
        if let Err(err) = persist(&self.path, &next) {
            tracing::error!(
                path = %self.path.display(),
                version = state.version,
                error = %err,
                "Failed to persist recipe store, keeping previous snapshot"
            );
            return Err(RepositoryError::Persistence(err.to_string()));
        }

        state.version += 1;
        state.recipes = Arc::new(next);
        Ok(state.version)
    }
}

/// Runs the synchronous file write, moving the worker's other tasks elsewhere
/// first when the runtime allows it. No await point is introduced.
fn persist(path: &Path, recipes: &[Recipe]) -> std::io::Result<()> {
    match Handle::try_current() {
        Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
            tokio::task::block_in_place(|| write_recipes(path, recipes))
        }
        _ => write_recipes(path, recipes),
    }
}

/// Linear scan for `id`, checking the context between iterations.
fn find_index(ctx: &RequestContext, recipes: &[Recipe], id: &RecipeId) -> Result<Option<usize>> {
    for (index, recipe) in recipes.iter().enumerate() {
        ctx.check()?;
        if recipe.id == *id {
            return Ok(Some(index));
        }
    }
    Ok(None)
}

/// Recipes carrying `tag`, in store order, checking the context between
/// iterations.
fn filter_by_tag(ctx: &RequestContext, recipes: &[Recipe], tag: &str) -> Result<Vec<Recipe>> {
    let mut matches = Vec::new();
    for recipe in recipes {
        ctx.check()?;
        if recipe.has_tag(tag) {
            matches.push(recipe.clone());
        }
    }
    Ok(matches)
}

#[async_trait]
impl RecipeRepository for FileRepository {
    async fn create(&self, ctx: &RequestContext, recipe: &NewRecipe) -> Result<Recipe> {
        ctx.check()?;
        let mut state = ctx.run(self.state.write()).await?;

        let created = Recipe::from_new(recipe.clone(), Utc::now());
        let mut next = Vec::with_capacity(state.recipes.len() + 1);
        next.extend(state.recipes.iter().cloned());
        next.push(created.clone());

        let version = self.commit(&mut state, next)?;

        tracing::debug!(recipe_id = %created.id, name = %created.name, version, "Recipe created");
        Ok(created)
    }

    async fn get_by_id(&self, ctx: &RequestContext, id: &RecipeId) -> Result<Recipe> {
        let recipes = self.snapshot(ctx).await?;
        recipes
            .iter()
            .find(|recipe| recipe.id == *id)
            .cloned()
            .ok_or_else(|| RepositoryError::recipe_not_found(id.as_str()))
    }

    async fn get_all(&self, ctx: &RequestContext) -> Result<Vec<Recipe>> {
        let recipes = self.snapshot(ctx).await?;
        Ok(recipes.as_ref().clone())
    }

    async fn update(&self, ctx: &RequestContext, recipe: &Recipe) -> Result<Recipe> {
        ctx.check()?;
        let mut state = ctx.run(self.state.write()).await?;

        let index = find_index(ctx, &state.recipes, &recipe.id)?
            .ok_or_else(|| RepositoryError::recipe_not_found(recipe.id.as_str()))?;

        let stored = &state.recipes[index];
        let updated = Recipe {
            id: stored.id.clone(),
            name: recipe.name.clone(),
            tags: recipe.tags.clone(),
            ingredients: recipe.ingredients.clone(),
            instructions: recipe.instructions.clone(),
            published_at: stored.published_at,
        };

        let mut next = state.recipes.to_vec();
        next[index] = updated.clone();

        let version = self.commit(&mut state, next)?;

        tracing::debug!(recipe_id = %updated.id, name = %updated.name, version, "Recipe updated");
        Ok(updated)
    }

    async fn delete(&self, ctx: &RequestContext, id: &RecipeId) -> Result<()> {
        ctx.check()?;
        let mut state = ctx.run(self.state.write()).await?;

        let index = find_index(ctx, &state.recipes, id)?
            .ok_or_else(|| RepositoryError::recipe_not_found(id.as_str()))?;

        let mut next = state.recipes.to_vec();
        next.remove(index);

        let version = self.commit(&mut state, next)?;

        tracing::debug!(recipe_id = %id, version, "Recipe deleted");
        Ok(())
    }

    async fn get_by_tag(&self, ctx: &RequestContext, tag: &str) -> Result<Vec<Recipe>> {
        let recipes = self.snapshot(ctx).await?;
        filter_by_tag(ctx, &recipes, tag)
    }
}
