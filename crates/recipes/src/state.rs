//! Composition root.
//!
//! Turns a [`Config`] into a ready-to-use [`AppState`]: opens the selected
//! store, wraps it in the selected cache and hands it to the service layer.

use std::sync::Arc;

use anyhow::{Context, Result};
use recipes_core::context::RequestContext;
use recipes_core::storage::RecipeRepository;

use crate::cache::memory::MemoryCache;
use crate::config::{CacheBackend, Config, RepoType};
use crate::service::RecipeService;
use crate::storage::{CachedRecipeRepository, FileRepository};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub service: RecipeService,
    pub config: Config,
}

impl AppState {
    /// Creates AppState from configuration, connecting every backend.
    pub async fn new(config: Config) -> Result<Self> {
        let repository = build_repository(&config).await?;
        Ok(Self {
            service: RecipeService::new(repository),
            config,
        })
    }

    /// A fresh request context bounded by the configured deadline.
    pub fn request_context(&self) -> RequestContext {
        RequestContext::with_timeout(self.config.request_timeout())
    }
}

/// Builds the repository stack described by `config`.
pub async fn build_repository(config: &Config) -> Result<Arc<dyn RecipeRepository>> {
    let store = build_store(config).await?;
    attach_cache(store, config).await
}

async fn build_store(config: &Config) -> Result<Arc<dyn RecipeRepository>> {
    match config.repo_type {
        RepoType::Memory => {
            let repo = FileRepository::open(&config.data_path)
                .await
                .with_context(|| {
                    format!("Failed to open recipe store {}", config.data_path.display())
                })?;
            Ok(Arc::new(repo))
        }
        RepoType::DynamoDb => dynamodb_store(config).await,
    }
}

#[cfg(feature = "dynamodb")]
async fn dynamodb_store(config: &Config) -> Result<Arc<dyn RecipeRepository>> {
    use crate::storage::DynamoDbRecipeRepository;

    let repo = DynamoDbRecipeRepository::connect(
        config.dynamodb_table_name.clone(),
        config.dynamodb_endpoint.as_deref(),
    )
    .await;

    tracing::info!(table = %repo.table_name(), "Using DynamoDB recipe store");
    Ok(Arc::new(repo))
}

#[cfg(not(feature = "dynamodb"))]
async fn dynamodb_store(_config: &Config) -> Result<Arc<dyn RecipeRepository>> {
    anyhow::bail!("REPO_TYPE=dynamodb requires building with the `dynamodb` feature")
}

async fn attach_cache(
    store: Arc<dyn RecipeRepository>,
    config: &Config,
) -> Result<Arc<dyn RecipeRepository>> {
    match config.cache_backend {
        CacheBackend::None => Ok(store),
        CacheBackend::Memory => {
            tracing::info!(ttl_seconds = config.cache_ttl_seconds, "Using in-memory cache");
            Ok(Arc::new(CachedRecipeRepository::new(
                store,
                Arc::new(MemoryCache::new()),
                config.cache_ttl(),
            )))
        }
        CacheBackend::Redis => redis_cache(store, config).await,
    }
}

#[cfg(feature = "redis")]
async fn redis_cache(
    store: Arc<dyn RecipeRepository>,
    config: &Config,
) -> Result<Arc<dyn RecipeRepository>> {
    use crate::cache::redis_impl::RedisCache;

    let cache = RedisCache::new(&config.redis_url)
        .await
        .with_context(|| format!("Failed to connect to Redis at {}", config.redis_url))?;

    tracing::info!(
        url = %config.redis_url,
        ttl_seconds = config.cache_ttl_seconds,
        "Using Redis cache"
    );
    Ok(Arc::new(CachedRecipeRepository::new(
        store,
        Arc::new(cache),
        config.cache_ttl(),
    )))
}

#[cfg(not(feature = "redis"))]
async fn redis_cache(
    _store: Arc<dyn RecipeRepository>,
    _config: &Config,
) -> Result<Arc<dyn RecipeRepository>> {
    anyhow::bail!("CACHE_BACKEND=redis requires building with the `redis` feature")
}
