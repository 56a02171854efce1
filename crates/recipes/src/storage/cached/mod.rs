//! Cached repository decorators.
//!
//! This module provides decorator implementations that wrap repository traits
//! with caching behavior. The decorators implement the cache-aside pattern:
//!
//! - **Reads**: Check cache first, on miss fetch from repository and populate cache
//! - **Writes**: Persist to repository, then populate or invalidate cache
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! let repo = Arc::new(FileRepository::open("data/recipe.json").await?);
//! let cache = Arc::new(MemoryCache::new());
//!
//! let cached_repo = CachedRecipeRepository::new(repo, cache, Duration::from_secs(1800));
//! ```

mod recipe;

pub use recipe::CachedRecipeRepository;
