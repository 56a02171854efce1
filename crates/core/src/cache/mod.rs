mod client;
mod error;
mod keys;
mod serialization;
mod traits;

pub use client::RecipeCache;
pub use error::{CacheError, Result};
pub use keys::{recipe_key, RECIPE_KEY_PREFIX};
pub use serialization::{deserialize_recipe, serialize_recipe};
pub use traits::Cache;
