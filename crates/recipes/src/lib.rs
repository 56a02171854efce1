//! recipes - storage, caching and search for recipes.
//!
//! The binary in `main.rs` is a thin shell over these modules; the pieces are
//! exposed as a library so they can be composed and tested independently.

pub mod cache;
pub mod cli;
pub mod config;
pub mod output;
pub mod service;
pub mod state;
pub mod storage;

pub use config::{Config, ConfigError};
pub use service::RecipeService;
pub use state::AppState;
