//! Storage layer implementations.
//!
//! Provides concrete implementations of the repository traits defined in
//! `recipes_core::storage`.
//!
//! # Backends
//!
//! - `file`: concurrent in-process store written through to a JSON file
//! - `dynamodb`: DynamoDB table (requires the `dynamodb` feature)
//! - `cached`: cache-aside decorator that wraps any backend

pub mod cached;
pub mod file;

#[cfg(feature = "dynamodb")]
pub mod dynamodb;

pub use cached::CachedRecipeRepository;
#[cfg(feature = "dynamodb")]
pub use dynamodb::DynamoDbRecipeRepository;
pub use file::FileRepository;
