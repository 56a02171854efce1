//! DynamoDB storage backend implementation.
//!
//! This module provides a DynamoDB-based implementation of [`RecipeRepository`]
//! using `aws-sdk-dynamodb`. Recipes live in a single table, one item per
//! recipe, keyed by `RECIPE#<id>`.
//!
//! [`RecipeRepository`]: recipes_core::storage::RecipeRepository

mod conversions;
mod error;
mod keys;
mod repository;

pub use repository::DynamoDbRecipeRepository;
