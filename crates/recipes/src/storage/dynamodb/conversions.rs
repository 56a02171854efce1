//! DynamoDB attribute conversion functions.
//!
//! Pure functions for converting between DynamoDB AttributeValue maps and recipes.
//! These are testable in isolation without DynamoDB access.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use chrono::{DateTime, Utc};
use recipes_core::recipe::{Recipe, RecipeId};
use recipes_core::storage::RepositoryError;

use super::keys;

pub const ENTITY_TYPE_RECIPE: &str = "RECIPE";

/// Convert a Recipe to DynamoDB item.
pub fn recipe_to_item(recipe: &Recipe) -> HashMap<String, AttributeValue> {
    let mut item = HashMap::new();

    // Keys
    item.insert(
        "PK".to_string(),
        AttributeValue::S(keys::recipe_pk(&recipe.id)),
    );
    item.insert(
        "SK".to_string(),
        AttributeValue::S(keys::recipe_sk(&recipe.id)),
    );

    // Entity type
    item.insert(
        "entityType".to_string(),
        AttributeValue::S(ENTITY_TYPE_RECIPE.to_string()),
    );

    // Data
    item.insert(
        "id".to_string(),
        AttributeValue::S(recipe.id.as_str().to_string()),
    );
    item.insert("name".to_string(), AttributeValue::S(recipe.name.clone()));
    item.insert("tags".to_string(), string_list(&recipe.tags));
    item.insert("ingredients".to_string(), string_list(&recipe.ingredients));
    item.insert(
        "instructions".to_string(),
        string_list(&recipe.instructions),
    );
    item.insert(
        "publishedAt".to_string(),
        AttributeValue::S(recipe.published_at.to_rfc3339()),
    );

    item
}

/// Convert a DynamoDB item to Recipe.
pub fn item_to_recipe(item: &HashMap<String, AttributeValue>) -> Result<Recipe, RepositoryError> {
    Ok(Recipe {
        id: RecipeId::new(get_string(item, "id")?),
        name: get_string(item, "name")?,
        tags: get_string_list(item, "tags")?,
        ingredients: get_string_list(item, "ingredients")?,
        instructions: get_string_list(item, "instructions")?,
        published_at: get_datetime(item, "publishedAt")?,
    })
}

/// Build a list attribute from strings. Empty lists are valid list values.
pub fn string_list(values: &[String]) -> AttributeValue {
    AttributeValue::L(values.iter().cloned().map(AttributeValue::S).collect())
}

// ============================================================================
// Helper functions
// ============================================================================

/// Get a required string attribute.
fn get_string(
    item: &HashMap<String, AttributeValue>,
    key: &str,
) -> Result<String, RepositoryError> {
    item.get(key)
        .and_then(|v| v.as_s().ok())
        .map(|s| s.to_string())
        .ok_or_else(|| {
            RepositoryError::Serialization(format!("Missing or invalid field: {}", key))
        })
}

/// Get a list-of-strings attribute. A missing or NULL attribute reads as empty.
fn get_string_list(
    item: &HashMap<String, AttributeValue>,
    key: &str,
) -> Result<Vec<String>, RepositoryError> {
    match item.get(key) {
        None | Some(AttributeValue::Null(_)) => Ok(Vec::new()),
        Some(AttributeValue::L(values)) => values
            .iter()
            .map(|v| {
                v.as_s().map(|s| s.to_string()).map_err(|_| {
                    RepositoryError::Serialization(format!("Non-string element in {}", key))
                })
            })
            .collect(),
        Some(_) => Err(RepositoryError::Serialization(format!(
            "Invalid list field: {}",
            key
        ))),
    }
}

/// Get a required datetime attribute (RFC 3339 format).
fn get_datetime(
    item: &HashMap<String, AttributeValue>,
    key: &str,
) -> Result<DateTime<Utc>, RepositoryError> {
    let s = get_string(item, key)?;
    DateTime::parse_from_rfc3339(&s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Serialization(format!("Invalid datetime {}: {}", key, e)))
}
