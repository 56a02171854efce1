use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::serde::deserialize_null_as_empty;

/// Opaque recipe identifier.
///
/// Identifiers are generated by the store at creation time and never supplied
/// by callers. Generated values are UUIDv7 strings, so they sort by creation
/// time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipeId(String);

impl RecipeId {
    /// Generates a new time-ordered identifier.
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Wraps an existing identifier token.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecipeId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for RecipeId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A stored recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: RecipeId,
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_null_as_empty")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_null_as_empty")]
    pub ingredients: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_null_as_empty")]
    pub instructions: Vec<String>,
    /// Assigned once at creation; updates never change it.
    pub published_at: DateTime<Utc>,
}

impl Recipe {
    /// Builds the stored form of a new recipe with a fresh id and timestamp.
    pub fn from_new(recipe: NewRecipe, published_at: DateTime<Utc>) -> Self {
        Self {
            id: RecipeId::generate(),
            name: recipe.name,
            tags: recipe.tags,
            ingredients: recipe.ingredients,
            instructions: recipe.instructions,
            published_at,
        }
    }

    /// Returns true if the recipe carries the given tag (exact match).
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Sets a specific ID for this recipe (useful for testing).
    pub fn with_id(mut self, id: impl Into<RecipeId>) -> Self {
        self.id = id.into();
        self
    }
}

/// Creation payload for a recipe.
///
/// It carries no identifier or timestamp: both are assigned by the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRecipe {
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_null_as_empty")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_null_as_empty")]
    pub ingredients: Vec<String>,
    #[serde(default, deserialize_with = "deserialize_null_as_empty")]
    pub instructions: Vec<String>,
}

impl NewRecipe {
    /// Creates a new recipe payload with just a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_ingredients<I, S>(mut self, ingredients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ingredients = ingredients.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_instructions<I, S>(mut self, instructions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.instructions = instructions.into_iter().map(Into::into).collect();
        self
    }
}

impl From<Recipe> for NewRecipe {
    fn from(recipe: Recipe) -> Self {
        Self {
            name: recipe.name,
            tags: recipe.tags,
            ingredients: recipe.ingredients,
            instructions: recipe.instructions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_timestamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 10, 30, 0).unwrap()
    }

    #[test]
    fn test_generated_ids_are_unique_and_ordered() {
        let first = RecipeId::generate();
        let second = RecipeId::generate();
        assert_ne!(first, second);
        assert!(first < second);
    }

    #[test]
    fn test_recipe_json_field_names() {
        let recipe = Recipe::from_new(
            NewRecipe::new("Pasta").with_tags(["dinner"]),
            fixed_timestamp(),
        )
        .with_id("abc");

        let value = serde_json::to_value(&recipe).unwrap();
        assert_eq!(value["id"], "abc");
        assert_eq!(value["name"], "Pasta");
        assert_eq!(value["tags"], serde_json::json!(["dinner"]));
        assert_eq!(value["ingredients"], serde_json::json!([]));
        assert_eq!(value["publishedAt"], "2024-06-15T10:30:00Z");
    }

    #[test]
    fn test_recipe_null_sequences_decode_as_empty() {
        let json = r#"{
            "id": "abc",
            "name": "Toast",
            "tags": null,
            "instructions": null,
            "publishedAt": "2024-06-15T10:30:00Z"
        }"#;

        let recipe: Recipe = serde_json::from_str(json).unwrap();
        assert!(recipe.tags.is_empty());
        assert!(recipe.ingredients.is_empty());
        assert!(recipe.instructions.is_empty());
        assert_eq!(recipe.published_at, fixed_timestamp());
    }

    #[test]
    fn test_new_recipe_ignores_identity_fields() {
        let json = r#"{"id": "client-chosen", "name": "Soup", "tags": ["lunch"]}"#;
        let recipe: NewRecipe = serde_json::from_str(json).unwrap();
        assert_eq!(recipe, NewRecipe::new("Soup").with_tags(["lunch"]));
    }

    #[test]
    fn test_has_tag_is_exact() {
        let recipe = Recipe::from_new(
            NewRecipe::new("Pasta").with_tags(["dinner"]),
            fixed_timestamp(),
        );
        assert!(recipe.has_tag("dinner"));
        assert!(!recipe.has_tag("Dinner"));
        assert!(!recipe.has_tag("din"));
    }
}
