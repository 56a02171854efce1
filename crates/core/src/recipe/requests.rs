//! Request types for recipe operations.
//!
//! Following the Functional Core pattern, these are pure data types with no I/O.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::types::Recipe;

/// A field in a partial update.
///
/// A field that is omitted and a field that is explicitly `null` both decode
/// to [`Patch::Unchanged`]. Callers cannot clear a field to "absent"; an empty
/// list is sent as `[]`, which decodes to `Patch::Set(vec![])`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Patch<T> {
    #[default]
    Unchanged,
    Set(T),
}

impl<T> Patch<T> {
    pub fn is_unchanged(&self) -> bool {
        matches!(self, Patch::Unchanged)
    }

    /// Writes the new value into `target` when one is set.
    pub fn apply(self, target: &mut T) {
        if let Patch::Set(value) = self {
            *target = value;
        }
    }
}

impl<T> From<Option<T>> for Patch<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Patch::Set(v),
            None => Patch::Unchanged,
        }
    }
}

impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Patch::from)
    }
}

impl<T> Serialize for Patch<T>
where
    T: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Patch::Set(value) => serializer.serialize_some(value),
            Patch::Unchanged => serializer.serialize_none(),
        }
    }
}

/// Request payload for updating a recipe.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateRecipeRequest {
    #[serde(default, skip_serializing_if = "Patch::is_unchanged")]
    pub name: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_unchanged")]
    pub tags: Patch<Vec<String>>,
    #[serde(default, skip_serializing_if = "Patch::is_unchanged")]
    pub ingredients: Patch<Vec<String>>,
    #[serde(default, skip_serializing_if = "Patch::is_unchanged")]
    pub instructions: Patch<Vec<String>>,
}

impl UpdateRecipeRequest {
    /// Create an empty update request.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Patch::Set(name.into());
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = Patch::Set(tags);
        self
    }

    pub fn with_ingredients(mut self, ingredients: Vec<String>) -> Self {
        self.ingredients = Patch::Set(ingredients);
        self
    }

    pub fn with_instructions(mut self, instructions: Vec<String>) -> Self {
        self.instructions = Patch::Set(instructions);
        self
    }

    /// Returns true if no field would change.
    pub fn is_empty(&self) -> bool {
        self.name.is_unchanged()
            && self.tags.is_unchanged()
            && self.ingredients.is_unchanged()
            && self.instructions.is_unchanged()
    }

    /// Apply updates to an existing recipe.
    ///
    /// Identity and `published_at` are never touched.
    pub fn apply_to(self, recipe: &mut Recipe) {
        self.name.apply(&mut recipe.name);
        self.tags.apply(&mut recipe.tags);
        self.ingredients.apply(&mut recipe.ingredients);
        self.instructions.apply(&mut recipe.instructions);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe::NewRecipe;
    use chrono::{TimeZone, Utc};

    fn sample_recipe() -> Recipe {
        Recipe::from_new(
            NewRecipe::new("Pancakes")
                .with_tags(["breakfast"])
                .with_ingredients(["flour", "milk"])
                .with_instructions(["mix", "fry"]),
            Utc.with_ymd_and_hms(2024, 1, 15, 8, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_missing_and_null_are_unchanged() {
        let missing: UpdateRecipeRequest = serde_json::from_str(r#"{}"#).unwrap();
        let null: UpdateRecipeRequest =
            serde_json::from_str(r#"{"name": null, "tags": null}"#).unwrap();

        assert!(missing.is_empty());
        assert!(null.is_empty());
        assert_eq!(missing, null);
    }

    #[test]
    fn test_empty_list_is_set() {
        let request: UpdateRecipeRequest = serde_json::from_str(r#"{"tags": []}"#).unwrap();
        assert_eq!(request.tags, Patch::Set(vec![]));
        assert!(request.name.is_unchanged());
    }

    #[test]
    fn test_apply_to_merges_only_set_fields() {
        let mut recipe = sample_recipe();
        let original = recipe.clone();

        UpdateRecipeRequest::new()
            .with_name("Crepes")
            .with_tags(vec![])
            .apply_to(&mut recipe);

        assert_eq!(recipe.name, "Crepes");
        assert!(recipe.tags.is_empty());
        assert_eq!(recipe.ingredients, original.ingredients);
        assert_eq!(recipe.instructions, original.instructions);
        assert_eq!(recipe.id, original.id);
        assert_eq!(recipe.published_at, original.published_at);
    }

    #[test]
    fn test_serialize_skips_unchanged_fields() {
        let request = UpdateRecipeRequest::new().with_name("Crepes");
        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(json, r#"{"name":"Crepes"}"#);
    }
}
