//! DynamoDB key generation functions.

use recipes_core::recipe::RecipeId;

pub const RECIPE_PREFIX: &str = "RECIPE#";

/// Generate primary key for a Recipe.
///
/// Pattern: `RECIPE#<recipe_id>`
pub fn recipe_pk(id: &RecipeId) -> String {
    format!("{RECIPE_PREFIX}{id}")
}

/// Generate sort key for a Recipe.
///
/// Pattern: `RECIPE#<recipe_id>` (same as PK for single-item queries)
pub fn recipe_sk(id: &RecipeId) -> String {
    format!("{RECIPE_PREFIX}{id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recipe_keys() {
        let id = RecipeId::new("0191c7a2-5f3e-7b4a-9c1d-2e8f6a4b3c21");

        assert_eq!(recipe_pk(&id), "RECIPE#0191c7a2-5f3e-7b4a-9c1d-2e8f6a4b3c21");
        assert_eq!(recipe_sk(&id), recipe_pk(&id));
    }
}
