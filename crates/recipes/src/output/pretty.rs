//! Pretty output formatting.

use recipes_core::recipe::Recipe;

/// Format a recipe for display.
pub fn format_recipe(recipe: &Recipe) -> String {
    let mut output = format!(
        "{}\n  ID: {}\n  Published: {}",
        recipe.name,
        recipe.id,
        recipe.published_at.format("%Y-%m-%d %H:%M UTC")
    );
    if !recipe.tags.is_empty() {
        output.push_str(&format!("\n  Tags: {}", recipe.tags.join(", ")));
    }
    if !recipe.ingredients.is_empty() {
        output.push_str("\n  Ingredients:");
        for ingredient in &recipe.ingredients {
            output.push_str(&format!("\n    - {}", ingredient));
        }
    }
    if !recipe.instructions.is_empty() {
        output.push_str("\n  Instructions:");
        for (step, instruction) in recipe.instructions.iter().enumerate() {
            output.push_str(&format!("\n    {}. {}", step + 1, instruction));
        }
    }
    output
}

/// Format recipes for display.
pub fn format_recipes(recipes: &[Recipe]) -> String {
    if recipes.is_empty() {
        return "No recipes found.".to_string();
    }
    let mut output = format!("RECIPES ({})\n", recipes.len());
    output.push_str(&"-".repeat(40));
    for recipe in recipes {
        output.push_str(&format!("\n{}", format_recipe(recipe)));
        output.push('\n');
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use recipes_core::recipe::{NewRecipe, RecipeId};

    fn sample() -> Recipe {
        Recipe::from_new(
            NewRecipe::new("Pancakes")
                .with_tags(["breakfast", "sweet"])
                .with_ingredients(["flour", "milk"])
                .with_instructions(["Whisk", "Fry"]),
            Utc.with_ymd_and_hms(2024, 3, 1, 8, 30, 0).unwrap(),
        )
        .with_id(RecipeId::new("r-1"))
    }

    #[test]
    fn test_format_recipe() {
        let text = format_recipe(&sample());

        assert_eq!(
            text,
            "Pancakes\n  ID: r-1\n  Published: 2024-03-01 08:30 UTC\n  Tags: breakfast, sweet\
             \n  Ingredients:\n    - flour\n    - milk\n  Instructions:\n    1. Whisk\n    2. Fry"
        );
    }

    #[test]
    fn test_format_recipe_omits_empty_sections() {
        let recipe = Recipe::from_new(NewRecipe::new("Water"), Utc::now());
        let text = format_recipe(&recipe);

        assert!(!text.contains("Tags"));
        assert!(!text.contains("Ingredients"));
        assert!(!text.contains("Instructions"));
    }

    #[test]
    fn test_format_recipes_empty() {
        assert_eq!(format_recipes(&[]), "No recipes found.");
    }

    #[test]
    fn test_format_recipes_header() {
        let text = format_recipes(&[sample(), sample()]);
        assert!(text.starts_with("RECIPES (2)\n"));
    }
}
