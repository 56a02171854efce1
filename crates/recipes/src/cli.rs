//! CLI command definitions.

use clap::{Args, Parser, Subcommand, ValueEnum};
use recipes_core::recipe::{NewRecipe, Patch, UpdateRecipeRequest};

/// Store, cache and search recipes.
///
/// Backends are selected through environment variables (`REPO_TYPE`,
/// `DATA_PATH`, `CACHE_BACKEND`, ...).
#[derive(Debug, Parser)]
#[command(name = "recipes")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format.
    #[arg(long, default_value = "pretty")]
    pub format: OutputFormat,

    /// Suppress non-essential output.
    #[arg(long)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Raw JSON output.
    Json,
    /// Human-readable output.
    #[default]
    Pretty,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create an empty store file at DATA_PATH if none exists.
    Init,
    #[command(flatten)]
    Recipes(RecipeCommands),
}

/// Commands that run against an opened recipe store.
#[derive(Debug, Subcommand)]
pub enum RecipeCommands {
    /// List all recipes.
    List,
    /// Get recipe by ID.
    Get {
        /// Recipe ID.
        id: String,
    },
    /// Create a new recipe.
    Create(CreateArgs),
    /// Update fields of an existing recipe.
    Update(UpdateArgs),
    /// Delete recipe by ID.
    Delete {
        /// Recipe ID.
        id: String,
    },
    /// List recipes carrying a tag.
    Search {
        /// Tag to match exactly.
        #[arg(long)]
        tag: String,
    },
}

#[derive(Debug, Args)]
pub struct CreateArgs {
    /// Recipe name.
    #[arg(long)]
    pub name: String,
    /// Tag (repeatable).
    #[arg(long = "tag")]
    pub tags: Vec<String>,
    /// Ingredient (repeatable).
    #[arg(long = "ingredient")]
    pub ingredients: Vec<String>,
    /// Instruction step (repeatable, in order).
    #[arg(long = "instruction")]
    pub instructions: Vec<String>,
}

impl From<CreateArgs> for NewRecipe {
    fn from(args: CreateArgs) -> Self {
        NewRecipe::new(args.name)
            .with_tags(args.tags)
            .with_ingredients(args.ingredients)
            .with_instructions(args.instructions)
    }
}

/// Only the fields named on the command line change. Passing any `--tag`
/// replaces the whole tag list; `--clear-tags` alone empties it.
#[derive(Debug, Args)]
pub struct UpdateArgs {
    /// Recipe ID.
    pub id: String,
    /// New name.
    #[arg(long)]
    pub name: Option<String>,
    /// Replacement tag (repeatable).
    #[arg(long = "tag")]
    pub tags: Vec<String>,
    /// Remove every tag.
    #[arg(long)]
    pub clear_tags: bool,
    /// Replacement ingredient (repeatable).
    #[arg(long = "ingredient")]
    pub ingredients: Vec<String>,
    /// Remove every ingredient.
    #[arg(long)]
    pub clear_ingredients: bool,
    /// Replacement instruction step (repeatable).
    #[arg(long = "instruction")]
    pub instructions: Vec<String>,
    /// Remove every instruction.
    #[arg(long)]
    pub clear_instructions: bool,
}

impl UpdateArgs {
    /// Splits the arguments into the target id and the patch to apply.
    pub fn into_request(self) -> (String, UpdateRecipeRequest) {
        let request = UpdateRecipeRequest {
            name: self.name.into(),
            tags: list_patch(self.tags, self.clear_tags),
            ingredients: list_patch(self.ingredients, self.clear_ingredients),
            instructions: list_patch(self.instructions, self.clear_instructions),
        };
        (self.id, request)
    }
}

fn list_patch(values: Vec<String>, clear: bool) -> Patch<Vec<String>> {
    if clear || !values.is_empty() {
        Patch::Set(values)
    } else {
        Patch::Unchanged
    }
}
