//! recipes CLI entry point.

use anyhow::{bail, Result};
use clap::Parser;
use recipes::cli::{Cli, Commands, OutputFormat, RecipeCommands};
use recipes::config::{Config, RepoType};
use recipes::output::{format_output, pretty};
use recipes::state::AppState;
use recipes::storage::FileRepository;
use recipes_core::recipe::{NewRecipe, RecipeId};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays machine readable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "recipes=info,recipes_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::from_env()?;

    match cli.command {
        Commands::Init => init(&config, cli.quiet).await,
        Commands::Recipes(command) => {
            let state = AppState::new(config).await?;
            run(&state, command, cli.format, cli.quiet).await
        }
    }
}

/// Runs one store command under the configured request deadline.
async fn run(
    state: &AppState,
    command: RecipeCommands,
    format: OutputFormat,
    quiet: bool,
) -> Result<()> {
    let ctx = state.request_context();
    let service = &state.service;

    match command {
        RecipeCommands::List => {
            let recipes = service.list_recipes(&ctx).await?;
            match format {
                OutputFormat::Json => println!("{}", format_output(&recipes, format)),
                OutputFormat::Pretty => println!("{}", pretty::format_recipes(&recipes)),
            }
        }
        RecipeCommands::Get { id } => {
            let recipe = service.get_recipe(&ctx, &RecipeId::new(id)).await?;
            match format {
                OutputFormat::Json => println!("{}", format_output(&recipe, format)),
                OutputFormat::Pretty => println!("{}", pretty::format_recipe(&recipe)),
            }
        }
        RecipeCommands::Create(args) => {
            let recipe = service.create_recipe(&ctx, NewRecipe::from(args)).await?;
            match format {
                OutputFormat::Json => println!("{}", format_output(&recipe, format)),
                OutputFormat::Pretty => {
                    println!("Created:\n{}", pretty::format_recipe(&recipe))
                }
            }
        }
        RecipeCommands::Update(args) => {
            let (id, request) = args.into_request();
            let recipe = service
                .update_recipe(&ctx, &RecipeId::new(id), request)
                .await?;
            match format {
                OutputFormat::Json => println!("{}", format_output(&recipe, format)),
                OutputFormat::Pretty => {
                    println!("Updated:\n{}", pretty::format_recipe(&recipe))
                }
            }
        }
        RecipeCommands::Delete { id } => {
            let id = RecipeId::new(id);
            service.delete_recipe(&ctx, &id).await?;
            if !quiet {
                println!("Deleted recipe {}", id);
            }
        }
        RecipeCommands::Search { tag } => {
            let recipes = service.search_by_tag(&ctx, &tag).await?;
            match format {
                OutputFormat::Json => println!("{}", format_output(&recipes, format)),
                OutputFormat::Pretty => println!("{}", pretty::format_recipes(&recipes)),
            }
        }
    }

    Ok(())
}

/// Creates the JSON store file if it does not exist yet.
async fn init(config: &Config, quiet: bool) -> Result<()> {
    if config.repo_type != RepoType::Memory {
        bail!("init only applies to the file-backed store (REPO_TYPE=memory)");
    }

    let repo = FileRepository::open_or_init(&config.data_path).await?;
    if !quiet {
        println!("Recipe store ready at {}", repo.path().display());
    }
    Ok(())
}
