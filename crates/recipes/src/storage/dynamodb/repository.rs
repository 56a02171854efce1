//! DynamoDB repository implementation.
//!
//! Implements [`RecipeRepository`] from `recipes_core::storage` using DynamoDB.
//! Every SDK call runs under the caller's [`RequestContext`], so a cancelled or
//! expired context abandons the in-flight request.

use async_trait::async_trait;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use aws_sdk_dynamodb::Client;
use chrono::Utc;

use recipes_core::context::RequestContext;
use recipes_core::recipe::{NewRecipe, Recipe, RecipeId};
use recipes_core::storage::{RecipeRepository, RepositoryError, Result};

use super::conversions::{item_to_recipe, recipe_to_item, string_list, ENTITY_TYPE_RECIPE};
use super::error::{
    map_delete_item_error, map_get_item_error, map_put_item_error, map_scan_error,
    map_update_item_error,
};
use super::keys;

/// DynamoDB-based recipe repository.
pub struct DynamoDbRecipeRepository {
    client: Client,
    table_name: String,
}

impl DynamoDbRecipeRepository {
    /// Creates a new repository with the given DynamoDB client and table name.
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    /// Creates a repository using the AWS SDK default credential chain.
    ///
    /// `endpoint` overrides the service endpoint, for DynamoDB Local and similar.
    pub async fn connect(table_name: impl Into<String>, endpoint: Option<&str>) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
        if let Some(url) = endpoint {
            loader = loader.endpoint_url(url);
        }
        let config = loader.load().await;
        Self::new(Client::new(&config), table_name)
    }

    /// Get the table name.
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    /// Scans every recipe item, following pagination until the table is
    /// exhausted. The context is checked before each page.
    async fn scan_recipes(&self, ctx: &RequestContext, tag: Option<&str>) -> Result<Vec<Recipe>> {
        let mut recipes = Vec::new();
        let mut start_key = None;

        loop {
            ctx.check()?;

            let mut request = self
                .client
                .scan()
                .table_name(&self.table_name)
                .expression_attribute_names("#entityType", "entityType")
                .expression_attribute_values(
                    ":entityType",
                    AttributeValue::S(ENTITY_TYPE_RECIPE.to_string()),
                )
                .set_exclusive_start_key(start_key.take());

            request = match tag {
                Some(tag) => request
                    .filter_expression("#entityType = :entityType AND contains(#tags, :tag)")
                    .expression_attribute_names("#tags", "tags")
                    .expression_attribute_values(":tag", AttributeValue::S(tag.to_string())),
                None => request.filter_expression("#entityType = :entityType"),
            };

            let page = ctx.run(request.send()).await?.map_err(map_scan_error)?;

            for item in page.items.unwrap_or_default() {
                recipes.push(item_to_recipe(&item)?);
            }

            match page.last_evaluated_key {
                Some(key) if !key.is_empty() => start_key = Some(key),
                _ => break,
            }
        }

        // Scan order is arbitrary; keep listings stable for callers
        recipes.sort_by(|a, b| {
            a.published_at
                .cmp(&b.published_at)
                .then_with(|| a.id.cmp(&b.id))
        });

        Ok(recipes)
    }
}

#[async_trait]
impl RecipeRepository for DynamoDbRecipeRepository {
    async fn create(&self, ctx: &RequestContext, recipe: &NewRecipe) -> Result<Recipe> {
        ctx.check()?;
        let recipe = Recipe::from_new(recipe.clone(), Utc::now());
        let item = recipe_to_item(&recipe);

        let request = self
            .client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .condition_expression("attribute_not_exists(PK)")
            .send();

        ctx.run(request)
            .await?
            .map_err(|e| map_put_item_error(e, recipe.id.as_str()))?;

        tracing::debug!(recipe_id = %recipe.id, table = %self.table_name, "Created recipe");
        Ok(recipe)
    }

    async fn get_by_id(&self, ctx: &RequestContext, id: &RecipeId) -> Result<Recipe> {
        ctx.check()?;
        let request = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key("PK", AttributeValue::S(keys::recipe_pk(id)))
            .key("SK", AttributeValue::S(keys::recipe_sk(id)))
            .send();

        let result = ctx.run(request).await?.map_err(map_get_item_error)?;

        match result.item {
            Some(item) => item_to_recipe(&item),
            None => Err(RepositoryError::recipe_not_found(id.as_str())),
        }
    }

    async fn get_all(&self, ctx: &RequestContext) -> Result<Vec<Recipe>> {
        self.scan_recipes(ctx, None).await
    }

    async fn update(&self, ctx: &RequestContext, recipe: &Recipe) -> Result<Recipe> {
        ctx.check()?;
        let request = self
            .client
            .update_item()
            .table_name(&self.table_name)
            .key("PK", AttributeValue::S(keys::recipe_pk(&recipe.id)))
            .key("SK", AttributeValue::S(keys::recipe_sk(&recipe.id)))
            .update_expression(
                "SET #name = :name, #tags = :tags, #ingredients = :ingredients, \
                 #instructions = :instructions",
            )
            .condition_expression("attribute_exists(PK)")
            .expression_attribute_names("#name", "name")
            .expression_attribute_names("#tags", "tags")
            .expression_attribute_names("#ingredients", "ingredients")
            .expression_attribute_names("#instructions", "instructions")
            .expression_attribute_values(":name", AttributeValue::S(recipe.name.clone()))
            .expression_attribute_values(":tags", string_list(&recipe.tags))
            .expression_attribute_values(":ingredients", string_list(&recipe.ingredients))
            .expression_attribute_values(":instructions", string_list(&recipe.instructions))
            .return_values(ReturnValue::AllNew)
            .send();

        let result = ctx
            .run(request)
            .await?
            .map_err(|e| map_update_item_error(e, recipe.id.as_str()))?;

        let attributes = result.attributes.ok_or_else(|| {
            RepositoryError::Persistence("UpdateItem returned no attributes".to_string())
        })?;

        tracing::debug!(recipe_id = %recipe.id, table = %self.table_name, "Updated recipe");
        item_to_recipe(&attributes)
    }

    async fn delete(&self, ctx: &RequestContext, id: &RecipeId) -> Result<()> {
        ctx.check()?;
        let request = self
            .client
            .delete_item()
            .table_name(&self.table_name)
            .key("PK", AttributeValue::S(keys::recipe_pk(id)))
            .key("SK", AttributeValue::S(keys::recipe_sk(id)))
            .condition_expression("attribute_exists(PK)")
            .send();

        ctx.run(request)
            .await?
            .map_err(|e| map_delete_item_error(e, id.as_str()))?;

        tracing::debug!(recipe_id = %id, table = %self.table_name, "Deleted recipe");
        Ok(())
    }

    async fn get_by_tag(&self, ctx: &RequestContext, tag: &str) -> Result<Vec<Recipe>> {
        self.scan_recipes(ctx, Some(tag)).await
    }
}

#[cfg(test)]
mod tests {
    //! These tests need a reachable DynamoDB endpoint (e.g. DynamoDB Local)
    //! named by `DYNAMODB_ENDPOINT`; they are skipped otherwise.

    use super::*;
    use aws_sdk_dynamodb::config::{Credentials, Region};
    use aws_sdk_dynamodb::types::{
        AttributeDefinition, BillingMode, KeySchemaElement, KeyType, ScalarAttributeType,
    };
    use std::time::Duration;

    /// Skip test if no DynamoDB endpoint is configured.
    async fn get_test_repository() -> Option<DynamoDbRecipeRepository> {
        let endpoint = std::env::var("DYNAMODB_ENDPOINT").ok()?;
        let config = aws_sdk_dynamodb::Config::builder()
            .behavior_version(aws_sdk_dynamodb::config::BehaviorVersion::latest())
            .endpoint_url(endpoint)
            .region(Region::new("us-east-1"))
            .credentials_provider(Credentials::new("test", "test", None, None, "test"))
            .build();
        let client = Client::from_conf(config);

        let table_name = format!("recipes-test-{}", RecipeId::generate());
        client
            .create_table()
            .table_name(&table_name)
            .billing_mode(BillingMode::PayPerRequest)
            .attribute_definitions(
                AttributeDefinition::builder()
                    .attribute_name("PK")
                    .attribute_type(ScalarAttributeType::S)
                    .build()
                    .ok()?,
            )
            .attribute_definitions(
                AttributeDefinition::builder()
                    .attribute_name("SK")
                    .attribute_type(ScalarAttributeType::S)
                    .build()
                    .ok()?,
            )
            .key_schema(
                KeySchemaElement::builder()
                    .attribute_name("PK")
                    .key_type(KeyType::Hash)
                    .build()
                    .ok()?,
            )
            .key_schema(
                KeySchemaElement::builder()
                    .attribute_name("SK")
                    .key_type(KeyType::Range)
                    .build()
                    .ok()?,
            )
            .send()
            .await
            .ok()?;

        Some(DynamoDbRecipeRepository::new(client, table_name))
    }

    fn ctx() -> RequestContext {
        RequestContext::with_timeout(Duration::from_secs(10))
    }

    #[tokio::test]
    async fn test_dynamodb_crud() {
        let Some(repo) = get_test_repository().await else {
            eprintln!("Skipping test: DynamoDB not available");
            return;
        };
        let ctx = ctx();

        let created = repo
            .create(
                &ctx,
                &NewRecipe::new("Ramen")
                    .with_tags(["dinner", "noodles"])
                    .with_ingredients(["noodles", "broth"]),
            )
            .await
            .unwrap();

        let fetched = repo.get_by_id(&ctx, &created.id).await.unwrap();
        assert_eq!(fetched, created);

        let mut changed = created.clone();
        changed.name = "Spicy Ramen".to_string();
        changed.tags = vec!["dinner".to_string()];
        let updated = repo.update(&ctx, &changed).await.unwrap();
        assert_eq!(updated.name, "Spicy Ramen");
        assert_eq!(updated.published_at, created.published_at);

        repo.delete(&ctx, &created.id).await.unwrap();
        assert!(repo
            .get_by_id(&ctx, &created.id)
            .await
            .unwrap_err()
            .is_not_found());
    }

    #[tokio::test]
    async fn test_dynamodb_missing_items_are_not_found() {
        let Some(repo) = get_test_repository().await else {
            eprintln!("Skipping test: DynamoDB not available");
            return;
        };
        let ctx = ctx();
        let ghost = Recipe::from_new(NewRecipe::new("Ghost"), Utc::now());

        assert!(repo.get_by_id(&ctx, &ghost.id).await.unwrap_err().is_not_found());
        assert!(repo.update(&ctx, &ghost).await.unwrap_err().is_not_found());
        assert!(repo.delete(&ctx, &ghost.id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_dynamodb_get_by_tag() {
        let Some(repo) = get_test_repository().await else {
            eprintln!("Skipping test: DynamoDB not available");
            return;
        };
        let ctx = ctx();

        let soup = repo
            .create(&ctx, &NewRecipe::new("Soup").with_tags(["dinner"]))
            .await
            .unwrap();
        repo.create(&ctx, &NewRecipe::new("Oats").with_tags(["breakfast"]))
            .await
            .unwrap();

        let dinner = repo.get_by_tag(&ctx, "dinner").await.unwrap();
        assert_eq!(dinner, vec![soup]);

        assert!(repo.get_by_tag(&ctx, "dessert").await.unwrap().is_empty());
        assert_eq!(repo.get_all(&ctx).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_dynamodb_cancelled_context() {
        let Some(repo) = get_test_repository().await else {
            eprintln!("Skipping test: DynamoDB not available");
            return;
        };
        let ctx = RequestContext::background();
        ctx.cancel();

        let err = repo.create(&ctx, &NewRecipe::new("Never")).await.unwrap_err();
        assert_eq!(err, RepositoryError::Cancelled);
        assert!(repo.get_all(&RequestContext::background()).await.unwrap().is_empty());
    }
}
