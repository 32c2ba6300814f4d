//! Recipe creation, editing, deletion and listing.

use std::collections::HashSet;
use std::sync::Arc;

use crate::domain::entities::{NewRecipe, Recipe, RecipeDetails, RecipeFilter};
use crate::domain::repositories::{IngredientRepository, RecipeRepository, TagRepository};
use crate::error::AppError;
use crate::utils::image::validate_data_url;
use serde_json::json;
use tracing::info;

/// Service for recipes.
///
/// Field ranges are checked by the request DTOs. This service checks the tag
/// and ingredient lists against the catalog and restricts edits to the author.
pub struct RecipeService<R, T, I>
where
    R: RecipeRepository,
    T: TagRepository,
    I: IngredientRepository,
{
    recipes: Arc<R>,
    tags: Arc<T>,
    ingredients: Arc<I>,
}

impl<R, T, I> RecipeService<R, T, I>
where
    R: RecipeRepository,
    T: TagRepository,
    I: IngredientRepository,
{
    pub fn new(recipes: Arc<R>, tags: Arc<T>, ingredients: Arc<I>) -> Self {
        Self {
            recipes,
            tags,
            ingredients,
        }
    }

    /// Publishes a recipe and returns it as seen by its author.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if tags or ingredients are empty or
    /// repeated, or the image is not a base64 image data URL.
    /// Returns [`AppError::NotFound`] if a tag or ingredient id is unknown.
    /// Returns [`AppError::Conflict`] if the author already has a recipe with this name.
    pub async fn create(
        &self,
        author_id: i64,
        recipe: NewRecipe,
    ) -> Result<RecipeDetails, AppError> {
        self.validate(&recipe).await?;

        let id = self.recipes.create(author_id, recipe).await?;
        info!(recipe_id = id, author_id, "Recipe created");

        self.get(id, Some(author_id)).await
    }

    /// Replaces a recipe's contents.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the recipe does not exist.
    /// Returns [`AppError::Forbidden`] if `user_id` is not the author.
    /// Otherwise the same as [`Self::create`].
    pub async fn update(
        &self,
        user_id: i64,
        recipe_id: i64,
        recipe: NewRecipe,
    ) -> Result<RecipeDetails, AppError> {
        self.owned_recipe(user_id, recipe_id).await?;
        self.validate(&recipe).await?;

        self.recipes.update(recipe_id, recipe).await?;
        info!(recipe_id, "Recipe updated");

        self.get(recipe_id, Some(user_id)).await
    }

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the recipe does not exist.
    /// Returns [`AppError::Forbidden`] if `user_id` is not the author.
    pub async fn delete(&self, user_id: i64, recipe_id: i64) -> Result<(), AppError> {
        self.owned_recipe(user_id, recipe_id).await?;

        if !self.recipes.delete(recipe_id).await? {
            return Err(recipe_not_found(recipe_id));
        }
        info!(recipe_id, "Recipe deleted");
        Ok(())
    }

    /// Loads a full recipe for `viewer`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the recipe does not exist.
    pub async fn get(&self, id: i64, viewer: Option<i64>) -> Result<RecipeDetails, AppError> {
        let card = self
            .recipes
            .find_card(id, viewer)
            .await?
            .ok_or_else(|| recipe_not_found(id))?;

        let tags = self.recipes.tags_of(id).await?;
        let ingredients = self.recipes.ingredient_lines(id).await?;

        Ok(RecipeDetails {
            card,
            tags,
            ingredients,
        })
    }

    /// Returns one page of recipes matching `filter` and the total match count.
    pub async fn list(
        &self,
        filter: RecipeFilter,
        viewer: Option<i64>,
        limit: i64,
        offset: i64,
    ) -> Result<(Vec<RecipeDetails>, i64), AppError> {
        let cards = self
            .recipes
            .list_cards(filter.clone(), viewer, limit, offset)
            .await?;
        let count = self.recipes.count(filter).await?;

        let mut results = Vec::with_capacity(cards.len());
        for card in cards {
            let id = card.recipe.id;
            results.push(RecipeDetails {
                card,
                tags: self.recipes.tags_of(id).await?,
                ingredients: self.recipes.ingredient_lines(id).await?,
            });
        }

        Ok((results, count))
    }

    async fn owned_recipe(&self, user_id: i64, recipe_id: i64) -> Result<Recipe, AppError> {
        let recipe = self
            .recipes
            .find_by_id(recipe_id)
            .await?
            .ok_or_else(|| recipe_not_found(recipe_id))?;

        if !recipe.is_owned_by(user_id) {
            return Err(AppError::forbidden(
                "Only the author can change this recipe",
                json!({ "id": recipe_id }),
            ));
        }
        Ok(recipe)
    }

    async fn validate(&self, recipe: &NewRecipe) -> Result<(), AppError> {
        validate_data_url("image", &recipe.image)?;

        if recipe.tags.is_empty() {
            return Err(AppError::bad_request(
                "At least one tag is required",
                json!({ "field": "tags" }),
            ));
        }
        if let Some(id) = first_duplicate(recipe.tags.iter().copied()) {
            return Err(AppError::bad_request(
                "Tags must not repeat",
                json!({ "field": "tags", "id": id }),
            ));
        }

        if recipe.ingredients.is_empty() {
            return Err(AppError::bad_request(
                "At least one ingredient is required",
                json!({ "field": "ingredients" }),
            ));
        }
        let ingredient_ids: Vec<i64> = recipe
            .ingredients
            .iter()
            .map(|line| line.ingredient_id)
            .collect();
        if let Some(id) = first_duplicate(ingredient_ids.iter().copied()) {
            return Err(AppError::bad_request(
                "Ingredients must not repeat",
                json!({ "field": "ingredients", "id": id }),
            ));
        }

        let known_tags: HashSet<i64> = self
            .tags
            .find_by_ids(&recipe.tags)
            .await?
            .into_iter()
            .map(|tag| tag.id)
            .collect();
        let missing_tags: Vec<i64> = recipe
            .tags
            .iter()
            .copied()
            .filter(|id| !known_tags.contains(id))
            .collect();
        if !missing_tags.is_empty() {
            return Err(AppError::not_found(
                "Tag not found",
                json!({ "ids": missing_tags }),
            ));
        }

        let known_ingredients: HashSet<i64> = self
            .ingredients
            .find_by_ids(&ingredient_ids)
            .await?
            .into_iter()
            .map(|ingredient| ingredient.id)
            .collect();
        let missing_ingredients: Vec<i64> = ingredient_ids
            .into_iter()
            .filter(|id| !known_ingredients.contains(id))
            .collect();
        if !missing_ingredients.is_empty() {
            return Err(AppError::not_found(
                "Ingredient not found",
                json!({ "ids": missing_ingredients }),
            ));
        }

        Ok(())
    }
}

fn recipe_not_found(id: i64) -> AppError {
    AppError::not_found("Recipe not found", json!({ "id": id }))
}

fn first_duplicate(ids: impl IntoIterator<Item = i64>) -> Option<i64> {
    let mut seen = HashSet::new();
    ids.into_iter().find(|id| !seen.insert(*id))
}
