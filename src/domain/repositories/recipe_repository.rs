//! Repository trait for recipes and their read models.

use crate::domain::entities::{
    IngredientLine, NewRecipe, Recipe, RecipeCard, RecipeFilter, RecipeSummary, Tag,
};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for recipes.
///
/// Writes replace tag and ingredient links atomically with the recipe row.
/// Read models are resolved for an optional viewer so the favorite and cart
/// flags can be filled in the same query.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgRecipeRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_recipe.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    /// Creates a recipe with its tags and ingredient lines. Returns the new id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the author already has a recipe with this name.
    /// Returns [`AppError::NotFound`] if a referenced tag or ingredient is missing.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, author_id: i64, recipe: NewRecipe) -> Result<i64, AppError>;

    /// Replaces the fields, tags and ingredient lines of recipe `id`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::create`].
    async fn update(&self, id: i64, recipe: NewRecipe) -> Result<(), AppError>;

    /// Deletes a recipe. Returns `false` if it did not exist.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;

    /// Finds a recipe row by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<Recipe>, AppError>;

    /// Returns true if a recipe with this id exists.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn exists(&self, id: i64) -> Result<bool, AppError>;

    /// Loads a recipe with its author profile and viewer flags.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_card(&self, id: i64, viewer: Option<i64>)
    -> Result<Option<RecipeCard>, AppError>;

    /// Lists recipe cards matching `filter`, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_cards(
        &self,
        filter: RecipeFilter,
        viewer: Option<i64>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<RecipeCard>, AppError>;

    /// Counts recipes matching `filter`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn count(&self, filter: RecipeFilter) -> Result<i64, AppError>;

    /// Lists the tags of a recipe ordered by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn tags_of(&self, recipe_id: i64) -> Result<Vec<Tag>, AppError>;

    /// Lists the ingredient lines of a recipe, joined with names and units.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn ingredient_lines(&self, recipe_id: i64) -> Result<Vec<IngredientLine>, AppError>;

    /// Lists an author's recipes newest first, optionally capped at `limit`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn summaries_by_author(
        &self,
        author_id: i64,
        limit: Option<i64>,
    ) -> Result<Vec<RecipeSummary>, AppError>;

    /// Counts an author's recipes.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn count_by_author(&self, author_id: i64) -> Result<i64, AppError>;
}
