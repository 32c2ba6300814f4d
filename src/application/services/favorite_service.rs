//! Favorite recipes.

use std::sync::Arc;

use crate::domain::entities::RecipeSummary;
use crate::domain::repositories::{FavoriteRepository, RecipeRepository};
use crate::error::AppError;
use serde_json::json;

pub struct FavoriteService<R: RecipeRepository, F: FavoriteRepository> {
    recipes: Arc<R>,
    favorites: Arc<F>,
}

impl<R: RecipeRepository, F: FavoriteRepository> FavoriteService<R, F> {
    pub fn new(recipes: Arc<R>, favorites: Arc<F>) -> Self {
        Self { recipes, favorites }
    }

    /// Marks a recipe as favorite and returns its short form.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the recipe does not exist.
    /// Returns [`AppError::Validation`] if it is already a favorite.
    pub async fn add(&self, user_id: i64, recipe_id: i64) -> Result<RecipeSummary, AppError> {
        let recipe = self
            .recipes
            .find_by_id(recipe_id)
            .await?
            .ok_or_else(|| AppError::not_found("Recipe not found", json!({ "id": recipe_id })))?;

        if !self.favorites.add(user_id, recipe_id).await? {
            return Err(AppError::bad_request(
                "Recipe is already in favorites",
                json!({ "id": recipe_id }),
            ));
        }

        Ok(RecipeSummary::from(&recipe))
    }

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the recipe does not exist or is not a favorite.
    pub async fn remove(&self, user_id: i64, recipe_id: i64) -> Result<(), AppError> {
        if !self.recipes.exists(recipe_id).await? {
            return Err(AppError::not_found(
                "Recipe not found",
                json!({ "id": recipe_id }),
            ));
        }

        if !self.favorites.remove(user_id, recipe_id).await? {
            return Err(AppError::not_found(
                "Recipe is not in favorites",
                json!({ "id": recipe_id }),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::test_support;
    use crate::domain::repositories::{MockFavoriteRepository, MockRecipeRepository};

    fn service(
        recipes: MockRecipeRepository,
        favorites: MockFavoriteRepository,
    ) -> FavoriteService<MockRecipeRepository, MockFavoriteRepository> {
        FavoriteService::new(Arc::new(recipes), Arc::new(favorites))
    }

    #[tokio::test]
    async fn test_add_returns_summary() {
        let mut recipes = MockRecipeRepository::new();
        recipes
            .expect_find_by_id()
            .returning(|id| Ok(Some(test_support::recipe(id, 2))));
        let mut favorites = MockFavoriteRepository::new();
        favorites
            .expect_add()
            .withf(|user_id, recipe_id| *user_id == 1 && *recipe_id == 5)
            .returning(|_, _| Ok(true));

        let summary = service(recipes, favorites).add(1, 5).await.unwrap();

        assert_eq!(summary.id, 5);
        assert_eq!(summary.name, "Recipe 5");
    }

    #[tokio::test]
    async fn test_add_unknown_recipe() {
        let mut recipes = MockRecipeRepository::new();
        recipes.expect_find_by_id().returning(|_| Ok(None));
        let mut favorites = MockFavoriteRepository::new();
        favorites.expect_add().never();

        let result = service(recipes, favorites).add(1, 5).await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_add_twice_is_rejected() {
        let mut recipes = MockRecipeRepository::new();
        recipes
            .expect_find_by_id()
            .returning(|id| Ok(Some(test_support::recipe(id, 2))));
        let mut favorites = MockFavoriteRepository::new();
        favorites.expect_add().returning(|_, _| Ok(false));

        let result = service(recipes, favorites).add(1, 5).await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_remove_absent_entry() {
        let mut recipes = MockRecipeRepository::new();
        recipes.expect_exists().returning(|_| Ok(true));
        let mut favorites = MockFavoriteRepository::new();
        favorites.expect_remove().returning(|_, _| Ok(false));

        let result = service(recipes, favorites).remove(1, 5).await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }
}
