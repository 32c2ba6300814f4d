//! Shopping cart and shopping list download.

use std::sync::Arc;

use crate::domain::entities::RecipeSummary;
use crate::domain::repositories::{CartRepository, RecipeRepository};
use crate::domain::shopping_list::ShoppingList;
use crate::error::AppError;
use serde_json::json;
use tracing::debug;

/// Service for the per-user shopping cart.
///
/// The shopping list is derived on demand from the recipes currently in the
/// cart, so removing a recipe immediately drops its ingredients.
pub struct ShoppingCartService<R: RecipeRepository, C: CartRepository> {
    recipes: Arc<R>,
    cart: Arc<C>,
}

impl<R: RecipeRepository, C: CartRepository> ShoppingCartService<R, C> {
    pub fn new(recipes: Arc<R>, cart: Arc<C>) -> Self {
        Self { recipes, cart }
    }

    /// Adds a recipe to the cart and returns its short form.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the recipe does not exist.
    /// Returns [`AppError::Validation`] if it is already in the cart.
    pub async fn add(&self, user_id: i64, recipe_id: i64) -> Result<RecipeSummary, AppError> {
        let recipe = self
            .recipes
            .find_by_id(recipe_id)
            .await?
            .ok_or_else(|| AppError::not_found("Recipe not found", json!({ "id": recipe_id })))?;

        if !self.cart.add(user_id, recipe_id).await? {
            return Err(AppError::bad_request(
                "Recipe is already in the shopping cart",
                json!({ "id": recipe_id }),
            ));
        }

        Ok(RecipeSummary::from(&recipe))
    }

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the recipe does not exist or is not in the cart.
    pub async fn remove(&self, user_id: i64, recipe_id: i64) -> Result<(), AppError> {
        if !self.recipes.exists(recipe_id).await? {
            return Err(AppError::not_found(
                "Recipe not found",
                json!({ "id": recipe_id }),
            ));
        }

        if !self.cart.remove(user_id, recipe_id).await? {
            return Err(AppError::not_found(
                "Recipe is not in the shopping cart",
                json!({ "id": recipe_id }),
            ));
        }
        Ok(())
    }

    /// Renders the aggregated shopping list of everything in the user's cart.
    ///
    /// An unknown user or an empty cart yields the header line alone.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn build_shopping_list(&self, user_id: i64) -> Result<String, AppError> {
        let recipe_ids = self.cart.recipe_ids(user_id).await?;

        let mut lines = Vec::new();
        for recipe_id in &recipe_ids {
            lines.extend(self.recipes.ingredient_lines(*recipe_id).await?);
        }

        let list = ShoppingList::aggregate(lines);
        debug!(
            user_id,
            recipes = recipe_ids.len(),
            items = list.items().len(),
            "Built shopping list"
        );
        metrics::counter!("foodgram_shopping_lists_built_total").increment(1);

        Ok(list.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::test_support::{self, line};
    use crate::domain::entities::IngredientLine;
    use crate::domain::repositories::{MockCartRepository, MockRecipeRepository};
    use std::collections::HashMap;
    use std::sync::Mutex;

    fn service(
        recipes: MockRecipeRepository,
        cart: MockCartRepository,
    ) -> ShoppingCartService<MockRecipeRepository, MockCartRepository> {
        ShoppingCartService::new(Arc::new(recipes), Arc::new(cart))
    }

    fn recipes_with_lines(lines: HashMap<i64, Vec<IngredientLine>>) -> MockRecipeRepository {
        let mut recipes = MockRecipeRepository::new();
        recipes
            .expect_ingredient_lines()
            .returning(move |id| Ok(lines.get(&id).cloned().unwrap_or_default()));
        recipes
    }

    fn cart_with(ids: Vec<i64>) -> MockCartRepository {
        let mut cart = MockCartRepository::new();
        cart.expect_recipe_ids().returning(move |_| Ok(ids.clone()));
        cart
    }

    #[tokio::test]
    async fn test_build_counts_shopping_lists() {
        let recorder = metrics_exporter_prometheus::PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();
        let _guard = metrics::set_default_local_recorder(&recorder);

        let service = service(MockRecipeRepository::new(), cart_with(vec![]));
        service.build_shopping_list(1).await.unwrap();
        service.build_shopping_list(2).await.unwrap();

        assert!(
            handle
                .render()
                .contains("foodgram_shopping_lists_built_total 2")
        );
    }

    #[tokio::test]
    async fn test_empty_cart_yields_header_only() {
        let mut recipes = MockRecipeRepository::new();
        recipes.expect_ingredient_lines().never();

        let text = service(recipes, cart_with(vec![]))
            .build_shopping_list(1)
            .await
            .unwrap();

        assert_eq!(text, "Shopping list:");
    }

    #[tokio::test]
    async fn test_shared_ingredient_is_summed() {
        let recipes = recipes_with_lines(HashMap::from([
            (1, vec![line(10, "Salt", "g", 10)]),
            (2, vec![line(10, "Salt", "g", 5)]),
        ]));

        let text = service(recipes, cart_with(vec![1, 2]))
            .build_shopping_list(7)
            .await
            .unwrap();

        assert_eq!(text, "Shopping list:\n1. Salt - 15 g.");
    }

    #[tokio::test]
    async fn test_only_cart_recipes_are_considered() {
        let recipes = recipes_with_lines(HashMap::from([
            (1, vec![line(10, "Salt", "g", 10)]),
            (2, vec![line(11, "Sugar", "g", 100)]),
        ]));

        let text = service(recipes, cart_with(vec![2]))
            .build_shopping_list(7)
            .await
            .unwrap();

        assert_eq!(text, "Shopping list:\n1. Sugar - 100 g.");
    }

    #[tokio::test]
    async fn test_removed_recipe_is_excluded() {
        let recipes = recipes_with_lines(HashMap::from([
            (1, vec![line(10, "Salt", "g", 10)]),
            (2, vec![line(10, "Salt", "g", 5), line(12, "Eggs", "pcs", 2)]),
        ]));

        let in_cart = Arc::new(Mutex::new(vec![1_i64, 2]));
        let mut cart = MockCartRepository::new();
        let listed = Arc::clone(&in_cart);
        cart.expect_recipe_ids()
            .returning(move |_| Ok(listed.lock().unwrap().clone()));
        let removed = Arc::clone(&in_cart);
        cart.expect_remove().returning(move |_, recipe_id| {
            let mut ids = removed.lock().unwrap();
            let before = ids.len();
            ids.retain(|id| *id != recipe_id);
            Ok(ids.len() != before)
        });

        let mut recipes = recipes;
        recipes.expect_exists().returning(|_| Ok(true));
        let service = service(recipes, cart);

        let before = service.build_shopping_list(7).await.unwrap();
        assert_eq!(before, "Shopping list:\n1. Eggs - 2 pcs.\n2. Salt - 15 g.");

        service.remove(7, 2).await.unwrap();

        let after = service.build_shopping_list(7).await.unwrap();
        assert_eq!(after, "Shopping list:\n1. Salt - 10 g.");
    }

    #[tokio::test]
    async fn test_add_twice_is_rejected() {
        let mut recipes = MockRecipeRepository::new();
        recipes
            .expect_find_by_id()
            .returning(|id| Ok(Some(test_support::recipe(id, 3))));
        let mut cart = MockCartRepository::new();
        cart.expect_add().returning(|_, _| Ok(false));

        let result = service(recipes, cart).add(1, 4).await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_add_unknown_recipe() {
        let mut recipes = MockRecipeRepository::new();
        recipes.expect_find_by_id().returning(|_| Ok(None));
        let mut cart = MockCartRepository::new();
        cart.expect_add().never();

        let result = service(recipes, cart).add(1, 4).await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_remove_unknown_recipe() {
        let mut recipes = MockRecipeRepository::new();
        recipes.expect_exists().returning(|_| Ok(false));

        let result = service(recipes, MockCartRepository::new()).remove(1, 4).await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }
}
