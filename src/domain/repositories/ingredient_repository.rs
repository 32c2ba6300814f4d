//! Repository trait for ingredients.

use crate::domain::entities::{Ingredient, NewIngredient};
use crate::error::AppError;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IngredientRepository: Send + Sync {
    /// Lists ingredients ordered by name, optionally keeping only those whose
    /// name contains `name` (case-insensitive).
    async fn search(&self, name: Option<String>) -> Result<Vec<Ingredient>, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Ingredient>, AppError>;

    /// Returns the ingredients among `ids` that exist.
    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<Ingredient>, AppError>;

    /// Inserts ingredients, skipping existing name+unit pairs.
    ///
    /// Returns the number of rows actually inserted.
    async fn create_many(&self, ingredients: Vec<NewIngredient>) -> Result<u64, AppError>;
}
