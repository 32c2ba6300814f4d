//! Repository trait for favorite recipes.

use crate::error::AppError;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FavoriteRepository: Send + Sync {
    /// Marks a recipe as favorite. Returns `false` if it already was.
    async fn add(&self, user_id: i64, recipe_id: i64) -> Result<bool, AppError>;

    /// Removes a favorite mark. Returns `false` if there was none.
    async fn remove(&self, user_id: i64, recipe_id: i64) -> Result<bool, AppError>;
}
