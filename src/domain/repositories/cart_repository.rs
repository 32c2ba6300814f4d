//! Repository trait for shopping cart entries.

use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for cart entries, unique per (user, recipe).
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgCartRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CartRepository: Send + Sync {
    /// Adds a recipe to the cart. Returns `false` if it was already there.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the recipe does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    async fn add(&self, user_id: i64, recipe_id: i64) -> Result<bool, AppError>;

    /// Removes a recipe from the cart. Returns `false` if it was not there.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn remove(&self, user_id: i64, recipe_id: i64) -> Result<bool, AppError>;

    /// Lists the ids of recipes currently in the user's cart.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn recipe_ids(&self, user_id: i64) -> Result<Vec<i64>, AppError>;
}
