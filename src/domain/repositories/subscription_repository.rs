//! Repository trait for author subscriptions.

use crate::domain::entities::Profile;
use crate::error::AppError;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    /// Subscribes `user_id` to `author_id`. Returns `false` if already subscribed.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the author does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    async fn subscribe(&self, user_id: i64, author_id: i64) -> Result<bool, AppError>;

    /// Removes a subscription. Returns `false` if it did not exist.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn unsubscribe(&self, user_id: i64, author_id: i64) -> Result<bool, AppError>;

    /// Lists the authors `user_id` follows, ordered by username.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn list_authors(
        &self,
        user_id: i64,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Profile>, AppError>;

    /// Counts the authors `user_id` follows.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn count_authors(&self, user_id: i64) -> Result<i64, AppError>;
}
