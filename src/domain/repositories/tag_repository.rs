//! Repository trait for tags.

use crate::domain::entities::{NewTag, Tag};
use crate::error::AppError;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TagRepository: Send + Sync {
    /// Lists all tags ordered by id.
    async fn list(&self) -> Result<Vec<Tag>, AppError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Tag>, AppError>;

    /// Returns the tags among `ids` that exist.
    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<Tag>, AppError>;

    /// Creates a tag.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the name or slug is taken.
    async fn create(&self, new_tag: NewTag) -> Result<Tag, AppError>;
}
