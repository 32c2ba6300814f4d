//! Repository trait for recipe short links.

use crate::domain::entities::ShortLink;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for short links.
///
/// Storage enforces one slug per recipe and globally unique slugs.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgShortLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_short_link.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShortLinkRepository: Send + Sync {
    /// Finds the short link of a recipe.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_recipe(&self, recipe_id: i64) -> Result<Option<ShortLink>, AppError>;

    /// Finds a short link by its stored slug (prefix included).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<ShortLink>, AppError>;

    /// Inserts `(recipe_id, slug)` unless the recipe already has a slug.
    ///
    /// Returns `Ok(None)` when another slug for the recipe already exists.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] with constraint `short_links_slug_key` if
    /// the slug is taken by another recipe.
    /// Returns [`AppError::Internal`] on database errors.
    async fn insert_if_absent(
        &self,
        recipe_id: i64,
        slug: &str,
    ) -> Result<Option<ShortLink>, AppError>;
}
