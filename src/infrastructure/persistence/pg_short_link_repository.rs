//! PostgreSQL implementation of short link repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use super::rows::ShortLinkRow;
use crate::domain::entities::ShortLink;
use crate::domain::repositories::ShortLinkRepository;
use crate::error::AppError;

/// PostgreSQL repository for recipe short links.
///
/// `short_links_recipe_key` keeps one slug per recipe and
/// `short_links_slug_key` keeps slugs globally unique.
pub struct PgShortLinkRepository {
    pool: Arc<PgPool>,
}

impl PgShortLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ShortLinkRepository for PgShortLinkRepository {
    async fn find_by_recipe(&self, recipe_id: i64) -> Result<Option<ShortLink>, AppError> {
        let row = sqlx::query_as::<_, ShortLinkRow>(
            "SELECT id, recipe_id, slug, created_at FROM short_links WHERE recipe_id = $1",
        )
        .bind(recipe_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<ShortLink>, AppError> {
        let row = sqlx::query_as::<_, ShortLinkRow>(
            "SELECT id, recipe_id, slug, created_at FROM short_links WHERE slug = $1",
        )
        .bind(slug)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }

    async fn insert_if_absent(
        &self,
        recipe_id: i64,
        slug: &str,
    ) -> Result<Option<ShortLink>, AppError> {
        // Only the recipe constraint is absorbed; a slug clash still raises.
        let row = sqlx::query_as::<_, ShortLinkRow>(
            r#"
            INSERT INTO short_links (recipe_id, slug)
            VALUES ($1, $2)
            ON CONFLICT ON CONSTRAINT short_links_recipe_key DO NOTHING
            RETURNING id, recipe_id, slug, created_at
            "#,
        )
        .bind(recipe_id)
        .bind(slug)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Into::into))
    }
}
