//! Short link creation and resolution for recipes.

use std::sync::Arc;

use crate::domain::repositories::{RecipeRepository, ShortLinkRepository};
use crate::error::{AppError, conflict_constraint};
use crate::infrastructure::cache::{CacheResult, CacheService};
use crate::utils::slug::SlugGenerator;
use serde_json::json;
use tracing::{debug, info, warn};

/// Unique constraint guarding slug uniqueness in `short_links`.
pub const SLUG_CONSTRAINT: &str = "short_links_slug_key";

const MAX_ATTEMPTS: usize = 10;

/// Service for issuing and resolving recipe short links.
///
/// Every recipe gets at most one slug, created lazily on first request and
/// kept for the life of the recipe. Slugs are stored with the configured
/// prefix, so the public short URL is `<public_base_url>/<stored slug>` and
/// an incoming bare slug maps back with [`SlugGenerator::storage_key`].
pub struct ShortLinkService<R: RecipeRepository, S: ShortLinkRepository> {
    recipes: Arc<R>,
    links: Arc<S>,
    generator: SlugGenerator,
    public_base_url: String,
}

impl<R: RecipeRepository, S: ShortLinkRepository> ShortLinkService<R, S> {
    pub fn new(
        recipes: Arc<R>,
        links: Arc<S>,
        generator: SlugGenerator,
        public_base_url: String,
    ) -> Self {
        Self {
            recipes,
            links,
            generator,
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Returns the stored slug of a recipe, creating it on first use.
    ///
    /// # Concurrency
    ///
    /// Two first requests for the same recipe race on the `recipe_id` unique
    /// constraint. The loser's insert is a no-op and it re-reads the winner's
    /// slug, so both callers see the same value.
    ///
    /// # Collisions
    ///
    /// A candidate already taken by another recipe is skipped before insert.
    /// If another request claims it in between, the slug unique constraint
    /// rejects the insert and a fresh candidate is tried. At most 10 candidates
    /// are tried.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the recipe does not exist.
    /// Returns [`AppError::Internal`] if no free slug was found or on database errors.
    pub async fn get_or_create_slug(&self, recipe_id: i64) -> Result<String, AppError> {
        if let Some(link) = self.links.find_by_recipe(recipe_id).await? {
            return Ok(link.slug);
        }

        if !self.recipes.exists(recipe_id).await? {
            return Err(AppError::not_found(
                "Recipe not found",
                json!({ "id": recipe_id }),
            ));
        }

        for _ in 0..MAX_ATTEMPTS {
            let slug = self.generator.generate_stored();

            if self.links.find_by_slug(&slug).await?.is_some() {
                debug!(slug = %slug, "Slug taken, retrying");
                continue;
            }

            match self.links.insert_if_absent(recipe_id, &slug).await {
                Ok(Some(link)) => {
                    info!(recipe_id, slug = %link.slug, "Short link created");
                    metrics::counter!("foodgram_short_links_created_total").increment(1);
                    return Ok(link.slug);
                }
                Ok(None) => return self.existing_slug(recipe_id).await,
                Err(e) if conflict_constraint(&e) == Some(SLUG_CONSTRAINT) => {
                    debug!(slug = %slug, "Slug claimed concurrently, retrying");
                }
                Err(e) => return Err(e),
            }
        }

        Err(AppError::internal(
            "Failed to generate unique slug",
            json!({ "reason": "Too many collisions" }),
        ))
    }

    /// Resolves a slug taken from a request path to its recipe id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the slug was never issued.
    pub async fn resolve_slug(&self, slug: &str) -> Result<i64, AppError> {
        let key = self.generator.storage_key(slug);

        self.links
            .find_by_slug(&key)
            .await?
            .map(|link| link.recipe_id)
            .ok_or_else(|| AppError::not_found("Short link not found", json!({ "slug": slug })))
    }

    /// Caches a resolved slug, then confirms the link still exists.
    ///
    /// A recipe deleted between the lookup and the cache write has already had
    /// its key invalidated, so the write is undone once the link is gone.
    /// Either the delete's invalidation runs after this write, or this re-read
    /// runs after the delete; both leave no stale entry.
    ///
    /// # Errors
    ///
    /// Returns the cache error of the write or the undo.
    pub async fn cache_resolution(
        &self,
        cache: &dyn CacheService,
        slug: &str,
        recipe_id: i64,
    ) -> CacheResult<()> {
        let key = self.generator.storage_key(slug);
        cache.set_recipe_id(&key, recipe_id, None).await?;

        match self.links.find_by_slug(&key).await {
            Ok(Some(link)) if link.recipe_id == recipe_id => Ok(()),
            Ok(_) => {
                debug!(slug = %key, "Short link gone after caching, invalidating");
                cache.invalidate(&key).await
            }
            Err(e) => {
                warn!(slug = %key, "Failed to confirm cached short link: {}", e);
                cache.invalidate(&key).await
            }
        }
    }

    /// Returns the stored slug of a recipe without creating one.
    pub async fn slug_of(&self, recipe_id: i64) -> Result<Option<String>, AppError> {
        Ok(self
            .links
            .find_by_recipe(recipe_id)
            .await?
            .map(|link| link.slug))
    }

    /// Path fragment in front of every slug, used to mount the redirect route.
    pub fn prefix(&self) -> &str {
        self.generator.prefix()
    }

    /// Maps a bare slug to the key it is stored (and cached) under.
    pub fn storage_key(&self, slug: &str) -> String {
        self.generator.storage_key(slug)
    }

    /// Builds the public short URL for a stored slug.
    pub fn short_url(&self, stored_slug: &str) -> String {
        format!("{}/{}", self.public_base_url, stored_slug)
    }

    /// Builds the frontend URL a short link redirects to.
    pub fn recipe_url(&self, recipe_id: i64) -> String {
        format!("{}/recipes/{}", self.public_base_url, recipe_id)
    }

    async fn existing_slug(&self, recipe_id: i64) -> Result<String, AppError> {
        debug!(recipe_id, "Lost short link race, reading winner");
        self.slug_of(recipe_id).await?.ok_or_else(|| {
            AppError::internal(
                "Short link vanished after conflict",
                json!({ "recipe_id": recipe_id }),
            )
        })
    }
}
