//! Cache service trait and error types.

use async_trait::async_trait;

/// Errors that can occur during cache operations.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    ConnectionError(String),
    #[error("Cache operation error: {0}")]
    OperationError(String),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Trait for caching short link resolution (stored slug to recipe id).
///
/// Implementations must be thread-safe and fail open: a cache failure degrades
/// to a database lookup, it never fails the request.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache with TTL support
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation for disabled caching
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Looks up the recipe id for a stored slug.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(id))` on cache hit
    /// - `Ok(None)` on cache miss or backend error
    async fn get_recipe_id(&self, slug: &str) -> CacheResult<Option<i64>>;

    /// Stores a slug mapping, using the implementation's default TTL when
    /// `ttl_seconds` is `None`.
    async fn set_recipe_id(
        &self,
        slug: &str,
        recipe_id: i64,
        ttl_seconds: Option<u64>,
    ) -> CacheResult<()>;

    /// Removes a cached slug mapping, used when its recipe is deleted.
    async fn invalidate(&self, slug: &str) -> CacheResult<()>;

    /// Checks if the cache backend is healthy.
    async fn health_check(&self) -> bool;
}
