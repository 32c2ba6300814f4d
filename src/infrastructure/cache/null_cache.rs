//! No-op cache used when `REDIS_URL` is not configured.

use super::service::{CacheResult, CacheService};
use async_trait::async_trait;
use tracing::debug;

/// A cache that stores nothing; every lookup is a miss.
pub struct NullCache;

impl NullCache {
    pub fn new() -> Self {
        debug!("Using NullCache (caching disabled)");
        Self
    }
}

impl Default for NullCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheService for NullCache {
    async fn get_recipe_id(&self, _slug: &str) -> CacheResult<Option<i64>> {
        Ok(None)
    }

    async fn set_recipe_id(
        &self,
        _slug: &str,
        _recipe_id: i64,
        _ttl_seconds: Option<u64>,
    ) -> CacheResult<()> {
        Ok(())
    }

    async fn invalidate(&self, _slug: &str) -> CacheResult<()> {
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_null_cache_always_misses() {
        let cache = NullCache::new();
        cache.set_recipe_id("s/AbCdEf", 7, None).await.unwrap();

        assert_eq!(cache.get_recipe_id("s/AbCdEf").await.unwrap(), None);
        assert!(cache.health_check().await);
    }
}
