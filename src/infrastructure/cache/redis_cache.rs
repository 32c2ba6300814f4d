//! Redis-backed cache implementation.

use super::service::{CacheError, CacheResult, CacheService};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{debug, info, warn};

const KEY_PREFIX: &str = "slug:";

/// Redis cache for slug resolution.
///
/// Shares one `ConnectionManager` across requests. All operations fail open:
/// errors are logged and reported as misses.
pub struct RedisCache {
    client: ConnectionManager,
    default_ttl: u64,
}

impl RedisCache {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// `default_ttl_seconds` comes from `CACHE_TTL_SECONDS`.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::ConnectionError`] if the URL is invalid, the connection cannot
    /// be established, or the PING fails.
    pub async fn connect(redis_url: &str, default_ttl_seconds: u64) -> CacheResult<Self> {
        info!("Connecting to Redis");

        let client = Client::open(redis_url).map_err(|e| {
            CacheError::ConnectionError(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client).await.map_err(|e| {
            CacheError::ConnectionError(format!("Failed to connect to Redis: {}", e))
        })?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| CacheError::ConnectionError(format!("Redis PING failed: {}", e)))?;

        info!("✓ Connected to Redis");

        Ok(Self {
            client: manager,
            default_ttl: default_ttl_seconds,
        })
    }

    fn build_key(slug: &str) -> String {
        format!("{}{}", KEY_PREFIX, slug)
    }
}

#[async_trait]
impl CacheService for RedisCache {
    async fn get_recipe_id(&self, slug: &str) -> CacheResult<Option<i64>> {
        let mut conn = self.client.clone();

        match conn.get::<_, Option<i64>>(Self::build_key(slug)).await {
            Ok(hit) => {
                debug!(slug, hit = hit.is_some(), "Cache lookup");
                Ok(hit)
            }
            Err(e) => {
                warn!(slug, error = %e, "Redis GET failed");
                Ok(None)
            }
        }
    }

    async fn set_recipe_id(
        &self,
        slug: &str,
        recipe_id: i64,
        ttl_seconds: Option<u64>,
    ) -> CacheResult<()> {
        let mut conn = self.client.clone();
        let ttl = ttl_seconds.unwrap_or(self.default_ttl);

        if let Err(e) = conn
            .set_ex::<_, _, ()>(Self::build_key(slug), recipe_id, ttl)
            .await
        {
            warn!(slug, error = %e, "Redis SET failed");
        } else {
            debug!(slug, recipe_id, ttl, "Cache SET");
        }
        Ok(())
    }

    async fn invalidate(&self, slug: &str) -> CacheResult<()> {
        let mut conn = self.client.clone();

        match conn.del::<_, i32>(Self::build_key(slug)).await {
            Ok(deleted) if deleted > 0 => debug!(slug, "Cache INVALIDATE"),
            Ok(_) => {}
            Err(e) => warn!(slug, error = %e, "Redis DEL failed"),
        }
        Ok(())
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }
}
