//! Redis-based cache implementation.

use super::CacheInterface;
use async_trait::async_trait;
use deadpool_redis::{redis::AsyncCommands, Config, Pool, PoolConfig, Runtime, Timeouts};
use roster_config::RedisConfig;
use roster_core::{RosterError, RosterResult};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Upper bound on a single cache command when none is configured.
const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(2);

/// Redis-based cache service.
///
/// Every command, including checking a connection out of the pool, is bounded
/// by `command_timeout`, so a server that stops answering yields a
/// `RosterError::Cache` instead of a stalled request.
pub struct RedisCacheService {
    /// Redis connection pool, absent when caching is disabled.
    pool: Option<Arc<Pool>>,
    /// Expiry for stored entries. `None` keeps them until invalidated.
    entry_ttl: Option<Duration>,
    /// Limit on one round trip to Redis.
    command_timeout: Duration,
}

impl RedisCacheService {
    /// Create a no-op cache service (for when Redis is disabled).
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            pool: None,
            entry_ttl: None,
            command_timeout: DEFAULT_COMMAND_TIMEOUT,
        }
    }

    /// Builds the cache service described by `config`.
    ///
    /// The pool connects lazily, so an unreachable server shows up as cache
    /// misses and a failing health probe rather than a startup error.
    pub fn from_config(config: &RedisConfig) -> RosterResult<Self> {
        if !config.enabled {
            info!("Redis cache disabled");
            return Ok(Self::disabled());
        }

        let timeout = Some(config.timeout());
        let mut redis_cfg = Config::from_url(config.url());
        redis_cfg.pool = Some(PoolConfig {
            max_size: config.pool_size,
            timeouts: Timeouts {
                wait: timeout,
                create: timeout,
                recycle: timeout,
            },
            ..PoolConfig::default()
        });

        let pool = redis_cfg
            .create_pool(Some(Runtime::Tokio1))
            .map_err(|e| RosterError::Cache(format!("Failed to create Redis pool: {}", e)))?;

        info!("Redis cache pool created for {}:{}", config.host, config.port);
        Ok(Self {
            pool: Some(Arc::new(pool)),
            entry_ttl: config.entry_ttl(),
            command_timeout: config.timeout(),
        })
    }

    /// Get a connection from the pool.
    async fn get_conn(&self) -> RosterResult<deadpool_redis::Connection> {
        match &self.pool {
            Some(pool) => pool.get().await.map_err(|e| {
                RosterError::Cache(format!("Failed to get Redis connection: {}", e))
            }),
            None => Err(RosterError::Cache("Cache is disabled".to_string())),
        }
    }

    /// Runs `op` under the command timeout.
    async fn bounded<T, F>(&self, command: &str, op: F) -> RosterResult<T>
    where
        F: Future<Output = RosterResult<T>>,
    {
        match tokio::time::timeout(self.command_timeout, op).await {
            Ok(result) => result,
            Err(_) => {
                warn!("Redis {} timed out after {:?}", command, self.command_timeout);
                Err(RosterError::Cache(format!(
                    "{} timed out after {:?}",
                    command, self.command_timeout
                )))
            }
        }
    }
}

#[async_trait]
impl CacheInterface for RedisCacheService {
    fn is_enabled(&self) -> bool {
        self.pool.is_some()
    }

    async fn get_raw(&self, key: &str) -> RosterResult<Option<String>> {
        if !self.is_enabled() {
            return Ok(None);
        }

        let value: Option<String> = self
            .bounded("GET", async {
                let mut conn = self.get_conn().await?;
                conn.get(key).await.map_err(|e| {
                    RosterError::Cache(format!("Failed to get key '{}': {}", key, e))
                })
            })
            .await?;

        match &value {
            Some(_) => debug!("Cache hit for key '{}'", key),
            None => debug!("Cache miss for key '{}'", key),
        }

        Ok(value)
    }

    async fn set_raw(&self, key: &str, value: &str) -> RosterResult<()> {
        if !self.is_enabled() {
            return Ok(());
        }

        match self.entry_ttl {
            Some(ttl) => {
                let ttl_secs = ttl.as_secs().max(1);
                self.bounded("SET", async {
                    let mut conn = self.get_conn().await?;
                    conn.set_ex::<_, _, ()>(key, value, ttl_secs).await.map_err(|e| {
                        RosterError::Cache(format!("Failed to set key '{}': {}", key, e))
                    })
                })
                .await?;
                debug!("Cached key '{}' with TTL {}s", key, ttl_secs);
            }
            None => {
                self.bounded("SET", async {
                    let mut conn = self.get_conn().await?;
                    conn.set::<_, _, ()>(key, value).await.map_err(|e| {
                        RosterError::Cache(format!("Failed to set key '{}': {}", key, e))
                    })
                })
                .await?;
                debug!("Cached key '{}'", key);
            }
        }

        Ok(())
    }

    async fn delete(&self, key: &str) -> RosterResult<bool> {
        if !self.is_enabled() {
            return Ok(false);
        }

        let deleted: i64 = self
            .bounded("DEL", async {
                let mut conn = self.get_conn().await?;
                conn.del(key).await.map_err(|e| {
                    RosterError::Cache(format!("Failed to delete key '{}': {}", key, e))
                })
            })
            .await?;

        debug!("Deleted key '{}': {}", key, deleted > 0);
        Ok(deleted > 0)
    }

    async fn ping(&self) -> RosterResult<bool> {
        let reply: String = self
            .bounded("PING", async {
                let mut conn = self.get_conn().await?;
                deadpool_redis::redis::cmd("PING")
                    .query_async(&mut conn)
                    .await
                    .map_err(|e| RosterError::Cache(format!("PING failed: {}", e)))
            })
            .await?;

        Ok(reply == "PONG")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheExt;
    use std::time::Instant;
    use tokio::io::AsyncReadExt;

    #[test]
    fn test_disabled_cache() {
        let cache = RedisCacheService::disabled();
        assert!(!cache.is_enabled());
    }

    #[test]
    fn test_from_config_disabled() {
        let config = RedisConfig {
            enabled: false,
            ..RedisConfig::default()
        };
        let cache = RedisCacheService::from_config(&config).unwrap();
        assert!(!cache.is_enabled());
    }

    #[tokio::test]
    async fn test_disabled_cache_misses_and_ignores_writes() {
        let cache = RedisCacheService::disabled();

        cache.set("roster:cache:user:1", &"value").await.unwrap();
        assert!(cache.get::<String>("roster:cache:user:1").await.unwrap().is_none());
        assert!(!cache.delete("roster:cache:user:1").await.unwrap());
    }

    #[tokio::test]
    async fn test_disabled_cache_fails_ping() {
        let cache = RedisCacheService::disabled();
        let err = cache.ping().await.unwrap_err();
        assert!(matches!(err, RosterError::Cache(_)));
    }

    /// Accepts connections and reads from them without ever replying.
    async fn silent_redis() -> u16 {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                tokio::spawn(async move {
                    let mut buf = [0u8; 1024];
                    while let Ok(n) = socket.read(&mut buf).await {
                        if n == 0 {
                            break;
                        }
                    }
                });
            }
        });
        port
    }

    fn config_for(port: u16) -> RedisConfig {
        RedisConfig {
            host: "127.0.0.1".to_string(),
            port,
            enabled: true,
            timeout_secs: 1,
            ..RedisConfig::default()
        }
    }

    #[tokio::test]
    async fn test_unresponsive_server_fails_within_timeout() {
        let port = silent_redis().await;
        let cache = RedisCacheService::from_config(&config_for(port)).unwrap();

        let started = Instant::now();
        let get = cache.get_raw("roster:cache:user:1").await;
        let set = cache.set_raw("roster:cache:user:1", "{}").await;
        let del = cache.delete("roster:cache:user:1").await;
        let ping = cache.ping().await;

        assert!(matches!(get, Err(RosterError::Cache(_))));
        assert!(matches!(set, Err(RosterError::Cache(_))));
        assert!(matches!(del, Err(RosterError::Cache(_))));
        assert!(matches!(ping, Err(RosterError::Cache(_))));
        assert!(started.elapsed() < Duration::from_secs(8));
    }
}
