//! Cache interface trait for abstracted caching operations.

use async_trait::async_trait;
use roster_core::RosterResult;

/// Cache interface for storing and retrieving cached data.
///
/// Uses JSON strings for type-erased storage to maintain dyn-compatibility.
#[async_trait]
pub trait CacheInterface: Send + Sync {
    /// Get a raw JSON value from the cache.
    ///
    /// Returns `None` if the key doesn't exist or has expired.
    async fn get_raw(&self, key: &str) -> RosterResult<Option<String>>;

    /// Store a raw JSON value, overwriting any previous value.
    async fn set_raw(&self, key: &str, value: &str) -> RosterResult<()>;

    /// Delete a value from the cache.
    ///
    /// Returns `true` if the key existed and was deleted. An absent key is not an error.
    async fn delete(&self, key: &str) -> RosterResult<bool>;

    /// Round trip to the cache server.
    async fn ping(&self) -> RosterResult<bool>;

    /// Check if caching is enabled.
    fn is_enabled(&self) -> bool;
}

/// Extension trait with typed methods for convenience.
#[async_trait]
pub trait CacheExt: CacheInterface {
    /// Get a typed value from the cache.
    async fn get<T: serde::de::DeserializeOwned + Send>(&self, key: &str) -> RosterResult<Option<T>> {
        match self.get_raw(key).await? {
            Some(json) => {
                let value: T = serde_json::from_str(&json)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Set a typed value in the cache.
    async fn set<T: serde::Serialize + Send + Sync>(&self, key: &str, value: &T) -> RosterResult<()> {
        let json = serde_json::to_string(value)?;
        self.set_raw(key, &json).await
    }
}

// Blanket implementation for all CacheInterface implementations
impl<T: CacheInterface + ?Sized> CacheExt for T {}
