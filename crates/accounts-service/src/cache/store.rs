//! Cache store trait and the cache-aside helpers built on it.

use accounts_core::AccountsResult;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use shaku::Interface;
use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// Key/value store holding JSON text with a per-entry lifetime.
///
/// Kept to raw strings so the trait stays object safe; typed access lives
/// in [`CacheAside`].
#[async_trait]
pub trait CacheStore: Interface + Send + Sync {
    /// Returns the stored value, or `None` if absent or expired.
    async fn get_raw(&self, key: &str) -> AccountsResult<Option<String>>;

    /// Stores a value that expires after `ttl`.
    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> AccountsResult<()>;

    /// Removes a value. Returns `true` if the key existed.
    async fn delete(&self, key: &str) -> AccountsResult<bool>;

    /// Returns false for a store that always misses.
    fn is_enabled(&self) -> bool;
}

/// Typed cache-aside operations available on every [`CacheStore`].
///
/// There is no single-flight: concurrent misses on the same key each run
/// their computation and each write the result.
#[async_trait]
pub trait CacheAside: CacheStore {
    /// Returns the cached value for `key` if a fresh one exists.
    async fn check<T>(&self, key: &str) -> AccountsResult<Option<T>>
    where
        T: DeserializeOwned + Send,
    {
        match self.get_raw(key).await? {
            Some(json) => {
                debug!("Cache hit for key '{}'", key);
                Ok(Some(serde_json::from_str(&json)?))
            }
            None => {
                debug!("Cache miss for key '{}'", key);
                Ok(None)
            }
        }
    }

    /// Stores `value` under `key` for `ttl`.
    async fn save<T>(&self, key: &str, ttl: Duration, value: &T) -> AccountsResult<()>
    where
        T: Serialize + Send + Sync,
    {
        let json = serde_json::to_string(value)?;
        self.set_raw(key, &json, ttl).await
    }

    /// Returns the cached value for `key`, or runs `compute`, stores its
    /// result for `ttl` and returns it.
    ///
    /// Errors from `compute` are returned as is and nothing is stored.
    async fn cache<T, F, Fut>(&self, key: &str, ttl: Duration, compute: F) -> AccountsResult<T>
    where
        T: Serialize + DeserializeOwned + Send + Sync,
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = AccountsResult<T>> + Send,
    {
        if let Some(cached) = self.check::<T>(key).await? {
            return Ok(cached);
        }

        let value = compute().await?;
        self.save(key, ttl, &value).await?;
        Ok(value)
    }
}

impl<S: CacheStore + ?Sized> CacheAside for S {}
