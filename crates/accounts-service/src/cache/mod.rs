//! Cache-aside infrastructure for the handler layer.
//!
//! [`CacheStore`] is the raw key/value seam, [`RedisCacheStore`] the
//! production store, and [`CacheAside`] the typed read-through helpers.

pub mod cache_keys;
#[cfg(test)]
pub(crate) mod memory;
mod redis_cache;
mod store;

pub use cache_keys::CacheKeys;
pub use redis_cache::{RedisCacheStore, RedisCacheStoreParameters};
pub use store::{CacheAside, CacheStore};
