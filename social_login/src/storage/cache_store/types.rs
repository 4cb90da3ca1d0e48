use async_trait::async_trait;
use std::collections::HashMap;

use crate::storage::errors::StorageError;
use crate::storage::types::CacheData;

pub struct InMemoryCacheStore {
    pub(super) entry: HashMap<String, CacheData>,
}

pub struct RedisCacheStore {
    pub(super) client: redis::Client,
}

/// Keyed cache with per-entry expiry.
///
/// Every entry lives under a `prefix` namespace (`session`, `oauth2_state`).
/// Expired entries must never be returned from [`CacheStore::get`].
#[async_trait]
pub trait CacheStore: Send + Sync + 'static {
    /// Initialize the store. This is called when the store is created.
    async fn init(&self) -> Result<(), StorageError>;

    /// Put an entry into the store, replacing any previous value. `ttl` is in seconds.
    async fn put_with_ttl(
        &mut self,
        prefix: &str,
        key: &str,
        value: CacheData,
        ttl: u64,
    ) -> Result<(), StorageError>;

    /// Get a live entry from the store.
    async fn get(&self, prefix: &str, key: &str) -> Result<Option<CacheData>, StorageError>;

    /// Remove an entry. Returns true if a live entry was removed.
    async fn remove(&mut self, prefix: &str, key: &str) -> Result<bool, StorageError>;

    /// Get an entry and remove it in one step.
    async fn take(&mut self, prefix: &str, key: &str) -> Result<Option<CacheData>, StorageError> {
        let value = self.get(prefix, key).await?;
        if value.is_some() {
            self.remove(prefix, key).await?;
        }
        Ok(value)
    }
}
