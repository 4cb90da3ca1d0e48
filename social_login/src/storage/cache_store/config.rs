use std::{env, sync::LazyLock};

use crate::storage::errors::StorageError;

use super::types::{CacheStore, InMemoryCacheStore, RedisCacheStore};

pub(crate) static CACHE_STORE_TYPE: LazyLock<String> =
    LazyLock::new(|| env::var("CACHE_STORE_TYPE").unwrap_or_else(|_| "memory".to_string()));

pub(crate) static CACHE_STORE_URL: LazyLock<Option<String>> =
    LazyLock::new(|| env::var("CACHE_STORE_URL").ok());

/// Build the cache store selected by `CACHE_STORE_TYPE` (`memory` or `redis`).
pub async fn cache_store_from_env() -> Result<Box<dyn CacheStore>, StorageError> {
    build_cache_store(CACHE_STORE_TYPE.as_str(), CACHE_STORE_URL.as_deref()).await
}

pub(super) async fn build_cache_store(
    store_type: &str,
    store_url: Option<&str>,
) -> Result<Box<dyn CacheStore>, StorageError> {
    tracing::info!("Initializing cache store with type: {}", store_type);

    let store: Box<dyn CacheStore> = match store_type {
        "memory" => Box::new(InMemoryCacheStore::new()),
        "redis" => {
            let url = store_url.ok_or_else(|| {
                StorageError::Config("CACHE_STORE_URL must be set for redis".to_string())
            })?;
            Box::new(RedisCacheStore::open(url)?)
        }
        t => {
            return Err(StorageError::Config(format!(
                "Unsupported cache store type: {t}. Supported types are 'memory' and 'redis'"
            )));
        }
    };

    store.init().await.inspect_err(|e| {
        tracing::error!("Failed to initialize {} cache store: {}", store_type, e);
    })?;

    tracing::info!("Connected to cache store: type={}", store_type);
    Ok(store)
}
