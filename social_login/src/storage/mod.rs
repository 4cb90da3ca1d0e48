mod cache_store;
mod errors;
mod types;

use std::sync::Arc;
use tokio::sync::Mutex;

pub use cache_store::{CacheStore, InMemoryCacheStore, RedisCacheStore, cache_store_from_env};
pub use errors::StorageError;
pub use types::CacheData;

/// Cache store shared between the session store and the OAuth2 state tokens.
pub type SharedCacheStore = Arc<Mutex<Box<dyn CacheStore>>>;

pub fn shared(store: Box<dyn CacheStore>) -> SharedCacheStore {
    Arc::new(Mutex::new(store))
}
