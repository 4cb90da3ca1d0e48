use std::time::Duration;

use crate::oauth2::errors::OAuth2Error;
use crate::oauth2::types::StoredState;
use crate::storage::{CacheData, SharedCacheStore};

const STATE_PREFIX: &str = "oauth2_state";

/// Creates the HTTP client used for token exchange and profile fetches.
///
/// - `timeout`: 30 seconds, so a stalled provider fails the login instead of
///   holding the callback request open.
/// - `pool_idle_timeout`: 90 seconds (reqwest default).
/// - `pool_max_idle_per_host`: 32.
pub fn get_client() -> Result<reqwest::Client, OAuth2Error> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .pool_idle_timeout(Duration::from_secs(90))
        .pool_max_idle_per_host(32)
        .build()
        .map_err(|e| OAuth2Error::Config(format!("Failed to create HTTP client: {e}")))
}

pub(super) async fn store_state(
    cache: &SharedCacheStore,
    state: &str,
    stored: &StoredState,
    ttl: u64,
) -> Result<(), OAuth2Error> {
    let data = CacheData::try_from(stored)?;
    cache
        .lock()
        .await
        .put_with_ttl(STATE_PREFIX, state, data, ttl)
        .await?;
    Ok(())
}

/// Removes and returns the pending login attempt for `state`.
///
/// A state value is single use: a replayed callback finds nothing.
pub(super) async fn take_state(
    cache: &SharedCacheStore,
    state: &str,
) -> Result<Option<StoredState>, OAuth2Error> {
    let data = cache.lock().await.take(STATE_PREFIX, state).await?;
    data.map(StoredState::try_from).transpose()
}
