use std::sync::Arc;

use crate::session::config::SessionConfig;
use crate::session::errors::SessionError;
use crate::session::types::{SessionId, SessionRecord};
use crate::storage::{CacheData, SharedCacheStore};
use crate::user::UserRecord;
use crate::utils::{expiry_after, gen_random_string};

const SESSION_PREFIX: &str = "session";

/// Keyed session store: `create`, `read` and `destroy` over a shared cache.
///
/// Every write is a single cache operation under the cache mutex, so a record
/// is either fully present or absent.
#[derive(Clone)]
pub struct SessionStore {
    cache: SharedCacheStore,
    config: Arc<SessionConfig>,
}

impl SessionStore {
    pub fn new(cache: SharedCacheStore, config: SessionConfig) -> Self {
        Self {
            cache,
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Create a session bound to `user`, expiring `max_age` seconds from now.
    pub async fn create(&self, user: UserRecord) -> Result<SessionId, SessionError> {
        let session_id = SessionId::new(gen_random_string(32)?);
        let expires_at = expiry_after(self.config.max_age).ok_or_else(|| {
            SessionError::Storage(format!(
                "Session max age out of range: {}",
                self.config.max_age
            ))
        })?;

        let record = SessionRecord {
            session_id: session_id.clone(),
            user: Some(user),
            expires_at,
        };
        let data = CacheData::try_from(&record)?;

        self.cache
            .lock()
            .await
            .put_with_ttl(
                SESSION_PREFIX,
                session_id.as_str(),
                data,
                self.config.max_age,
            )
            .await?;

        tracing::info!("Created session expiring at {}", expires_at);
        Ok(session_id)
    }

    /// Read a live session. Expired records are purged and reported as `NotFound`.
    pub async fn read(&self, session_id: &SessionId) -> Result<SessionRecord, SessionError> {
        let mut cache = self.cache.lock().await;

        let data = cache
            .get(SESSION_PREFIX, session_id.as_str())
            .await?
            .ok_or(SessionError::NotFound)?;

        let record = SessionRecord::try_from(data)?;
        if record.is_expired() {
            tracing::debug!("Session expired at {}", record.expires_at);
            cache.remove(SESSION_PREFIX, session_id.as_str()).await?;
            return Err(SessionError::NotFound);
        }

        Ok(record)
    }

    /// Remove a session. Returns `NotFound` when there was no live session.
    pub async fn destroy(&self, session_id: &SessionId) -> Result<(), SessionError> {
        let removed = self
            .cache
            .lock()
            .await
            .remove(SESSION_PREFIX, session_id.as_str())
            .await?;

        if removed {
            tracing::info!("Destroyed session");
            Ok(())
        } else {
            Err(SessionError::NotFound)
        }
    }

    /// The user bound to a live session, if any.
    pub async fn read_user(
        &self,
        session_id: &SessionId,
    ) -> Result<Option<UserRecord>, SessionError> {
        match self.read(session_id).await {
            Ok(record) => Ok(record.user),
            Err(SessionError::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }
}
