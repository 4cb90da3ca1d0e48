//! Everything a request handler needs, injected instead of held in globals.

use std::sync::Arc;

use crate::config::{CLIENT_ORIGIN, LOGIN_FAILURE_URL};
use crate::coordination::CoordinationError;
use crate::oauth2::{OAuth2Config, ProviderRegistry, get_client};
use crate::session::{SessionConfig, SessionStore};
use crate::storage::{SharedCacheStore, cache_store_from_env, shared};

/// Redirect targets at the end of a login attempt.
#[derive(Debug, Clone)]
pub struct AuthSettings {
    /// Where the browser goes after a successful login.
    pub client_origin: String,
    /// Where the browser goes after a failed login.
    pub login_failure_url: String,
}

impl AuthSettings {
    pub fn from_env() -> Self {
        Self {
            client_origin: CLIENT_ORIGIN.clone(),
            login_failure_url: LOGIN_FAILURE_URL.clone(),
        }
    }
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            client_origin: "/".to_string(),
            login_failure_url: "/login".to_string(),
        }
    }
}

/// Shared state of the login flow and the profile API.
///
/// Cheap to clone; all clones see the same sessions and pending login attempts.
#[derive(Clone)]
pub struct AuthContext {
    pub sessions: SessionStore,
    pub providers: Arc<ProviderRegistry>,
    pub oauth2: Arc<OAuth2Config>,
    pub settings: Arc<AuthSettings>,
    pub(crate) cache: SharedCacheStore,
    pub(crate) client: reqwest::Client,
}

impl AuthContext {
    pub fn new(
        cache: SharedCacheStore,
        session_config: SessionConfig,
        providers: ProviderRegistry,
        oauth2: OAuth2Config,
        settings: AuthSettings,
    ) -> Result<Self, CoordinationError> {
        Ok(Self {
            sessions: SessionStore::new(cache.clone(), session_config),
            providers: Arc::new(providers),
            oauth2: Arc::new(oauth2),
            settings: Arc::new(settings),
            cache,
            client: get_client()?,
        })
    }

    /// Build the context from environment variables.
    ///
    /// Fails when the cache store cannot be reached or a provider is half
    /// configured. Having no provider at all is allowed but logged.
    pub async fn from_env() -> Result<Self, CoordinationError> {
        let store = cache_store_from_env().await?;
        let providers = ProviderRegistry::from_env()?;

        if providers.is_empty() {
            tracing::warn!(
                "No OAuth2 provider configured; set GOOGLE_CLIENT_ID or KAKAO_CLIENT_ID"
            );
        }

        Self::new(
            shared(store),
            SessionConfig::from_env(),
            providers,
            OAuth2Config::from_env(),
            AuthSettings::from_env(),
        )
    }
}
