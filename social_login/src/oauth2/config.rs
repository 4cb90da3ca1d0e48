use std::collections::HashMap;
use std::env;
use std::sync::LazyLock;

use super::errors::OAuth2Error;
use super::types::Provider;
use crate::config::{AUTH_ROUTE_PREFIX, COOKIE_SECURE, ORIGIN};

pub(crate) static OAUTH2_CSRF_COOKIE_NAME: LazyLock<String> = LazyLock::new(|| {
    env::var("OAUTH2_CSRF_COOKIE_NAME")
        .ok()
        .unwrap_or("oauth2_csrf".to_string())
});

/// Lifetime of a pending login attempt (state token and CSRF cookie) in seconds.
pub(crate) static OAUTH2_STATE_MAX_AGE: LazyLock<u64> = LazyLock::new(|| {
    env::var("OAUTH2_STATE_MAX_AGE")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(600) // Default to 10 minutes if not set or invalid
});

const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const GOOGLE_USERINFO_URL: &str = "https://www.googleapis.com/oauth2/v3/userinfo";

const KAKAO_AUTH_URL: &str = "https://kauth.kakao.com/oauth/authorize";
const KAKAO_TOKEN_URL: &str = "https://kauth.kakao.com/oauth/token";
const KAKAO_USERINFO_URL: &str = "https://kapi.kakao.com/v2/user/me";

/// Settings shared by every provider's login flow.
#[derive(Debug, Clone)]
pub struct OAuth2Config {
    pub csrf_cookie_name: String,
    pub state_max_age: u64,
    pub secure: bool,
}

impl OAuth2Config {
    pub fn from_env() -> Self {
        Self {
            csrf_cookie_name: OAUTH2_CSRF_COOKIE_NAME.clone(),
            state_max_age: *OAUTH2_STATE_MAX_AGE,
            secure: *COOKIE_SECURE,
        }
    }
}

/// Client registration and endpoints of one identity provider.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub provider: Provider,
    pub client_id: String,
    pub client_secret: Option<String>,
    pub redirect_uri: String,
    pub auth_url: String,
    pub token_url: String,
    pub userinfo_url: String,
    pub scopes: Vec<String>,
}

impl ProviderConfig {
    pub fn google(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            provider: Provider::Google,
            client_id: client_id.into(),
            client_secret: Some(client_secret.into()),
            redirect_uri: callback_url(Provider::Google),
            auth_url: GOOGLE_AUTH_URL.to_string(),
            token_url: GOOGLE_TOKEN_URL.to_string(),
            userinfo_url: GOOGLE_USERINFO_URL.to_string(),
            scopes: vec!["profile".to_string(), "email".to_string()],
        }
    }

    /// Kakao accepts an optional client secret and requests no scope.
    pub fn kakao(client_id: impl Into<String>, client_secret: Option<String>) -> Self {
        Self {
            provider: Provider::Kakao,
            client_id: client_id.into(),
            client_secret,
            redirect_uri: callback_url(Provider::Kakao),
            auth_url: KAKAO_AUTH_URL.to_string(),
            token_url: KAKAO_TOKEN_URL.to_string(),
            userinfo_url: KAKAO_USERINFO_URL.to_string(),
            scopes: Vec::new(),
        }
    }

    pub fn with_redirect_uri(mut self, redirect_uri: impl Into<String>) -> Self {
        self.redirect_uri = redirect_uri.into();
        self
    }

    pub fn with_endpoints(
        mut self,
        auth_url: impl Into<String>,
        token_url: impl Into<String>,
        userinfo_url: impl Into<String>,
    ) -> Self {
        self.auth_url = auth_url.into();
        self.token_url = token_url.into();
        self.userinfo_url = userinfo_url.into();
        self
    }

    /// Reads `{GOOGLE,KAKAO}_CLIENT_ID` and friends.
    ///
    /// Returns `Ok(None)` when the provider has no client id, which leaves it
    /// disabled. Google additionally requires a client secret.
    pub fn from_env(provider: Provider) -> Result<Option<Self>, OAuth2Error> {
        let Some(client_id) = provider_env(provider, "CLIENT_ID") else {
            tracing::info!("{} login disabled: no client id configured", provider);
            return Ok(None);
        };
        let client_secret = provider_env(provider, "CLIENT_SECRET");

        let mut config = match provider {
            Provider::Google => {
                let secret = client_secret.ok_or_else(|| {
                    OAuth2Error::Config("GOOGLE_CLIENT_SECRET must be set".to_string())
                })?;
                Self::google(client_id, secret)
            }
            Provider::Kakao => Self::kakao(client_id, client_secret),
        };

        if let Some(url) = provider_env(provider, "AUTH_URL") {
            config.auth_url = url;
        }
        if let Some(url) = provider_env(provider, "TOKEN_URL") {
            config.token_url = url;
        }
        if let Some(url) = provider_env(provider, "USERINFO_URL") {
            config.userinfo_url = url;
        }

        tracing::debug!("{} redirect uri: {}", provider, config.redirect_uri);
        Ok(Some(config))
    }
}

fn provider_env(provider: Provider, suffix: &str) -> Option<String> {
    env::var(format!("{}_{}", provider.env_prefix(), suffix))
        .ok()
        .filter(|v| !v.is_empty())
}

/// `{ORIGIN}{AUTH_ROUTE_PREFIX}/{provider}/callback`
pub(crate) fn callback_url(provider: Provider) -> String {
    format!(
        "{}{}/{}/callback",
        ORIGIN.as_str(),
        AUTH_ROUTE_PREFIX.as_str(),
        provider
    )
}

/// The set of enabled providers.
#[derive(Debug, Clone, Default)]
pub struct ProviderRegistry {
    providers: HashMap<Provider, ProviderConfig>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, config: ProviderConfig) -> Self {
        self.providers.insert(config.provider, config);
        self
    }

    pub fn from_env() -> Result<Self, OAuth2Error> {
        let mut registry = Self::new();
        for provider in Provider::ALL {
            if let Some(config) = ProviderConfig::from_env(provider)? {
                registry = registry.with(config);
            }
        }
        Ok(registry)
    }

    pub fn get(&self, provider: Provider) -> Result<&ProviderConfig, OAuth2Error> {
        self.providers
            .get(&provider)
            .ok_or_else(|| OAuth2Error::ProviderNotConfigured(provider.to_string()))
    }

    /// Resolve a route segment such as `"google"` to its configuration.
    pub fn resolve(&self, name: &str) -> Result<&ProviderConfig, OAuth2Error> {
        self.get(name.parse()?)
    }

    pub fn is_enabled(&self, provider: Provider) -> bool {
        self.providers.contains_key(&provider)
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Enabled providers in display order.
    pub fn enabled(&self) -> Vec<Provider> {
        Provider::ALL
            .into_iter()
            .filter(|p| self.is_enabled(*p))
            .collect()
    }
}
