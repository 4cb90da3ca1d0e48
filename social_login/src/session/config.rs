use std::env;
use std::sync::LazyLock;

use crate::config::COOKIE_SECURE;

pub static SESSION_COOKIE_NAME: LazyLock<String> = LazyLock::new(|| {
    std::env::var("SESSION_COOKIE_NAME")
        .ok()
        .unwrap_or("sid".to_string())
});

pub static SESSION_COOKIE_MAX_AGE: LazyLock<u64> = LazyLock::new(|| {
    std::env::var("SESSION_COOKIE_MAX_AGE")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(86400) // Default to 24 hours if not set or invalid
});

static SESSION_SECRET: LazyLock<Vec<u8>> = LazyLock::new(|| match env::var("SESSION_SECRET") {
    Ok(secret) => secret.into_bytes(),
    Err(_) => {
        tracing::warn!("SESSION_SECRET is not set, using the built-in development secret");
        "default_secret_key_change_in_production"
            .to_string()
            .into_bytes()
    }
});

/// Cookie and lifetime settings of the session store.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub cookie_name: String,
    /// Session lifetime in seconds, counted from creation.
    pub max_age: u64,
    pub secure: bool,
    /// Key for the HMAC signature carried next to the session id in the cookie.
    pub secret: Vec<u8>,
}

impl SessionConfig {
    pub fn from_env() -> Self {
        Self {
            cookie_name: SESSION_COOKIE_NAME.clone(),
            max_age: *SESSION_COOKIE_MAX_AGE,
            secure: *COOKIE_SECURE,
            secret: SESSION_SECRET.clone(),
        }
    }
}
