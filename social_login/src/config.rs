//! Central configuration for the social_login crate

use std::sync::LazyLock;

/// Public origin of this server, used to build provider callback URLs.
/// Default: "http://localhost:5000"
pub static ORIGIN: LazyLock<String> = LazyLock::new(|| {
    std::env::var("ORIGIN")
        .map(|origin| origin.trim_end_matches('/').to_string())
        .unwrap_or_else(|_| "http://localhost:5000".to_string())
});

/// Route prefix of the OAuth2 endpoints (`{prefix}/{provider}` and
/// `{prefix}/{provider}/callback`).
/// Default: "/auth"
pub static AUTH_ROUTE_PREFIX: LazyLock<String> =
    LazyLock::new(|| std::env::var("AUTH_ROUTE_PREFIX").unwrap_or_else(|_| "/auth".to_string()));

/// Route prefix of the profile API (`{prefix}/user`, `{prefix}/logout`).
/// Default: "/api"
pub static API_ROUTE_PREFIX: LazyLock<String> =
    LazyLock::new(|| std::env::var("API_ROUTE_PREFIX").unwrap_or_else(|_| "/api".to_string()));

/// Where the browser lands after a successful login.
/// Default: "/"
pub(crate) static CLIENT_ORIGIN: LazyLock<String> =
    LazyLock::new(|| std::env::var("CLIENT_ORIGIN").unwrap_or_else(|_| "/".to_string()));

/// Where the browser lands after a failed login.
/// Default: "/login"
pub(crate) static LOGIN_FAILURE_URL: LazyLock<String> = LazyLock::new(|| {
    std::env::var("LOGIN_FAILURE_URL").unwrap_or_else(|_| "/login".to_string())
});

/// `Secure` attribute of every cookie this crate sets (session and CSRF).
/// `SESSION_COOKIE_SECURE` wins; otherwise follows the `ORIGIN` scheme.
pub(crate) static COOKIE_SECURE: LazyLock<bool> = LazyLock::new(|| {
    parse_secure_flag(
        std::env::var("SESSION_COOKIE_SECURE").ok().as_deref(),
        ORIGIN.as_str(),
    )
});

/// Explicit `true`/`false` wins; otherwise the cookie is secure only when the
/// server origin is served over https.
pub(crate) fn parse_secure_flag(value: Option<&str>, origin: &str) -> bool {
    match value.map(|v| v.trim().to_ascii_lowercase()) {
        Some(v) if v == "true" || v == "1" => true,
        Some(v) if v == "false" || v == "0" => false,
        _ => origin.starts_with("https://"),
    }
}
