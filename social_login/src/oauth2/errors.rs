use thiserror::Error;

use crate::storage::StorageError;
use crate::utils::UtilError;

#[derive(Debug, Error, Clone)]
pub enum OAuth2Error {
    #[error("Unknown provider: {0}")]
    UnknownProvider(String),

    #[error("Provider not configured: {0}")]
    ProviderNotConfigured(String),

    #[error("Configuration error: {0}")]
    Config(String),

    /// The user declined consent or the provider returned an error
    #[error("Authorization denied: {0}")]
    ConsentDenied(String),

    #[error("Authorization code missing")]
    MissingCode,

    #[error("State not found: {0}")]
    StateNotFound(String),

    #[error("State expired")]
    StateExpired,

    #[error("State issued for a different provider")]
    StateMismatch,

    #[error("Security token not found: {0}")]
    SecurityTokenNotFound(String),

    #[error("Csrf token mismatch")]
    CsrfTokenMismatch,

    #[error("Required scope not granted: {0}")]
    MissingScope(String),

    #[error("Token exchange error: {0}")]
    TokenExchange(String),

    #[error("Fetch user info error: {0}")]
    FetchUserInfo(String),

    #[error("Serde error: {0}")]
    Serde(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Cookie error: {0}")]
    Cookie(String),

    /// Error from utils operations
    #[error("Utils error: {0}")]
    Utils(#[from] UtilError),
}

impl From<StorageError> for OAuth2Error {
    fn from(err: StorageError) -> Self {
        Self::Storage(err.to_string())
    }
}
