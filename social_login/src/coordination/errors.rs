//! Error type of the request-level operations

use thiserror::Error;

use crate::oauth2::OAuth2Error;
use crate::session::SessionError;
use crate::storage::StorageError;
use crate::utils::UtilError;

#[derive(Error, Debug)]
pub enum CoordinationError {
    /// No valid session on a request that needs one
    #[error("Not authenticated")]
    Unauthorized,

    /// Login state machine was driven out of order
    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("OAuth2 error: {0}")]
    OAuth2Error(OAuth2Error),

    #[error("Session error: {0}")]
    SessionError(SessionError),

    #[error("Storage error: {0}")]
    StorageError(StorageError),

    #[error("Utils error: {0}")]
    UtilsError(UtilError),
}

// Custom From implementations that automatically log errors

impl From<OAuth2Error> for CoordinationError {
    fn from(err: OAuth2Error) -> Self {
        let error = Self::OAuth2Error(err);
        tracing::error!("{}", error);
        error
    }
}

impl From<SessionError> for CoordinationError {
    fn from(err: SessionError) -> Self {
        let error = Self::SessionError(err);
        tracing::error!("{}", error);
        error
    }
}

impl From<StorageError> for CoordinationError {
    fn from(err: StorageError) -> Self {
        let error = Self::StorageError(err);
        tracing::error!("{}", error);
        error
    }
}

impl From<UtilError> for CoordinationError {
    fn from(err: UtilError) -> Self {
        let error = Self::UtilsError(err);
        tracing::error!("{}", error);
        error
    }
}
