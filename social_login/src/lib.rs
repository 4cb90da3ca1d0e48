//! Google and Kakao sign-in with cookie-backed server sessions.
//!
//! The crate is framework agnostic: request-level operations take an
//! [`AuthContext`] and `http` headers and return headers plus a redirect
//! target or a [`UserRecord`]. See `social_login_axum` for the axum binding.

mod config;
mod context;
mod coordination;
mod oauth2;
mod session;
mod storage;
mod user;
mod utils;

#[cfg(test)]
mod test_utils;

pub use config::{API_ROUTE_PREFIX, AUTH_ROUTE_PREFIX, ORIGIN};
pub use context::{AuthContext, AuthSettings};
pub use coordination::{
    CallbackResponse, CoordinationError, LoginEvent, LoginState, begin_auth_core,
    get_current_user_core, handle_callback_core, logout_core,
};
pub use oauth2::{
    AuthResponse, OAuth2Config, OAuth2Error, Provider, ProviderConfig, ProviderRegistry,
};
pub use session::{
    SESSION_COOKIE_MAX_AGE, SESSION_COOKIE_NAME, SessionConfig, SessionError, SessionId,
    SessionStore,
};
pub use storage::{
    CacheData, CacheStore, InMemoryCacheStore, RedisCacheStore, SharedCacheStore, StorageError,
    shared,
};
pub use user::UserRecord;
pub use utils::UtilError;
