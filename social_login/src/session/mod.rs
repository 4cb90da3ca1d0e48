mod config;
mod errors;
mod main;
mod types;

pub use config::{SESSION_COOKIE_MAX_AGE, SESSION_COOKIE_NAME, SessionConfig};
pub use errors::SessionError;
pub use main::SessionStore;
pub use types::{SessionId, SessionRecord};
