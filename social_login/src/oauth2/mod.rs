mod config;
mod errors;
mod main;
mod types;

pub use config::{OAuth2Config, ProviderConfig, ProviderRegistry};
pub use errors::OAuth2Error;
pub use main::get_client;
pub use types::{AuthResponse, Provider};

pub(crate) use main::{
    clear_csrf_cookie, fetch_user_record, prepare_auth_request, verify_callback_state,
};
