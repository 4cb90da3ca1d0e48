mod core;
mod profile;
mod provider;
mod utils;

pub(crate) use core::{
    clear_csrf_cookie, fetch_user_record, prepare_auth_request, verify_callback_state,
};
pub use utils::get_client;
