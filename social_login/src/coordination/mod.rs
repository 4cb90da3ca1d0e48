mod errors;
mod oauth2;
mod user;

pub use errors::CoordinationError;
pub use oauth2::{CallbackResponse, LoginEvent, LoginState, begin_auth_core, handle_callback_core};
pub use user::{get_current_user_core, logout_core};
