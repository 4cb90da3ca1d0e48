mod api;
mod client_shell;
mod error;
mod oauth2;
mod router;
mod session;

pub use error::{ApiMessage, IntoResponseError};
pub use router::{social_login_router, social_login_router_no_trace};
pub use session::AuthUser;

// Re-export what an application needs to build the router state
pub use social_login::{API_ROUTE_PREFIX, AUTH_ROUTE_PREFIX, AuthContext};
