use axum::{
    Json,
    extract::{FromRef, FromRequestParts},
};
use http::{StatusCode, request::Parts};
use social_login::{AuthContext, UserRecord, get_current_user_core};

use super::error::{ApiMessage, IntoResponseError};

/// The signed-in user, available as an axum extractor.
///
/// Rejects with `401 {"message": "Not authenticated"}` when the request has no
/// valid session, and with 500 when the session store fails.
///
/// ```no_run
/// use axum::{Router, routing::get};
/// use social_login_axum::{AuthContext, AuthUser};
///
/// async fn hello(AuthUser(user): AuthUser) -> String {
///     format!("Hello, {}!", user.name)
/// }
///
/// fn app(ctx: AuthContext) -> Router {
///     Router::new().route("/hello", get(hello)).with_state(ctx)
/// }
/// ```
#[derive(Clone, Debug)]
pub struct AuthUser(pub UserRecord);

impl<S> FromRequestParts<S> for AuthUser
where
    AuthContext: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = (StatusCode, Json<ApiMessage>);

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let ctx = AuthContext::from_ref(state);

        get_current_user_core(&ctx, &parts.headers)
            .await
            .into_response_error()
            .map(AuthUser)
            .map_err(|(status, message)| {
                tracing::debug!("Rejecting request: {}", message);
                match status {
                    StatusCode::UNAUTHORIZED => ApiMessage::json(status, "Not authenticated"),
                    _ => ApiMessage::json(status, message),
                }
            })
    }
}
