use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use http::{HeaderMap, StatusCode};
use social_login::{AuthContext, UserRecord, logout_core};

use super::error::{ApiMessage, IntoResponseError};
use super::session::AuthUser;

pub(super) fn router() -> Router<AuthContext> {
    Router::new()
        .route("/user", get(current_user))
        .route("/logout", post(logout))
}

async fn current_user(AuthUser(user): AuthUser) -> Json<UserRecord> {
    Json(user)
}

async fn logout(
    State(ctx): State<AuthContext>,
    headers: HeaderMap,
) -> Result<(HeaderMap, (StatusCode, Json<ApiMessage>)), (StatusCode, Json<ApiMessage>)> {
    let response_headers = logout_core(&ctx, &headers)
        .await
        .into_response_error()
        .map_err(|(status, message)| {
            tracing::error!("Logout failed: {}", message);
            ApiMessage::json(status, "Session destruction failed")
        })?;

    Ok((
        response_headers,
        ApiMessage::json(StatusCode::OK, "Logout successful"),
    ))
}
