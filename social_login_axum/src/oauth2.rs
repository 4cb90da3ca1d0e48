use axum::{
    Router,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
    routing::get,
};
use http::{HeaderMap, HeaderValue, StatusCode, header::LOCATION};
use social_login::{AuthContext, AuthResponse, begin_auth_core, handle_callback_core};

use super::error::IntoResponseError;

pub(super) fn router() -> Router<AuthContext> {
    Router::new()
        .route("/{provider}", get(begin_auth))
        .route("/{provider}/callback", get(callback))
}

/// `302 Found` to `location`, keeping the cookies already in `headers`.
fn found(mut headers: HeaderMap, location: &str) -> Result<Response, (StatusCode, String)> {
    let location = HeaderValue::from_str(location)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    headers.insert(LOCATION, location);
    Ok((StatusCode::FOUND, headers).into_response())
}

async fn begin_auth(
    State(ctx): State<AuthContext>,
    Path(provider): Path<String>,
) -> Result<Response, (StatusCode, String)> {
    let (auth_url, headers) = begin_auth_core(&ctx, &provider)
        .await
        .into_response_error()?;

    found(headers, &auth_url)
}

async fn callback(
    State(ctx): State<AuthContext>,
    Path(provider): Path<String>,
    Query(query): Query<AuthResponse>,
    headers: HeaderMap,
) -> Result<Response, (StatusCode, String)> {
    let response = handle_callback_core(&ctx, &provider, &query, &headers)
        .await
        .into_response_error()?;

    tracing::debug!("Login attempt ended in {:?}", response.state);
    found(response.headers, &response.location)
}
