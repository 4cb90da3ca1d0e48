//! Combined router for the login flow, the profile API and the client shell

use axum::Router;
use social_login::{API_ROUTE_PREFIX, AUTH_ROUTE_PREFIX, AuthContext};
use tower_http::LatencyUnit;
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Create a router for every endpoint, with `ctx` as its state.
///
/// The endpoints will be available at:
/// - `{AUTH_ROUTE_PREFIX}/{provider}` and `{AUTH_ROUTE_PREFIX}/{provider}/callback`
/// - `{API_ROUTE_PREFIX}/user` and `{API_ROUTE_PREFIX}/logout`
/// - `/`, `/login` and `/static/app.js`
pub fn social_login_router(ctx: AuthContext) -> Router {
    social_login_router_no_trace(ctx).layer(
        TraceLayer::new_for_http()
            .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
            .on_request(DefaultOnRequest::new().level(Level::INFO))
            .on_response(
                DefaultOnResponse::new()
                    .level(Level::INFO)
                    .latency_unit(LatencyUnit::Millis),
            ),
    )
}

/// Same as [`social_login_router`] without the HTTP tracing middleware.
pub fn social_login_router_no_trace(ctx: AuthContext) -> Router {
    Router::new()
        .nest(AUTH_ROUTE_PREFIX.as_str(), super::oauth2::router())
        .nest(API_ROUTE_PREFIX.as_str(), super::api::router())
        .merge(super::client_shell::router())
        .with_state(ctx)
}
