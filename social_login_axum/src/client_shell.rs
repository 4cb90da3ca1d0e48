use askama::Template;
use axum::{
    Router,
    extract::State,
    http::{StatusCode, header::CONTENT_TYPE},
    response::{Html, Response},
    routing::get,
};
use social_login::{API_ROUTE_PREFIX, AUTH_ROUTE_PREFIX, AuthContext, Provider};

use super::error::IntoResponseError;

pub(super) fn router() -> Router<AuthContext> {
    Router::new()
        .route("/", get(index))
        .route("/login", get(index))
        .route("/static/app.js", get(serve_app_js))
}

struct ProviderLink {
    name: &'static str,
    label: &'static str,
}

impl From<Provider> for ProviderLink {
    fn from(provider: Provider) -> Self {
        let label = match provider {
            Provider::Google => "Google",
            Provider::Kakao => "Kakao",
        };
        Self {
            name: provider.as_str(),
            label,
        }
    }
}

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate<'a> {
    auth_prefix: &'a str,
    api_prefix: &'a str,
    providers: Vec<ProviderLink>,
}

async fn index(State(ctx): State<AuthContext>) -> Result<Html<String>, (StatusCode, String)> {
    let template = IndexTemplate {
        auth_prefix: AUTH_ROUTE_PREFIX.as_str(),
        api_prefix: API_ROUTE_PREFIX.as_str(),
        providers: ctx
            .providers
            .enabled()
            .into_iter()
            .map(ProviderLink::from)
            .collect(),
    };
    let html = Html(
        template
            .render()
            .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?,
    );
    Ok(html)
}

async fn serve_app_js() -> Result<Response, (StatusCode, String)> {
    let js_content = include_str!("../static/app.js");
    Response::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, "application/javascript")
        .body(js_content.to_string().into())
        .into_response_error()
}
