//! In-process stand-in for a provider's token and userinfo endpoints.

use axum::{
    Form, Json, Router,
    http::{HeaderMap, StatusCode},
    routing::{get, post},
};
use serde_json::{Value, json};
use std::collections::HashMap;

use crate::oauth2::ProviderConfig;

pub(crate) const GOOD_CODE: &str = "good-code";
pub(crate) const ACCESS_TOKEN: &str = "mock-access-token";

/// Canned behaviour of the mock provider.
#[derive(Clone)]
pub(crate) struct MockProvider {
    pub(crate) token_status: StatusCode,
    pub(crate) scope: Option<String>,
    pub(crate) userinfo_status: StatusCode,
    pub(crate) userinfo: Value,
}

impl MockProvider {
    pub(crate) fn google() -> Self {
        Self {
            token_status: StatusCode::OK,
            scope: Some(
                "openid https://www.googleapis.com/auth/userinfo.profile \
                 https://www.googleapis.com/auth/userinfo.email"
                    .to_string(),
            ),
            userinfo_status: StatusCode::OK,
            userinfo: json!({
                "sub": "42",
                "name": "Kim",
                "email": "a@b.com",
                "picture": "http://x/y.png"
            }),
        }
    }

    pub(crate) fn kakao() -> Self {
        Self {
            token_status: StatusCode::OK,
            scope: None,
            userinfo_status: StatusCode::OK,
            userinfo: json!({
                "id": 1234567890u64,
                "properties": { "nickname": "Park" },
                "kakao_account": {}
            }),
        }
    }

    /// Binds to `127.0.0.1:0` and returns the base URL.
    pub(crate) async fn spawn(self) -> String {
        let token_mock = self.clone();
        let app = Router::new()
            .route(
                "/token",
                post(move |Form(form): Form<HashMap<String, String>>| {
                    let mock = token_mock.clone();
                    async move {
                        if mock.token_status != StatusCode::OK {
                            return (mock.token_status, Json(json!({ "error": "server_error" })));
                        }
                        if form.get("code").map(String::as_str) != Some(GOOD_CODE)
                            || form.get("grant_type").map(String::as_str)
                                != Some("authorization_code")
                        {
                            return (
                                StatusCode::BAD_REQUEST,
                                Json(json!({ "error": "invalid_grant" })),
                            );
                        }
                        let mut body = json!({
                            "access_token": ACCESS_TOKEN,
                            "token_type": "Bearer",
                            "expires_in": 3599
                        });
                        if let Some(scope) = mock.scope {
                            body["scope"] = Value::String(scope);
                        }
                        (StatusCode::OK, Json(body))
                    }
                }),
            )
            .route(
                "/userinfo",
                get(move |headers: HeaderMap| {
                    let mock = self.clone();
                    async move {
                        let expected = format!("Bearer {ACCESS_TOKEN}");
                        let authorized = headers
                            .get("authorization")
                            .and_then(|h| h.to_str().ok())
                            == Some(expected.as_str());
                        if !authorized {
                            return (StatusCode::UNAUTHORIZED, Json(json!({})));
                        }
                        (mock.userinfo_status, Json(mock.userinfo))
                    }
                }),
            );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock provider");
        let addr = listener.local_addr().expect("mock provider address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("mock provider server");
        });

        format!("http://{addr}")
    }
}

/// Points `config` at a mock provider at `base_url`.
pub(crate) fn with_mock_endpoints(config: ProviderConfig, base_url: &str) -> ProviderConfig {
    config.with_endpoints(
        format!("{base_url}/authorize"),
        format!("{base_url}/token"),
        format!("{base_url}/userinfo"),
    )
}
