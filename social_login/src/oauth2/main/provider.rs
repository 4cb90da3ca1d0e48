use crate::oauth2::config::ProviderConfig;
use crate::oauth2::errors::OAuth2Error;
use crate::oauth2::types::{Provider, ProviderProfile, TokenResponse};

pub(super) async fn exchange_code_for_token(
    client: &reqwest::Client,
    config: &ProviderConfig,
    code: &str,
) -> Result<TokenResponse, OAuth2Error> {
    let mut form = vec![
        ("grant_type", "authorization_code"),
        ("code", code),
        ("client_id", config.client_id.as_str()),
        ("redirect_uri", config.redirect_uri.as_str()),
    ];
    if let Some(secret) = config.client_secret.as_deref() {
        form.push(("client_secret", secret));
    }

    let response = client
        .post(config.token_url.as_str())
        .form(&form)
        .send()
        .await
        .map_err(|e| OAuth2Error::TokenExchange(e.to_string()))?;

    match response.status() {
        reqwest::StatusCode::OK => {
            tracing::debug!("Token Exchange Response: {:#?}", response.status());
        }
        status => {
            tracing::debug!("Token Exchange Response: {:#?}", response);
            return Err(OAuth2Error::TokenExchange(status.to_string()));
        }
    };

    let response_body = response
        .text()
        .await
        .map_err(|e| OAuth2Error::TokenExchange(e.to_string()))?;
    let token: TokenResponse = serde_json::from_str(&response_body)
        .map_err(|e| OAuth2Error::TokenExchange(e.to_string()))?;

    tracing::debug!(
        "Token type: {:?}, expires in: {:?}",
        token.token_type,
        token.expires_in
    );
    Ok(token)
}

/// Every scope the provider config asks for must be granted.
///
/// A response without a `scope` field is taken as granting what was requested.
/// Google reports `email` and `profile` as `.../auth/userinfo.email` and
/// `.../auth/userinfo.profile`.
pub(super) fn check_scopes(
    config: &ProviderConfig,
    token: &TokenResponse,
) -> Result<(), OAuth2Error> {
    let Some(granted) = token.scope.as_deref() else {
        return Ok(());
    };
    let granted: Vec<&str> = granted
        .split(|c: char| c == ' ' || c == ',')
        .filter(|s| !s.is_empty())
        .collect();

    for required in &config.scopes {
        let suffix = format!("userinfo.{required}");
        let ok = granted
            .iter()
            .any(|g| *g == required.as_str() || g.ends_with(suffix.as_str()));
        if !ok {
            tracing::warn!("{} did not grant scope '{}'", config.provider, required);
            return Err(OAuth2Error::MissingScope(required.clone()));
        }
    }
    Ok(())
}

pub(super) async fn fetch_profile(
    client: &reqwest::Client,
    config: &ProviderConfig,
    access_token: &str,
) -> Result<ProviderProfile, OAuth2Error> {
    let response = client
        .get(config.userinfo_url.as_str())
        .bearer_auth(access_token)
        .send()
        .await
        .map_err(|e| OAuth2Error::FetchUserInfo(e.to_string()))?;

    if !response.status().is_success() {
        return Err(OAuth2Error::FetchUserInfo(response.status().to_string()));
    }

    let response_body = response
        .text()
        .await
        .map_err(|e| OAuth2Error::FetchUserInfo(e.to_string()))?;

    tracing::debug!("Response Body: {:#?}", response_body);
    let profile = match config.provider {
        Provider::Google => ProviderProfile::Google(serde_json::from_str(&response_body).map_err(
            |e| OAuth2Error::Serde(format!("Failed to deserialize response body: {e}")),
        )?),
        Provider::Kakao => ProviderProfile::Kakao(serde_json::from_str(&response_body).map_err(
            |e| OAuth2Error::Serde(format!("Failed to deserialize response body: {e}")),
        )?),
    };

    Ok(profile)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oauth2::main::utils::get_client;
    use crate::test_utils::{ACCESS_TOKEN, GOOD_CODE, MockProvider, with_mock_endpoints};
    use axum::http::StatusCode;

    fn token(scope: Option<&str>) -> TokenResponse {
        TokenResponse {
            access_token: "t".to_string(),
            token_type: None,
            expires_in: None,
            scope: scope.map(str::to_string),
        }
    }

    #[test]
    fn test_check_scopes_google_urls() {
        let config = ProviderConfig::google("id", "secret");
        let granted = "openid https://www.googleapis.com/auth/userinfo.email \
                       https://www.googleapis.com/auth/userinfo.profile";
        assert!(check_scopes(&config, &token(Some(granted))).is_ok());
    }

    #[test]
    fn test_check_scopes_missing_email() {
        let config = ProviderConfig::google("id", "secret");
        let granted = "openid https://www.googleapis.com/auth/userinfo.profile";
        assert!(matches!(
            check_scopes(&config, &token(Some(granted))),
            Err(OAuth2Error::MissingScope(s)) if s == "email"
        ));
    }

    #[test]
    fn test_check_scopes_absent_field_or_no_requirement() {
        let google = ProviderConfig::google("id", "secret");
        assert!(check_scopes(&google, &token(None)).is_ok());

        let kakao = ProviderConfig::kakao("id", None);
        assert!(check_scopes(&kakao, &token(Some("profile_nickname"))).is_ok());
    }

    #[tokio::test]
    async fn test_exchange_and_fetch_against_mock() {
        let base = MockProvider::google().spawn().await;
        let config = with_mock_endpoints(ProviderConfig::google("id", "secret"), &base);
        let client = get_client().unwrap();

        let token = exchange_code_for_token(&client, &config, GOOD_CODE)
            .await
            .unwrap();
        assert_eq!(token.access_token, ACCESS_TOKEN);

        let profile = fetch_profile(&client, &config, &token.access_token)
            .await
            .unwrap();
        assert!(matches!(profile, ProviderProfile::Google(p) if p.sub == "42"));
    }

    #[tokio::test]
    async fn test_exchange_rejected_code() {
        let base = MockProvider::kakao().spawn().await;
        let config = with_mock_endpoints(ProviderConfig::kakao("id", None), &base);
        let client = get_client().unwrap();

        let result = exchange_code_for_token(&client, &config, "bad-code").await;
        assert!(matches!(result, Err(OAuth2Error::TokenExchange(_))));
    }

    #[tokio::test]
    async fn test_fetch_profile_error_status() {
        let mock = MockProvider {
            userinfo_status: StatusCode::INTERNAL_SERVER_ERROR,
            ..MockProvider::kakao()
        };
        let base = mock.spawn().await;
        let config = with_mock_endpoints(ProviderConfig::kakao("id", None), &base);
        let client = get_client().unwrap();

        let result = fetch_profile(&client, &config, ACCESS_TOKEN).await;
        assert!(matches!(result, Err(OAuth2Error::FetchUserInfo(_))));
    }

    #[tokio::test]
    async fn test_fetch_profile_unreachable() {
        let config = with_mock_endpoints(
            ProviderConfig::kakao("id", None),
            "http://127.0.0.1:1",
        );
        let client = get_client().unwrap();

        let result = fetch_profile(&client, &config, ACCESS_TOKEN).await;
        assert!(matches!(result, Err(OAuth2Error::FetchUserInfo(_))));
    }
}
