use chrono::Utc;
use http::header::HeaderMap;
use subtle::ConstantTimeEq;
use url::Url;

use crate::oauth2::config::{OAuth2Config, ProviderConfig};
use crate::oauth2::errors::OAuth2Error;
use crate::oauth2::types::{AuthResponse, Provider, StoredState};
use crate::storage::SharedCacheStore;
use crate::user::UserRecord;
use crate::utils::{
    expiry_after, gen_random_string, get_cookie, header_clear_cookie, header_set_cookie,
};

use super::provider::{check_scopes, exchange_code_for_token, fetch_profile};
use super::utils::{store_state, take_state};

/// Build the provider authorization URL and the CSRF cookie for a new login attempt.
///
/// The random `state` sent to the provider keys a cache entry holding the
/// provider and the CSRF token; the same token goes into the cookie.
pub(crate) async fn prepare_auth_request(
    cache: &SharedCacheStore,
    provider: &ProviderConfig,
    oauth2: &OAuth2Config,
) -> Result<(String, HeaderMap), OAuth2Error> {
    let expires_at = expiry_after(oauth2.state_max_age).ok_or_else(|| {
        OAuth2Error::Config(format!(
            "OAuth2 state max age out of range: {}",
            oauth2.state_max_age
        ))
    })?;
    let state = gen_random_string(32)?;
    let csrf_token = gen_random_string(32)?;

    let stored = StoredState {
        provider: provider.provider,
        csrf_token: csrf_token.clone(),
        expires_at,
    };
    store_state(cache, &state, &stored, oauth2.state_max_age).await?;

    let scope = provider.scopes.join(" ");
    let mut params = vec![
        ("response_type", "code"),
        ("client_id", provider.client_id.as_str()),
        ("redirect_uri", provider.redirect_uri.as_str()),
        ("state", state.as_str()),
    ];
    if !scope.is_empty() {
        params.push(("scope", scope.as_str()));
    }

    let auth_url = Url::parse_with_params(&provider.auth_url, &params)
        .map_err(|e| OAuth2Error::Config(format!("Invalid authorization URL: {e}")))?;

    tracing::debug!("Auth URL: {:#?}", auth_url.as_str());

    let mut headers = HeaderMap::new();
    header_set_cookie(
        &mut headers,
        &oauth2.csrf_cookie_name,
        &csrf_token,
        oauth2.state_max_age as i64,
        oauth2.secure,
    )?;

    Ok((auth_url.into(), headers))
}

/// Validate the callback against the pending login attempt and return the
/// authorization code.
///
/// The state entry is consumed before anything else, so even a denied or
/// failed callback cannot be replayed.
pub(crate) async fn verify_callback_state(
    cache: &SharedCacheStore,
    provider: Provider,
    oauth2: &OAuth2Config,
    auth_response: &AuthResponse,
    headers: &HeaderMap,
) -> Result<String, OAuth2Error> {
    let stored = match auth_response.state.as_deref().filter(|s| !s.is_empty()) {
        Some(state) => take_state(cache, state).await?,
        None => None,
    };

    if let Some(error) = &auth_response.error {
        tracing::info!(
            "{} returned error '{}': {:?}",
            provider,
            error,
            auth_response.error_description
        );
        return Err(OAuth2Error::ConsentDenied(error.clone()));
    }

    let stored = stored.ok_or_else(|| {
        OAuth2Error::StateNotFound("No pending login for this state".to_string())
    })?;

    if Utc::now() > stored.expires_at {
        tracing::error!("State Expired: {:#?}", stored.expires_at);
        return Err(OAuth2Error::StateExpired);
    }

    if stored.provider != provider {
        tracing::error!(
            "State issued for {} but callback came for {}",
            stored.provider,
            provider
        );
        return Err(OAuth2Error::StateMismatch);
    }

    let csrf_token = get_cookie(headers, &oauth2.csrf_cookie_name).ok_or_else(|| {
        OAuth2Error::SecurityTokenNotFound("No CSRF session cookie found".to_string())
    })?;

    if !bool::from(
        csrf_token
            .as_bytes()
            .ct_eq(stored.csrf_token.as_bytes()),
    ) {
        tracing::error!("CSRF Token in cookie does not match the stored token");
        return Err(OAuth2Error::CsrfTokenMismatch);
    }

    auth_response
        .code
        .clone()
        .filter(|c| !c.is_empty())
        .ok_or(OAuth2Error::MissingCode)
}

/// Exchange `code` for an access token and map the provider profile to a [`UserRecord`].
pub(crate) async fn fetch_user_record(
    client: &reqwest::Client,
    provider: &ProviderConfig,
    code: &str,
) -> Result<UserRecord, OAuth2Error> {
    let token = exchange_code_for_token(client, provider, code).await?;
    check_scopes(provider, &token)?;

    let profile = fetch_profile(client, provider, &token.access_token).await?;
    let user = UserRecord::from(profile);

    tracing::debug!("User record: {:#?}", user);
    Ok(user)
}

/// Append a header that expires the CSRF cookie.
pub(crate) fn clear_csrf_cookie(
    oauth2: &OAuth2Config,
    headers: &mut HeaderMap,
) -> Result<(), OAuth2Error> {
    header_clear_cookie(headers, &oauth2.csrf_cookie_name, oauth2.secure)?;
    Ok(())
}
