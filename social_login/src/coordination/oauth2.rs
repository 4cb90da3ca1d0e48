use http::HeaderMap;
use http::header::SET_COOKIE;

use crate::context::AuthContext;
use crate::oauth2::{
    AuthResponse, ProviderConfig, clear_csrf_cookie, fetch_user_record, prepare_auth_request,
    verify_callback_state,
};
use crate::session::{SessionError, SessionId};

use super::errors::CoordinationError;

/// Progress of a single login attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginState {
    Unauthenticated,
    AwaitingProviderRedirect,
    AwaitingCallback,
    Authenticated,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginEvent {
    /// User picked a provider
    Begin,
    /// Browser was sent to the provider
    Redirected,
    /// Callback verified and a session was created
    Succeeded,
    /// Anything that ends the attempt without a session
    Failed,
    /// Back to the login view after a failure, or logout
    Reset,
}

impl LoginState {
    pub fn transition(self, event: LoginEvent) -> Result<Self, CoordinationError> {
        use LoginEvent as E;
        use LoginState as S;

        let next = match (self, event) {
            (S::Unauthenticated | S::Authenticated, E::Begin) => S::AwaitingProviderRedirect,
            (S::AwaitingProviderRedirect, E::Redirected) => S::AwaitingCallback,
            (S::AwaitingCallback, E::Succeeded) => S::Authenticated,
            (S::AwaitingProviderRedirect | S::AwaitingCallback, E::Failed) => S::Failed,
            (S::Failed | S::Authenticated, E::Reset) => S::Unauthenticated,
            (state, event) => {
                return Err(CoordinationError::InvalidState(format!(
                    "{event:?} in {state:?}"
                )));
            }
        };

        tracing::debug!("Login state {:?} -> {:?}", self, next);
        Ok(next)
    }
}

/// Start a login with `provider`: returns the authorization URL to redirect
/// to and the headers carrying the CSRF cookie.
pub async fn begin_auth_core(
    ctx: &AuthContext,
    provider: &str,
) -> Result<(String, HeaderMap), CoordinationError> {
    let config = ctx.providers.resolve(provider)?;
    let state = LoginState::Unauthenticated.transition(LoginEvent::Begin)?;

    let (auth_url, headers) = prepare_auth_request(&ctx.cache, config, &ctx.oauth2).await?;

    state.transition(LoginEvent::Redirected)?;
    tracing::info!("Redirecting to {} for sign-in", config.provider);
    Ok((auth_url, headers))
}

/// Result of a provider callback: where to send the browser and with which cookies.
#[derive(Debug)]
pub struct CallbackResponse {
    pub headers: HeaderMap,
    pub location: String,
    pub state: LoginState,
}

/// Finish a login attempt.
///
/// Only an unknown or unconfigured provider is an error here. Every other
/// failure ends as a redirect to the login-failure page without a session.
/// The CSRF cookie is cleared in both cases.
pub async fn handle_callback_core(
    ctx: &AuthContext,
    provider: &str,
    auth_response: &AuthResponse,
    request_headers: &HeaderMap,
) -> Result<CallbackResponse, CoordinationError> {
    let config = ctx.providers.resolve(provider)?;
    let state = LoginState::AwaitingCallback;

    let mut headers = HeaderMap::new();
    clear_csrf_cookie(&ctx.oauth2, &mut headers)?;

    match complete_login(ctx, config, auth_response, request_headers).await {
        Ok(session_headers) => {
            for value in session_headers.get_all(SET_COOKIE) {
                headers.append(SET_COOKIE, value.clone());
            }
            Ok(CallbackResponse {
                headers,
                location: ctx.settings.client_origin.clone(),
                state: state.transition(LoginEvent::Succeeded)?,
            })
        }
        Err(e) => {
            tracing::warn!("{} login failed: {}", config.provider, e);
            Ok(CallbackResponse {
                headers,
                location: ctx.settings.login_failure_url.clone(),
                state: state.transition(LoginEvent::Failed)?,
            })
        }
    }
}

/// Verify the callback, build the user and swap in a fresh session.
/// Returns the `Set-Cookie` headers of the new session.
async fn complete_login(
    ctx: &AuthContext,
    config: &ProviderConfig,
    auth_response: &AuthResponse,
    request_headers: &HeaderMap,
) -> Result<HeaderMap, CoordinationError> {
    let code = verify_callback_state(
        &ctx.cache,
        config.provider,
        &ctx.oauth2,
        auth_response,
        request_headers,
    )
    .await?;

    let user = fetch_user_record(&ctx.client, config, &code).await?;
    let user_id = user.id.clone();

    let session_id = ctx.sessions.create(user).await?;
    let cookie_headers = match ctx.sessions.session_cookie_headers(&session_id) {
        Ok(headers) => headers,
        Err(e) => {
            discard_session(ctx, &session_id).await;
            return Err(e.into());
        }
    };

    if let Some(old_session_id) = ctx.sessions.session_id_from_headers(request_headers) {
        discard_session(ctx, &old_session_id).await;
    }

    tracing::info!("Signed in {} user {}", config.provider, user_id);
    Ok(cookie_headers)
}

async fn discard_session(ctx: &AuthContext, session_id: &SessionId) {
    match ctx.sessions.destroy(session_id).await {
        Ok(()) | Err(SessionError::NotFound) => {}
        Err(e) => tracing::warn!("Failed to remove previous session: {}", e),
    }
}
