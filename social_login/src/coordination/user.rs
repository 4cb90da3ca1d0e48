use http::HeaderMap;

use crate::context::AuthContext;
use crate::session::SessionError;
use crate::user::UserRecord;

use super::errors::CoordinationError;

/// The user bound to the request's session.
///
/// `Unauthorized` when the cookie is missing, forged, or points at an
/// absent or expired session.
pub async fn get_current_user_core(
    ctx: &AuthContext,
    headers: &HeaderMap,
) -> Result<UserRecord, CoordinationError> {
    let session_id = ctx
        .sessions
        .session_id_from_headers(headers)
        .ok_or(CoordinationError::Unauthorized)?;

    ctx.sessions
        .read_user(&session_id)
        .await?
        .ok_or(CoordinationError::Unauthorized)
}

/// Destroy the request's session, if any, and return headers that clear the cookie.
///
/// Logging out without a session succeeds; only a store fault is an error.
pub async fn logout_core(
    ctx: &AuthContext,
    headers: &HeaderMap,
) -> Result<HeaderMap, CoordinationError> {
    if let Some(session_id) = ctx.sessions.session_id_from_headers(headers) {
        match ctx.sessions.destroy(&session_id).await {
            Ok(()) => tracing::info!("Logged out"),
            Err(SessionError::NotFound) => tracing::debug!("Logout for an absent session"),
            Err(e) => return Err(e.into()),
        }
    }

    let mut response_headers = HeaderMap::new();
    ctx.sessions.clear_session_cookie(&mut response_headers)?;
    Ok(response_headers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::AuthSettings;
    use crate::oauth2::{OAuth2Config, Provider, ProviderRegistry};
    use crate::session::SessionConfig;
    use crate::storage::{CacheData, CacheStore, InMemoryCacheStore, StorageError, shared};
    use async_trait::async_trait;
    use http::header::{COOKIE, SET_COOKIE};

    fn context_with(store: Box<dyn CacheStore>) -> AuthContext {
        AuthContext::new(
            shared(store),
            SessionConfig {
                cookie_name: "sid".to_string(),
                max_age: 86400,
                secure: false,
                secret: b"test-secret".to_vec(),
            },
            ProviderRegistry::new(),
            OAuth2Config {
                csrf_cookie_name: "oauth2_csrf".to_string(),
                state_max_age: 600,
                secure: false,
            },
            AuthSettings::default(),
        )
        .unwrap()
    }

    fn test_user() -> UserRecord {
        UserRecord {
            id: "42".to_string(),
            name: "Kim".to_string(),
            email: None,
            photo: None,
            provider: Provider::Kakao,
        }
    }

    /// Request headers carrying the cookie for a freshly created session.
    async fn signed_in(ctx: &AuthContext) -> HeaderMap {
        let session_id = ctx.sessions.create(test_user()).await.unwrap();
        let set_cookie = ctx.sessions.session_cookie_headers(&session_id).unwrap();
        let cookie = set_cookie
            .get(SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap()
            .split(';')
            .next()
            .unwrap()
            .to_string();

        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, cookie.parse().unwrap());
        headers
    }

    /// Store whose removals always fail.
    struct BrokenRemoveStore(InMemoryCacheStore);

    #[async_trait]
    impl CacheStore for BrokenRemoveStore {
        async fn init(&self) -> Result<(), StorageError> {
            Ok(())
        }

        async fn put_with_ttl(
            &mut self,
            prefix: &str,
            key: &str,
            value: CacheData,
            ttl: u64,
        ) -> Result<(), StorageError> {
            self.0.put_with_ttl(prefix, key, value, ttl).await
        }

        async fn get(&self, prefix: &str, key: &str) -> Result<Option<CacheData>, StorageError> {
            self.0.get(prefix, key).await
        }

        async fn remove(&mut self, _prefix: &str, _key: &str) -> Result<bool, StorageError> {
            Err(StorageError::Storage("connection reset".to_string()))
        }
    }

    #[tokio::test]
    async fn test_current_user_without_cookie() {
        let ctx = context_with(Box::new(InMemoryCacheStore::new()));
        let result = get_current_user_core(&ctx, &HeaderMap::new()).await;
        assert!(matches!(result, Err(CoordinationError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_current_user_with_session() {
        let ctx = context_with(Box::new(InMemoryCacheStore::new()));
        let headers = signed_in(&ctx).await;

        let user = get_current_user_core(&ctx, &headers).await.unwrap();
        assert_eq!(user, test_user());
    }

    #[tokio::test]
    async fn test_current_user_forged_cookie() {
        let ctx = context_with(Box::new(InMemoryCacheStore::new()));
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, "sid=abc.def".parse().unwrap());

        let result = get_current_user_core(&ctx, &headers).await;
        assert!(matches!(result, Err(CoordinationError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_logout_then_current_user() {
        let ctx = context_with(Box::new(InMemoryCacheStore::new()));
        let headers = signed_in(&ctx).await;

        let response_headers = logout_core(&ctx, &headers).await.unwrap();
        let cleared = response_headers.get(SET_COOKIE).unwrap().to_str().unwrap();
        assert!(cleared.starts_with("sid=;"));
        assert!(cleared.contains("Max-Age=0"));

        let result = get_current_user_core(&ctx, &headers).await;
        assert!(matches!(result, Err(CoordinationError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_logout_is_idempotent() {
        let ctx = context_with(Box::new(InMemoryCacheStore::new()));
        let headers = signed_in(&ctx).await;

        assert!(logout_core(&ctx, &headers).await.is_ok());
        assert!(logout_core(&ctx, &headers).await.is_ok());
        assert!(logout_core(&ctx, &HeaderMap::new()).await.is_ok());
    }

    #[tokio::test]
    async fn test_logout_store_fault() {
        let ctx = context_with(Box::new(BrokenRemoveStore(InMemoryCacheStore::new())));
        let headers = signed_in(&ctx).await;

        let result = logout_core(&ctx, &headers).await;
        assert!(matches!(
            result,
            Err(CoordinationError::SessionError(SessionError::Storage(_)))
        ));
    }
}
