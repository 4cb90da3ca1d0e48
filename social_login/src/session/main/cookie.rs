//! Session cookie encoding.
//!
//! The cookie value is `<session_id>.<signature>` where the signature is the
//! base64url HMAC-SHA256 of the session id under the configured secret. A
//! value whose signature does not verify is treated as if no cookie was sent.

use hmac::{Hmac, Mac};
use http::HeaderMap;
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::session::errors::SessionError;
use crate::session::types::SessionId;
use crate::utils::{
    base64url_decode, base64url_encode, get_cookie, header_clear_cookie, header_set_cookie,
};

use super::store::SessionStore;

type HmacSha256 = Hmac<Sha256>;

fn sign(secret: &[u8], session_id: &str) -> Result<Vec<u8>, SessionError> {
    let mut mac =
        HmacSha256::new_from_slice(secret).map_err(|e| SessionError::Crypto(e.to_string()))?;
    mac.update(session_id.as_bytes());
    Ok(mac.finalize().into_bytes().to_vec())
}

pub(super) fn encode_cookie_value(
    secret: &[u8],
    session_id: &SessionId,
) -> Result<String, SessionError> {
    let signature = sign(secret, session_id.as_str())?;
    Ok(format!("{}.{}", session_id, base64url_encode(&signature)))
}

pub(super) fn decode_cookie_value(secret: &[u8], value: &str) -> Option<SessionId> {
    let (session_id, signature) = value.rsplit_once('.')?;
    if session_id.is_empty() {
        return None;
    }

    let provided = base64url_decode(signature).ok()?;
    let expected = sign(secret, session_id).ok()?;

    if bool::from(provided.as_slice().ct_eq(expected.as_slice())) {
        Some(SessionId::new(session_id.to_string()))
    } else {
        tracing::warn!("Session cookie signature mismatch");
        None
    }
}

impl SessionStore {
    /// `Set-Cookie` headers carrying the signed session id.
    pub fn session_cookie_headers(
        &self,
        session_id: &SessionId,
    ) -> Result<HeaderMap, SessionError> {
        let config = self.config();
        let value = encode_cookie_value(&config.secret, session_id)?;

        let mut headers = HeaderMap::new();
        header_set_cookie(
            &mut headers,
            &config.cookie_name,
            &value,
            config.max_age as i64,
            config.secure,
        )?;
        Ok(headers)
    }

    /// Append a header that expires the session cookie.
    pub fn clear_session_cookie(&self, headers: &mut HeaderMap) -> Result<(), SessionError> {
        let config = self.config();
        header_clear_cookie(headers, &config.cookie_name, config.secure)?;
        Ok(())
    }

    /// The verified session id from the request cookies, if any.
    pub fn session_id_from_headers(&self, headers: &HeaderMap) -> Option<SessionId> {
        let config = self.config();
        let Some(value) = get_cookie(headers, &config.cookie_name) else {
            tracing::debug!("No session cookie '{}' found in cookies", config.cookie_name);
            return None;
        };
        decode_cookie_value(&config.secret, &value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::config::SessionConfig;
    use crate::storage::{InMemoryCacheStore, shared};
    use http::header::{COOKIE, SET_COOKIE};

    const SECRET: &[u8] = b"test-secret";

    fn test_store(secure: bool) -> SessionStore {
        SessionStore::new(
            shared(Box::new(InMemoryCacheStore::new())),
            SessionConfig {
                cookie_name: "sid".to_string(),
                max_age: 86400,
                secure,
                secret: SECRET.to_vec(),
            },
        )
    }

    #[test]
    fn test_cookie_value_round_trip() {
        let session_id = SessionId::new("abc123".to_string());
        let value = encode_cookie_value(SECRET, &session_id).unwrap();

        assert!(value.starts_with("abc123."));
        assert_eq!(decode_cookie_value(SECRET, &value), Some(session_id));
    }

    #[test]
    fn test_cookie_value_rejects_tampering() {
        let value = encode_cookie_value(SECRET, &SessionId::new("abc123".to_string())).unwrap();
        let (_, signature) = value.rsplit_once('.').unwrap();

        // Same signature on a different id
        assert_eq!(decode_cookie_value(SECRET, &format!("other.{signature}")), None);
        // Different secret
        assert_eq!(decode_cookie_value(b"another-secret", &value), None);
        // Missing or malformed signature
        assert_eq!(decode_cookie_value(SECRET, "abc123"), None);
        assert_eq!(decode_cookie_value(SECRET, "abc123.!!!"), None);
        assert_eq!(decode_cookie_value(SECRET, &format!(".{signature}")), None);
    }

    #[test]
    fn test_session_cookie_headers() {
        let store = test_store(false);
        let session_id = SessionId::new("abc123".to_string());

        let headers = store.session_cookie_headers(&session_id).unwrap();
        let cookie = headers.get(SET_COOKIE).unwrap().to_str().unwrap();

        assert!(cookie.starts_with("sid=abc123."));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Max-Age=86400"));
        assert!(!cookie.contains("Secure"));
    }

    #[test]
    fn test_session_cookie_secure_when_configured() {
        let store = test_store(true);
        let headers = store
            .session_cookie_headers(&SessionId::new("abc".to_string()))
            .unwrap();
        let cookie = headers.get(SET_COOKIE).unwrap().to_str().unwrap();
        assert!(cookie.contains("Secure"));
    }

    #[test]
    fn test_session_id_from_headers() {
        let store = test_store(false);
        let session_id = SessionId::new("abc123".to_string());
        let value = encode_cookie_value(SECRET, &session_id).unwrap();

        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, format!("theme=dark; sid={value}").parse().unwrap());
        assert_eq!(store.session_id_from_headers(&headers), Some(session_id));

        let mut forged = HeaderMap::new();
        forged.insert(COOKIE, "sid=abc123.forged".parse().unwrap());
        assert_eq!(store.session_id_from_headers(&forged), None);

        assert_eq!(store.session_id_from_headers(&HeaderMap::new()), None);
    }

    #[test]
    fn test_clear_session_cookie() {
        let store = test_store(false);
        let mut headers = HeaderMap::new();
        store.clear_session_cookie(&mut headers).unwrap();

        let cookie = headers.get(SET_COOKIE).unwrap().to_str().unwrap();
        assert!(cookie.starts_with("sid=;"));
        assert!(cookie.contains("Max-Age=0"));
    }
}
