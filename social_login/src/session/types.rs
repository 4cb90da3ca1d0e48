use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::session::errors::SessionError;
use crate::storage::CacheData;
use crate::user::UserRecord;

/// Opaque session identifier; the only thing the browser holds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(id: String) -> Self {
        Self(id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Server-side session state.
///
/// A record without a `user` is treated exactly like a missing session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    pub session_id: SessionId,
    pub user: Option<UserRecord>,
    pub expires_at: DateTime<Utc>,
}

impl SessionRecord {
    pub fn is_expired(&self) -> bool {
        self.expires_at <= Utc::now()
    }
}

impl TryFrom<&SessionRecord> for CacheData {
    type Error = SessionError;

    fn try_from(record: &SessionRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            value: serde_json::to_string(record)
                .map_err(|e| SessionError::Storage(e.to_string()))?,
            expires_at: record.expires_at,
        })
    }
}

impl TryFrom<CacheData> for SessionRecord {
    type Error = SessionError;

    fn try_from(data: CacheData) -> Result<Self, Self::Error> {
        serde_json::from_str(&data.value).map_err(|e| SessionError::Storage(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oauth2::Provider;
    use chrono::Duration;

    #[test]
    fn test_session_record_cache_round_trip() {
        let record = SessionRecord {
            session_id: SessionId::new("abc".to_string()),
            user: Some(UserRecord {
                id: "42".to_string(),
                name: "Kim".to_string(),
                email: None,
                photo: None,
                provider: Provider::Google,
            }),
            expires_at: Utc::now() + Duration::hours(24),
        };

        let data = CacheData::try_from(&record).unwrap();
        assert_eq!(data.expires_at, record.expires_at);

        let back = SessionRecord::try_from(data).unwrap();
        assert_eq!(back.session_id, record.session_id);
        assert_eq!(back.user, record.user);
    }

    #[test]
    fn test_corrupt_cache_data_is_storage_error() {
        let data = CacheData {
            value: "not json".to_string(),
            expires_at: Utc::now(),
        };
        assert!(matches!(
            SessionRecord::try_from(data),
            Err(SessionError::Storage(_))
        ));
    }
}
