use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::errors::OAuth2Error;
use crate::storage::CacheData;

/// Supported identity providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Google,
    Kakao,
}

impl Provider {
    pub const ALL: [Provider; 2] = [Provider::Google, Provider::Kakao];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Google => "google",
            Self::Kakao => "kakao",
        }
    }

    pub(crate) fn env_prefix(&self) -> &'static str {
        match self {
            Self::Google => "GOOGLE",
            Self::Kakao => "KAKAO",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = OAuth2Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "google" => Ok(Self::Google),
            "kakao" => Ok(Self::Kakao),
            other => Err(OAuth2Error::UnknownProvider(other.to_string())),
        }
    }
}

/// Query parameters the provider appends to the callback URL.
#[derive(Debug, Default, Deserialize)]
pub struct AuthResponse {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub(super) struct TokenResponse {
    pub(super) access_token: String,
    pub(super) token_type: Option<String>,
    pub(super) expires_in: Option<u64>,
    pub(super) scope: Option<String>,
}

/// Login attempt bookkeeping, stored under the random `state` value.
#[derive(Serialize, Clone, Deserialize, Debug)]
pub(super) struct StoredState {
    pub(super) provider: Provider,
    pub(super) csrf_token: String,
    pub(super) expires_at: DateTime<Utc>,
}

impl TryFrom<&StoredState> for CacheData {
    type Error = OAuth2Error;

    fn try_from(data: &StoredState) -> Result<Self, Self::Error> {
        Ok(Self {
            value: serde_json::to_string(data).map_err(|e| OAuth2Error::Serde(e.to_string()))?,
            expires_at: data.expires_at,
        })
    }
}

impl TryFrom<CacheData> for StoredState {
    type Error = OAuth2Error;

    fn try_from(data: CacheData) -> Result<Self, Self::Error> {
        serde_json::from_str(&data.value).map_err(|e| OAuth2Error::Storage(e.to_string()))
    }
}

/// Google OpenID Connect userinfo document.
#[derive(Debug, Clone, Deserialize)]
pub(super) struct GoogleProfile {
    #[serde(alias = "id")]
    pub(super) sub: String,
    pub(super) name: Option<String>,
    pub(super) email: Option<String>,
    pub(super) picture: Option<String>,
}

/// Kakao `/v2/user/me` document.
#[derive(Debug, Clone, Deserialize)]
pub(super) struct KakaoProfile {
    pub(super) id: u64,
    pub(super) properties: Option<KakaoProperties>,
    pub(super) kakao_account: Option<KakaoAccount>,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct KakaoProperties {
    pub(super) nickname: Option<String>,
    pub(super) profile_image: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct KakaoAccount {
    pub(super) email: Option<String>,
    pub(super) profile: Option<KakaoAccountProfile>,
}

#[derive(Debug, Clone, Deserialize)]
pub(super) struct KakaoAccountProfile {
    pub(super) nickname: Option<String>,
}

/// Raw profile, tagged by the provider that returned it.
#[derive(Debug, Clone)]
pub(super) enum ProviderProfile {
    Google(GoogleProfile),
    Kakao(KakaoProfile),
}
