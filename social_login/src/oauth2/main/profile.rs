use crate::oauth2::types::{GoogleProfile, KakaoProfile, Provider, ProviderProfile};
use crate::user::UserRecord;

/// Providers sometimes send `""` for a field the user never filled in.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl From<GoogleProfile> for UserRecord {
    fn from(profile: GoogleProfile) -> Self {
        Self {
            id: profile.sub,
            name: profile.name.unwrap_or_default(),
            email: non_empty(profile.email),
            photo: non_empty(profile.picture),
            provider: Provider::Google,
        }
    }
}

impl From<KakaoProfile> for UserRecord {
    fn from(profile: KakaoProfile) -> Self {
        let (nickname, photo) = match profile.properties {
            Some(properties) => (non_empty(properties.nickname), properties.profile_image),
            None => (None, None),
        };
        let (email, username) = match profile.kakao_account {
            Some(account) => (
                account.email,
                account.profile.and_then(|p| non_empty(p.nickname)),
            ),
            None => (None, None),
        };

        Self {
            id: profile.id.to_string(),
            name: nickname.or(username).unwrap_or_default(),
            email: non_empty(email),
            photo: non_empty(photo),
            provider: Provider::Kakao,
        }
    }
}

impl From<ProviderProfile> for UserRecord {
    fn from(profile: ProviderProfile) -> Self {
        match profile {
            ProviderProfile::Google(p) => p.into(),
            ProviderProfile::Kakao(p) => p.into(),
        }
    }
}
