//! Canonical, provider-agnostic user record.

use serde::{Deserialize, Serialize};

use crate::oauth2::Provider;

/// Profile of the signed-in user as exposed by the profile API.
///
/// Built once per login from the provider's profile and stored inside the
/// session; nothing else from the provider response is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub photo: Option<String>,
    pub provider: Provider,
}
