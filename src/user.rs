use serde::{Deserialize, Serialize};
use std::fmt;

const FREE_TIER: &str = "Free";

/// Subscription tier of the signed-in user. Anything other than "Free" is a
/// paid tier.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Subscription(String);

impl Subscription {
    pub fn new(tier: impl Into<String>) -> Self {
        Self(tier.into())
    }

    pub fn free() -> Self {
        Self(FREE_TIER.to_owned())
    }

    pub fn is_free(&self) -> bool {
        self.0 == FREE_TIER
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Subscription {
    fn default() -> Self {
        Self::free()
    }
}

impl fmt::Display for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Response of the current-user lookup. Only the subscription is read here.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct CurrentUser {
    #[serde(default)]
    pub subscription: Subscription,
}

/// Display information about the signed-in user kept by the auth provider.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}
