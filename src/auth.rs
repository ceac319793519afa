//! Admin credential check

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::config::AdminConfig;

/// Accept any JSON value; anything but a string can never match
fn string_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(Some(s)),
        _ => Ok(None),
    }
}

/// Login form posted by the admin screen
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    #[serde(deserialize_with = "string_or_none")]
    pub username: Option<String>,
    #[serde(deserialize_with = "string_or_none")]
    pub password: Option<String>,
}

/// Compares login attempts against the configured admin account
#[derive(Debug, Clone)]
pub struct Authenticator {
    admin: AdminConfig,
}

impl Authenticator {
    pub fn new(admin: AdminConfig) -> Self {
        Self { admin }
    }

    /// True only when both fields match. Both are always compared.
    pub fn verify(&self, login: &LoginRequest) -> bool {
        let user_ok = login.username.as_deref() == Some(self.admin.username.as_str());
        let pass_ok = login.password.as_deref() == Some(self.admin.password.as_str());
        user_ok & pass_ok
    }
}
