//! User domain entity and related types.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// User record as persisted in the `user` hash.
///
/// The password is stored exactly as submitted; existing records depend on
/// that format, so switching to a hash has to be a migration of its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub account: String,
    pub password: String,
    #[serde(default)]
    pub icon_path: Option<String>,
}

impl User {
    /// Create a user without an icon
    pub fn new(account: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            account: account.into(),
            password: password.into(),
            icon_path: None,
        }
    }

    /// Check a submitted password against the stored one
    pub fn password_matches(&self, candidate: &str) -> bool {
        self.password == candidate
    }

    pub fn set_icon_path(&mut self, path: impl Into<String>) {
        self.icon_path = Some(path.into());
    }

    pub fn set_password(&mut self, password: impl Into<String>) {
        self.password = password.into();
    }
}

/// User response (safe to return to client)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    /// Account identifier
    #[schema(example = "traveler01")]
    pub account: String,
    /// Relative path of the uploaded avatar
    #[schema(example = "upload/1700000000_aB3xYz.png")]
    pub icon_path: Option<String>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            account: user.account,
            icon_path: user.icon_path,
        }
    }
}
