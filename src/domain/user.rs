//! User profile model

use crate::domain::ids::UserId;
use serde::Deserialize;

/// Contact profile resolved from the user directory
#[derive(Debug, Clone, Deserialize)]
pub struct UserProfile {
    /// Directory account id
    #[serde(rename = "$id")]
    pub id: UserId,

    /// E-mail address reminders are delivered to
    pub email: String,

    /// Display name; may be empty for accounts that never set one
    #[serde(default)]
    pub name: String,
}

impl UserProfile {
    /// Name to greet the user with, falling back to the address
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.email
        } else {
            &self.name
        }
    }
}
