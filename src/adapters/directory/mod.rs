//! User directory adapter
//!
//! Resolves user ids to contact profiles. The hosted service exposes the
//! directory next to the document API, so the HTTP implementation reuses the
//! store's endpoint and credentials.

pub mod client;

use crate::domain::ids::UserId;
use crate::domain::{Result, UserProfile};
use async_trait::async_trait;

/// Lookup operations against the user directory
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Fetch the contact profile for a user id
    ///
    /// Fails with a not-found error for unknown ids.
    async fn get_user(&self, user_id: &UserId) -> Result<UserProfile>;
}

pub use client::HttpUserDirectory;
