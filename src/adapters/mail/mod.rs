//! E-mail delivery adapter
//!
//! One delivery mechanism per deployment: the [`Mailer`] trait with an HTTP
//! provider implementation. A send either confirms delivery acceptance or
//! fails; callers decide what state to mutate afterwards.

pub mod client;

use crate::domain::Result;
use async_trait::async_trait;

/// Outbound e-mail delivery
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Send a single HTML e-mail
    ///
    /// Returns Ok only when the provider accepted the message.
    async fn send(&self, to: &str, subject: &str, html_body: &str) -> Result<()>;
}

pub use client::HttpMailer;
