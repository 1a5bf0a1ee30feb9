//! HTTP user directory client

use super::UserDirectory;
use crate::config::StoreConfig;
use crate::domain::ids::UserId;
use crate::domain::{CustodianError, DirectoryError, Result, UserProfile};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, StatusCode};
use secrecy::ExposeSecret;
use std::time::Duration;

/// HTTP client for the hosted user directory
pub struct HttpUserDirectory {
    client: Client,
    config: StoreConfig,
    endpoint: String,
}

impl HttpUserDirectory {
    /// Create a new directory client from the shared store configuration
    pub fn new(config: StoreConfig) -> Self {
        let endpoint = config.endpoint.trim_end_matches('/').to_string();

        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .connect_timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            config,
            endpoint,
        }
    }
}

#[async_trait]
impl UserDirectory for HttpUserDirectory {
    async fn get_user(&self, user_id: &UserId) -> Result<UserProfile> {
        let url = format!("{}/users/{}", self.endpoint, user_id);

        tracing::debug!(user_id = %user_id, "Looking up user profile");

        let resp = self
            .client
            .get(&url)
            .header("X-Appwrite-Project", &self.config.project_id)
            .header("X-Appwrite-Key", self.config.api_key.expose_secret().as_ref())
            .send()
            .await
            .map_err(|e| CustodianError::Directory(DirectoryError::ConnectionFailed(e.to_string())))?;

        match resp.status() {
            s if s.is_success() => resp.json::<UserProfile>().await.map_err(|e| {
                CustodianError::Directory(DirectoryError::InvalidResponse(e.to_string()))
            }),
            StatusCode::NOT_FOUND => Err(CustodianError::Directory(DirectoryError::UserNotFound(
                user_id.to_string(),
            ))),
            status => {
                let body = resp.text().await.unwrap_or_default();
                Err(CustodianError::Directory(DirectoryError::InvalidResponse(
                    format!("status {status}: {body}"),
                )))
            }
        }
    }
}
