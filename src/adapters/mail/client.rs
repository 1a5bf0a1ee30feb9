//! HTTP mail provider client
//!
//! Posts a v3-style send payload (personalizations / from / content) to the
//! configured provider endpoint with bearer-key auth.

use super::Mailer;
use crate::config::EmailConfig;
use crate::domain::{CustodianError, MailError, Result};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use secrecy::ExposeSecret;
use std::time::Duration;

/// HTTP client for the e-mail delivery provider
pub struct HttpMailer {
    client: Client,
    config: EmailConfig,
}

impl HttpMailer {
    /// Create a new mailer from configuration
    pub fn new(config: EmailConfig) -> Self {
        let client = ClientBuilder::new()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");

        Self { client, config }
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send(&self, to: &str, subject: &str, html_body: &str) -> Result<()> {
        if !to.contains('@') {
            return Err(CustodianError::Mail(MailError::InvalidMessage(format!(
                "recipient '{to}' is not a valid address"
            ))));
        }

        let payload = serde_json::json!({
            "personalizations": [{
                "to": [{ "email": to }],
                "subject": subject,
            }],
            "from": {
                "email": self.config.from_address,
                "name": self.config.from_name,
            },
            "content": [{
                "type": "text/html",
                "value": html_body,
            }],
        });

        tracing::debug!(to = %to, subject = %subject, "Sending e-mail");

        let resp = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(self.config.api_key.expose_secret())
            .json(&payload)
            .send()
            .await
            .map_err(|e| CustodianError::Mail(MailError::ConnectionFailed(e.to_string())))?;

        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }

        let body = resp.text().await.unwrap_or_default();
        Err(CustodianError::Mail(MailError::Rejected {
            status: status.as_u16(),
            message: body,
        }))
    }
}
