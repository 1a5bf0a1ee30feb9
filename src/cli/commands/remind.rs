//! Remind command implementation
//!
//! Scans the configured collection for overdue pending forms and notifies
//! each owner once.

use crate::adapters::directory::HttpUserDirectory;
use crate::adapters::mail::HttpMailer;
use crate::adapters::store::HttpStoreClient;
use crate::config::load_config;
use crate::core::reminder::ReminderScanner;
use chrono::Utc;
use clap::Args;
use std::sync::Arc;

/// Arguments for the remind command
#[derive(Args, Debug)]
pub struct RemindArgs {}

impl RemindArgs {
    /// Execute the remind command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting remind command");

        // Load configuration
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Configuration error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        let reminder = match config.reminder_section() {
            Ok(r) => r.clone(),
            Err(e) => {
                eprintln!("Configuration error: {e}");
                return Ok(2);
            }
        };
        let email = match config.email_section() {
            Ok(e) => e.clone(),
            Err(e) => {
                eprintln!("Configuration error: {e}");
                return Ok(2);
            }
        };

        let system_name = email.from_name.clone();
        let store = Arc::new(HttpStoreClient::new(config.store.clone()));
        let directory = Arc::new(HttpUserDirectory::new(config.store.clone()));
        let mailer = Arc::new(HttpMailer::new(email));

        let scanner = ReminderScanner::new(store, directory, mailer, reminder, system_name);

        match scanner.scan_and_remind(Utc::now()).await {
            Ok(summary) => {
                println!(
                    "Processed {} pending reminder(s): {} sent, {} skipped",
                    summary.processed, summary.sent, summary.skipped
                );
                Ok(0)
            }
            Err(e) => {
                tracing::error!(error = %e, "Reminder scan failed");
                eprintln!("Reminder scan failed: {e}");
                Ok(5) // Fatal error exit code
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_missing_config_is_a_configuration_error() {
        let args = RemindArgs {};
        let code = args.execute("does-not-exist.toml").await.unwrap();
        assert_eq!(code, 2);
    }

    #[tokio::test]
    async fn test_missing_reminder_section_is_a_configuration_error() {
        let toml_content = r#"
[store]
endpoint = "https://cloud.example.io/v1"
project_id = "proj-1"
api_key = "secret-key"
database_id = "db-1"

[[backup.collections]]
name = "user"
id = "col-user"
"#;
        let mut temp_file = tempfile::NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let args = RemindArgs {};
        let code = args
            .execute(temp_file.path().to_str().unwrap())
            .await
            .unwrap();
        assert_eq!(code, 2);
    }
}
