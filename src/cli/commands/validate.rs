//! Validate config command implementation

use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("Validating configuration file: {config_path}");
        println!();

        // load_config validates after parsing
        let config = match load_config(config_path) {
            Ok(c) => {
                println!("Configuration is valid");
                c
            }
            Err(e) => {
                println!("Configuration validation failed");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!("  Store Endpoint: {}", config.store.endpoint);
        println!("  Database: {}", config.store.database_id);
        println!("  Backup Directory: {}", config.backup.output_dir);
        println!("  Page Ceiling: {}", config.backup.max_pages);
        println!("  Collections:");
        for mapping in &config.backup.collections {
            println!("    {} ({})", mapping.name, mapping.id);
        }
        match &config.reminder {
            Some(reminder) => {
                println!("  Reminder Collection: {}", reminder.collection_id);
                println!("  Reminder Form URL: {}", reminder.form_base_url);
            }
            None => println!("  Reminder: not configured"),
        }
        match &config.email {
            Some(email) => {
                println!("  Mail From: {} <{}>", email.from_name, email.from_address);
            }
            None => println!("  Mail: not configured"),
        }
        println!();
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_validate_missing_file() {
        let args = ValidateArgs {};
        let code = args.execute("does-not-exist.toml").await.unwrap();
        assert_eq!(code, 2);
    }
}
