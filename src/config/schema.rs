//! Configuration schema types
//!
//! This module defines the configuration structure for Custodian.

use crate::config::SecretString;
use serde::Deserialize;
use url::Url;

/// Main Custodian configuration
///
/// This is the root configuration structure that maps to the TOML file.
#[derive(Debug, Clone, Deserialize)]
pub struct CustodianConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Document store connection
    pub store: StoreConfig,

    /// Backup export settings
    pub backup: BackupConfig,

    /// Pending-reminder scan settings (required for the remind command)
    #[serde(default)]
    pub reminder: Option<ReminderConfig>,

    /// E-mail delivery settings (required for the remind command)
    #[serde(default)]
    pub email: Option<EmailConfig>,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CustodianConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.store.validate()?;
        self.backup.validate()?;

        // The reminder and e-mail sections are optional at load time; a
        // deployment that only runs backups never has to supply them. The
        // remind command checks for their presence itself.
        if let Some(ref reminder) = self.reminder {
            reminder.validate()?;
        }
        if let Some(ref email) = self.email {
            email.validate()?;
        }

        self.logging.validate()?;
        Ok(())
    }

    /// Reminder section, or a configuration error naming what is missing
    pub fn reminder_section(&self) -> Result<&ReminderConfig, String> {
        self.reminder
            .as_ref()
            .ok_or_else(|| "[reminder] section is required for the remind command".to_string())
    }

    /// E-mail section, or a configuration error naming what is missing
    pub fn email_section(&self) -> Result<&EmailConfig, String> {
        self.email
            .as_ref()
            .ok_or_else(|| "[email] section is required for the remind command".to_string())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

/// Document store connection configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Base URL of the hosted store API, e.g. `https://cloud.example.io/v1`
    pub endpoint: String,

    /// Project identifier sent with every request
    pub project_id: String,

    /// API key
    /// Stored securely in memory and automatically zeroized on drop
    pub api_key: SecretString,

    /// Database identifier all collections live under
    pub database_id: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl StoreConfig {
    fn validate(&self) -> Result<(), String> {
        Url::parse(&self.endpoint)
            .map_err(|e| format!("store.endpoint is not a valid URL: {e}"))?;
        if self.project_id.trim().is_empty() {
            return Err("store.project_id must not be empty".to_string());
        }
        if self.database_id.trim().is_empty() {
            return Err("store.database_id must not be empty".to_string());
        }
        if self.timeout_seconds == 0 {
            return Err("store.timeout_seconds must be greater than zero".to_string());
        }
        Ok(())
    }
}

/// Backup export configuration
#[derive(Debug, Clone, Deserialize)]
pub struct BackupConfig {
    /// Directory CSV artifacts are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Safety ceiling on pages fetched per collection
    #[serde(default = "default_max_pages")]
    pub max_pages: usize,

    /// Collections to export, processed in the order listed
    pub collections: Vec<CollectionMapping>,
}

impl BackupConfig {
    fn validate(&self) -> Result<(), String> {
        if self.collections.is_empty() {
            return Err("backup.collections must list at least one collection".to_string());
        }
        if self.max_pages == 0 {
            return Err("backup.max_pages must be greater than zero".to_string());
        }
        let mut seen = std::collections::HashSet::new();
        for mapping in &self.collections {
            if mapping.name.trim().is_empty() {
                return Err("backup.collections entries must have a non-empty name".to_string());
            }
            if mapping.id.trim().is_empty() {
                return Err(format!(
                    "backup collection '{}' must have a non-empty id",
                    mapping.name
                ));
            }
            if !seen.insert(mapping.name.as_str()) {
                return Err(format!(
                    "backup collection name '{}' is listed more than once",
                    mapping.name
                ));
            }
        }
        Ok(())
    }
}

/// Logical name to store identifier pair
#[derive(Debug, Clone, Deserialize)]
pub struct CollectionMapping {
    /// Logical name used for file naming and logging
    pub name: String,

    /// Store-specific collection identifier
    pub id: String,
}

/// Pending-reminder scan configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ReminderConfig {
    /// Collection holding the pending forms to scan
    pub collection_id: String,

    /// Collection holding the related records that carry ownership metadata
    pub related_collection_id: String,

    /// Base URL the reminder's deep link points at; the record id is
    /// appended as `?id=...`
    pub form_base_url: String,
}

impl ReminderConfig {
    fn validate(&self) -> Result<(), String> {
        if self.collection_id.trim().is_empty() {
            return Err("reminder.collection_id must not be empty".to_string());
        }
        if self.related_collection_id.trim().is_empty() {
            return Err("reminder.related_collection_id must not be empty".to_string());
        }
        Url::parse(&self.form_base_url)
            .map_err(|e| format!("reminder.form_base_url is not a valid URL: {e}"))?;
        Ok(())
    }
}

/// E-mail delivery configuration
#[derive(Debug, Clone, Deserialize)]
pub struct EmailConfig {
    /// Delivery provider send endpoint
    #[serde(default = "default_mail_endpoint")]
    pub endpoint: String,

    /// Provider API key
    /// Stored securely in memory and automatically zeroized on drop
    pub api_key: SecretString,

    /// Sender address
    pub from_address: String,

    /// Sender display name
    #[serde(default = "default_from_name")]
    pub from_name: String,
}

impl EmailConfig {
    fn validate(&self) -> Result<(), String> {
        Url::parse(&self.endpoint)
            .map_err(|e| format!("email.endpoint is not a valid URL: {e}"))?;
        if !self.from_address.contains('@') {
            return Err(format!(
                "email.from_address '{}' is not a valid address",
                self.from_address
            ));
        }
        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log directory
    #[serde(default = "default_log_path")]
    pub local_path: String,

    /// Log rotation (daily or hourly)
    #[serde(default = "default_rotation")]
    pub local_rotation: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_log_path(),
            local_rotation: default_rotation(),
        }
    }
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }
        Ok(())
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_output_dir() -> String {
    "backup".to_string()
}

fn default_max_pages() -> usize {
    1000
}

fn default_mail_endpoint() -> String {
    "https://api.sendgrid.com/v3/mail/send".to_string()
}

fn default_from_name() -> String {
    "Custodian".to_string()
}

fn default_log_path() -> String {
    "logs".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}
