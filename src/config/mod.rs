//! Configuration management for Custodian.
//!
//! This module provides TOML-based configuration loading, parsing, and
//! validation.
//!
//! # Overview
//!
//! Custodian uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - Environment variable overrides (`CUSTODIAN_*` prefix)
//! - Default values for optional settings
//! - Comprehensive validation
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [store]
//! endpoint = "https://cloud.example.io/v1"
//! project_id = "${CUSTODIAN_STORE_PROJECT_ID}"
//! api_key = "${CUSTODIAN_STORE_API_KEY}"
//! database_id = "68ba8a9c001f17064e15"
//!
//! [backup]
//! output_dir = "backup"
//!
//! [[backup.collections]]
//! name = "user"
//! id = "68ba8c240002116fa647"
//!
//! [reminder]
//! collection_id = "68bf9d62002b4f5f7f23"
//! related_collection_id = "68ba918c0022d2b9a429"
//! form_base_url = "https://forms.example.com/posteval.html"
//!
//! [email]
//! api_key = "${CUSTODIAN_EMAIL_API_KEY}"
//! from_address = "noreply@example.com"
//! from_name = "Evaluation System"
//! ```
//!
//! Credentials are never compiled into the binary: they are supplied via the
//! environment (or a local `.env` file) and held as [`SecretString`] values
//! that redact their Debug output and zeroize on drop.

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::load_config;
pub use schema::{
    ApplicationConfig, BackupConfig, CollectionMapping, CustodianConfig, EmailConfig,
    LoggingConfig, ReminderConfig, StoreConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
