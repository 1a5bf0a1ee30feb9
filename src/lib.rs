// Custodian - Collection Backup and Reminder Tool
// Copyright (c) 2025 Custodian Contributors
// Licensed under the MIT License

//! # Custodian - Collection Backup and Reminder Tool
//!
//! Custodian exports collections from a hosted document-database service
//! into flat CSV files, and scans for forms stuck in a pending state past
//! their deadline, e-mailing the owning user exactly once per reminder
//! cycle.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Fetching** full collections via bounded-size pages
//! - **Flattening** nested records into flat key-to-scalar mappings
//! - **Exporting** collections as dated CSV backup files
//! - **Scanning** for overdue pending forms and notifying their owners
//!
//! ## Architecture
//!
//! Custodian follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (fetch, transform, export, reminder)
//! - [`adapters`] - External integrations (document store, user directory, mail)
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use custodian::adapters::store::HttpStoreClient;
//! use custodian::config::load_config;
//! use custodian::core::export::BackupCoordinator;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Load configuration
//!     let config = load_config("custodian.toml")?;
//!
//!     // Create the backup coordinator
//!     let store = Arc::new(HttpStoreClient::new(config.store.clone()));
//!     let coordinator = BackupCoordinator::new(store, config.backup.clone());
//!
//!     // Execute the backup
//!     let summary = coordinator.execute_backup().await?;
//!
//!     println!("Exported {} collections", summary.artifacts.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Custodian uses the [`domain::CustodianError`] type for all errors:
//!
//! ```rust,no_run
//! use custodian::domain::CustodianError;
//!
//! fn example() -> Result<(), CustodianError> {
//!     // Errors are automatically converted using the ? operator
//!     let config = custodian::config::load_config("custodian.toml")?;
//!     Ok(())
//! }
//! ```
//!
//! ## Logging
//!
//! Custodian uses structured logging with the `tracing` crate:
//!
//! ```rust,no_run
//! use tracing::{info, warn, error};
//!
//! info!("Starting backup");
//! warn!(collection = "requestList", "No documents found");
//! error!(error = "connection refused", "Export failed");
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
