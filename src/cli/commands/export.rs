//! Export command implementation
//!
//! Runs the full backup: every configured collection, sequentially, into
//! dated CSV files.

use crate::adapters::store::HttpStoreClient;
use crate::config::load_config;
use crate::core::export::BackupCoordinator;
use clap::Args;
use std::sync::Arc;

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Override the backup output directory
    #[arg(long)]
    pub output_dir: Option<String>,
}

impl ExportArgs {
    /// Execute the export command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting export command");

        // Load configuration
        let mut config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("Configuration error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        // Apply CLI overrides
        if let Some(output_dir) = &self.output_dir {
            tracing::info!(output_dir = %output_dir, "Overriding output directory from CLI");
            config.backup.output_dir = output_dir.clone();
        }

        let store = Arc::new(HttpStoreClient::new(config.store.clone()));
        let coordinator = BackupCoordinator::new(store, config.backup.clone());

        let summary = match coordinator.execute_backup().await {
            Ok(summary) => summary,
            Err(e) => {
                tracing::error!(error = %e, "Backup run failed");
                eprintln!("Backup failed: {e}");
                return Ok(5); // Fatal error exit code
            }
        };

        // Final summary: collection -> filepath pairs
        println!();
        println!("Backup summary:");
        for (collection, artifact) in &summary.artifacts {
            println!(
                "  {} -> {} ({} records)",
                collection,
                artifact.filepath.display(),
                artifact.record_count
            );
        }
        for collection in &summary.skipped {
            println!("  {collection} -> skipped (no documents)");
        }
        for error in &summary.errors {
            println!("  {} -> FAILED: {}", error.collection, error.message);
        }
        println!(
            "{} collection(s) exported, {} skipped, {} failed in {}s",
            summary.artifacts.len(),
            summary.skipped.len(),
            summary.errors.len(),
            summary.duration.as_secs()
        );

        // Isolated per-collection failures don't kill the run, but they do
        // show in the exit code so schedulers notice.
        if summary.is_successful() {
            Ok(0)
        } else {
            Ok(1)
        }
    }
}
