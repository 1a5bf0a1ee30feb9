//! Backup coordinator - orchestrates the full export run
//!
//! Processes the configured collections strictly one at a time. Sequential
//! processing bounds the load on the shared store and keeps log ordering
//! deterministic. A failing collection is logged into the summary and the
//! run moves on; only preparing the output directory is fatal.

use crate::adapters::store::DocumentStore;
use crate::config::BackupConfig;
use crate::core::export::exporter::CollectionExporter;
use crate::core::export::summary::{BackupError, BackupSummary};
use crate::domain::ids::CollectionId;
use crate::domain::Result;
use chrono::Utc;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

/// Backup coordinator
pub struct BackupCoordinator {
    store: Arc<dyn DocumentStore>,
    config: BackupConfig,
}

impl BackupCoordinator {
    /// Create a new coordinator
    pub fn new(store: Arc<dyn DocumentStore>, config: BackupConfig) -> Self {
        Self { store, config }
    }

    /// Execute the backup
    ///
    /// Ensures the output directory exists, then exports every configured
    /// collection in order. Returns a summary of artifacts, skipped
    /// collections, and isolated failures.
    pub async fn execute_backup(&self) -> Result<BackupSummary> {
        let start_time = Instant::now();
        let mut summary = BackupSummary::new();

        tracing::info!(
            collections = self.config.collections.len(),
            output_dir = %self.config.output_dir,
            "Starting backup run"
        );

        let output_dir = Path::new(&self.config.output_dir);
        std::fs::create_dir_all(output_dir)?;

        let exporter = CollectionExporter::new(self.store.as_ref(), output_dir, self.config.max_pages);
        let date = Utc::now().date_naive();

        for mapping in &self.config.collections {
            let collection_id = match CollectionId::new(mapping.id.clone()) {
                Ok(id) => id,
                Err(e) => {
                    summary.add_error(BackupError::new(&mapping.name, e));
                    continue;
                }
            };

            match exporter.export(&mapping.name, &collection_id, date).await {
                Ok(Some(artifact)) => {
                    summary.add_artifact(&mapping.name, artifact);
                }
                Ok(None) => {
                    summary.add_skipped(&mapping.name);
                }
                Err(e) => {
                    tracing::error!(
                        collection = %mapping.name,
                        error = %e,
                        "Collection export failed, continuing with remaining collections"
                    );
                    summary.add_error(BackupError::new(&mapping.name, e.to_string()));
                }
            }
        }

        let summary = summary.with_duration(start_time.elapsed());
        summary.log_summary();

        Ok(summary)
    }
}
