//! Backup run summary and reporting

use crate::core::export::exporter::ExportArtifact;
use std::time::Duration;

/// Summary of a backup run
#[derive(Debug, Clone, Default)]
pub struct BackupSummary {
    /// Successfully exported collections, in processing order
    pub artifacts: Vec<(String, ExportArtifact)>,

    /// Collections skipped because they were empty
    pub skipped: Vec<String>,

    /// Per-collection failures; these never abort the run
    pub errors: Vec<BackupError>,

    /// Duration of the run
    pub duration: Duration,
}

impl BackupSummary {
    /// Create a new empty summary
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Record a produced artifact
    pub fn add_artifact(&mut self, collection: impl Into<String>, artifact: ExportArtifact) {
        self.artifacts.push((collection.into(), artifact));
    }

    /// Record an empty collection
    pub fn add_skipped(&mut self, collection: impl Into<String>) {
        self.skipped.push(collection.into());
    }

    /// Record a per-collection failure
    pub fn add_error(&mut self, error: BackupError) {
        self.errors.push(error);
    }

    /// Total records across all produced artifacts
    pub fn total_records(&self) -> usize {
        self.artifacts.iter().map(|(_, a)| a.record_count).sum()
    }

    /// Check if the run completed without failures
    pub fn is_successful(&self) -> bool {
        self.errors.is_empty()
    }

    /// Log the summary
    pub fn log_summary(&self) {
        tracing::info!(
            collections = self.artifacts.len(),
            skipped = self.skipped.len(),
            failed = self.errors.len(),
            total_records = self.total_records(),
            duration_secs = self.duration.as_secs(),
            "Backup completed"
        );

        if !self.errors.is_empty() {
            for error in &self.errors {
                tracing::warn!(
                    collection = %error.collection,
                    message = %error.message,
                    "Collection export failed"
                );
            }
        }
    }
}

/// A per-collection export failure
#[derive(Debug, Clone)]
pub struct BackupError {
    /// Logical collection name
    pub collection: String,

    /// Error message
    pub message: String,
}

impl BackupError {
    /// Create a new backup error
    pub fn new(collection: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn artifact(count: usize) -> ExportArtifact {
        ExportArtifact {
            filename: "user_backup_2025-09-15.csv".to_string(),
            filepath: PathBuf::from("backup/user_backup_2025-09-15.csv"),
            record_count: count,
        }
    }

    #[test]
    fn test_summary_starts_empty() {
        let summary = BackupSummary::new();
        assert!(summary.artifacts.is_empty());
        assert!(summary.is_successful());
        assert_eq!(summary.total_records(), 0);
    }

    #[test]
    fn test_total_records_sums_artifacts() {
        let mut summary = BackupSummary::new();
        summary.add_artifact("user", artifact(3));
        summary.add_artifact("requestList", artifact(7));
        assert_eq!(summary.total_records(), 10);
    }

    #[test]
    fn test_errors_mark_run_unsuccessful() {
        let mut summary = BackupSummary::new();
        summary.add_artifact("user", artifact(3));
        assert!(summary.is_successful());

        summary.add_error(BackupError::new("requestList", "query failed"));
        assert!(!summary.is_successful());
        // Failures do not remove produced artifacts
        assert_eq!(summary.artifacts.len(), 1);
    }

    #[test]
    fn test_with_duration() {
        let summary = BackupSummary::new().with_duration(Duration::from_secs(42));
        assert_eq!(summary.duration, Duration::from_secs(42));
    }
}
