//! Per-collection CSV export
//!
//! Ties the fetch, flatten, and encode steps together and persists the
//! result as one dated CSV file per collection.

use crate::adapters::store::DocumentStore;
use crate::core::export::csv::encode_csv;
use crate::core::fetch::fetch_all;
use crate::core::transform::flatten_object;
use crate::domain::ids::CollectionId;
use crate::domain::Result;
use chrono::NaiveDate;
use std::fs;
use std::path::{Path, PathBuf};

/// One produced backup file
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    /// File name, `<name>_backup_<YYYY-MM-DD>.csv`
    pub filename: String,

    /// Full path of the written file
    pub filepath: PathBuf,

    /// Number of records in the file
    pub record_count: usize,
}

/// Exports a single collection to a CSV file
pub struct CollectionExporter<'a> {
    store: &'a dyn DocumentStore,
    output_dir: &'a Path,
    max_pages: usize,
}

impl<'a> CollectionExporter<'a> {
    /// Create an exporter writing into `output_dir`
    pub fn new(store: &'a dyn DocumentStore, output_dir: &'a Path, max_pages: usize) -> Self {
        Self {
            store,
            output_dir,
            max_pages,
        }
    }

    /// Export one collection
    ///
    /// Returns `Ok(None)` for an empty collection: nothing is written and
    /// the collection is skipped without error. A same-day re-run
    /// overwrites the existing file.
    pub async fn export(
        &self,
        name: &str,
        collection_id: &CollectionId,
        date: NaiveDate,
    ) -> Result<Option<ExportArtifact>> {
        tracing::info!(collection = %name, collection_id = %collection_id, "Exporting collection");

        let documents = fetch_all(self.store, collection_id, self.max_pages).await?;

        if documents.is_empty() {
            tracing::info!(collection = %name, "No documents found, skipping");
            return Ok(None);
        }

        let mut flattened = Vec::with_capacity(documents.len());
        for document in &documents {
            flattened.push(flatten_object(&document.to_object())?);
        }

        let csv_text = encode_csv(&flattened)?;

        let filename = format!("{}_backup_{}.csv", name, date.format("%Y-%m-%d"));
        let filepath = self.output_dir.join(&filename);
        fs::write(&filepath, csv_text)?;

        tracing::info!(
            collection = %name,
            filepath = %filepath.display(),
            record_count = documents.len(),
            "Saved collection backup"
        );

        Ok(Some(ExportArtifact {
            filename,
            filepath,
            record_count: documents.len(),
        }))
    }
}
