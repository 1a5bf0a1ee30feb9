//! Document store adapter
//!
//! The [`DocumentStore`] trait is the seam between the core logic and the
//! hosted document-database service. The HTTP implementation lives in
//! [`client`]; tests substitute in-memory implementations.

pub mod client;

use crate::domain::ids::{CollectionId, DocumentId};
use crate::domain::{Document, DocumentList, Filter, Result};
use async_trait::async_trait;
use serde_json::{Map, Value};

/// Operations the core logic needs from the document store
///
/// All methods map 1:1 onto the hosted service's REST operations. The
/// database id is fixed per client instance; collections are addressed by
/// their store identifiers.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// List one page of a collection
    ///
    /// `filters` are ANDed predicates; `limit`/`offset` bound the page.
    /// Returns the page plus the store's total matching count.
    async fn list_documents(
        &self,
        collection_id: &CollectionId,
        filters: &[Filter],
        limit: usize,
        offset: usize,
    ) -> Result<DocumentList>;

    /// Fetch a single document by id
    async fn get_document(
        &self,
        collection_id: &CollectionId,
        document_id: &DocumentId,
    ) -> Result<Document>;

    /// Patch attribute fields on a document
    async fn update_document(
        &self,
        collection_id: &CollectionId,
        document_id: &DocumentId,
        patch: Map<String, Value>,
    ) -> Result<Document>;
}

pub use client::HttpStoreClient;
