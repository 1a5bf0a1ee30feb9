//! Paginated collection retrieval
//!
//! Pulls a whole collection out of the store in fixed-size pages. The store
//! defines the record order; this module only guarantees it is preserved.

use crate::adapters::store::DocumentStore;
use crate::domain::ids::CollectionId;
use crate::domain::{CustodianError, Document, Result, StoreError};

/// Records requested per page
pub const PAGE_SIZE: usize = 100;

/// Fetch every record of a collection
///
/// Pages from offset 0 in steps of [`PAGE_SIZE`]; the offset advances by the
/// fixed page size only while full pages come back. The loop stops on the
/// first short page, and an empty first page returns an empty result after
/// exactly one request.
///
/// `max_pages` is the safety ceiling: a store that never returns a short
/// page (or keeps reporting full pages for a shrinking collection) aborts
/// with [`StoreError::TooManyPages`] instead of looping forever.
///
/// Any per-page failure aborts the whole fetch - no partial result, no
/// retry here (the transport owns its own retry policy, if any).
pub async fn fetch_all(
    store: &dyn DocumentStore,
    collection_id: &CollectionId,
    max_pages: usize,
) -> Result<Vec<Document>> {
    let mut documents = Vec::new();
    let mut offset = 0;
    let mut pages = 0;

    loop {
        if pages >= max_pages {
            return Err(CustodianError::Store(StoreError::TooManyPages {
                pages,
                limit: max_pages,
            }));
        }

        let page = store
            .list_documents(collection_id, &[], PAGE_SIZE, offset)
            .await?;
        pages += 1;

        let returned = page.documents.len();
        tracing::debug!(
            collection_id = %collection_id,
            page = pages,
            returned = returned,
            offset = offset,
            "Fetched page"
        );

        if returned == 0 {
            break;
        }

        documents.extend(page.documents);

        if returned < PAGE_SIZE {
            break;
        }

        offset += PAGE_SIZE;
    }

    tracing::debug!(
        collection_id = %collection_id,
        count = documents.len(),
        pages = pages,
        "Collection fetch complete"
    );

    Ok(documents)
}
