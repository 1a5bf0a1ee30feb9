//! Owner resolution
//!
//! Answers "which user owns this record". Resolution order:
//!
//! 1. An explicit `ownerId` attribute on the record - the first-class
//!    reference new records carry.
//! 2. Legacy fallback: the first permission metadata string, taking the
//!    quoted grantee and stripping a `user:` prefix. Permission strings
//!    look like `read("user:64f1...")`; their format is store-defined and
//!    this parse can mis-resolve records with unusual grants.
//! 3. The record's creator id.

use crate::domain::ids::UserId;
use crate::domain::Document;

/// Resolve the owning user of a record
///
/// Returns `None` when the record carries no usable owner reference.
pub fn resolve_owner(document: &Document) -> Option<UserId> {
    if let Some(owner) = document.get_str("ownerId") {
        if let Ok(user_id) = UserId::new(owner) {
            return Some(user_id);
        }
    }

    if let Some(user_id) = document.permissions.first().and_then(|p| parse_grantee(p)) {
        tracing::debug!(
            document_id = %document.id,
            "Resolved owner from legacy permission metadata"
        );
        return Some(user_id);
    }

    document
        .created_by
        .as_deref()
        .and_then(|id| UserId::new(id).ok())
}

/// Extract the grantee from a permission string like `read("user:abc")`
fn parse_grantee(permission: &str) -> Option<UserId> {
    let mut parts = permission.split('"');
    parts.next()?;
    let grantee = parts.next()?;
    let id = grantee.strip_prefix("user:").unwrap_or(grantee);
    UserId::new(id).ok()
}
