//! Domain models and types for Custodian.
//!
//! This module contains the core domain models, types, and business rules.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`CollectionId`], [`DocumentId`], [`UserId`])
//! - **Domain models** ([`Document`], [`DocumentList`], [`Filter`], [`UserProfile`])
//! - **Error types** ([`CustodianError`], [`StoreError`], [`DirectoryError`], [`MailError`])
//! - **Result type alias** ([`Result`])
//!
//! # Type Safety
//!
//! Custodian uses the newtype pattern for identifiers to prevent mixing
//! different ID types:
//!
//! ```rust
//! use custodian::domain::{CollectionId, DocumentId};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let collection_id = CollectionId::new("68bf9d62002b4f5f7f23")?;
//! let document_id = DocumentId::new("doc-456")?;
//!
//! // This won't compile - type safety prevents mixing IDs
//! // let wrong: CollectionId = document_id;  // Compile error!
//! # Ok(())
//! # }
//! ```

pub mod document;
pub mod errors;
pub mod ids;
pub mod result;
pub mod user;

// Re-export commonly used types for convenience
pub use document::{Document, DocumentList, Filter};
pub use errors::{CustodianError, DirectoryError, MailError, StoreError};
pub use ids::{CollectionId, DocumentId, UserId};
pub use result::Result;
pub use user::UserProfile;
