//! Domain error types
//!
//! This module defines the error hierarchy for Custodian. All errors are
//! domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main Custodian error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum CustodianError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Document store errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// User directory errors
    #[error("Directory error: {0}")]
    Directory(#[from] DirectoryError),

    /// E-mail delivery errors
    #[error("Mail error: {0}")]
    Mail(#[from] MailError),

    /// Export process errors
    #[error("Export error: {0}")]
    Export(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Document store errors
///
/// Errors that occur when talking to the hosted document-database service.
/// These errors don't expose third-party HTTP client types.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Failed to reach the store
    #[error("Failed to connect to document store: {0}")]
    ConnectionFailed(String),

    /// Authentication failed
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Invalid response from the store
    #[error("Invalid response from store: {0}")]
    InvalidResponse(String),

    /// Document not found
    #[error("Document not found: {0}")]
    DocumentNotFound(String),

    /// Collection not found
    #[error("Collection not found: {0}")]
    CollectionNotFound(String),

    /// Listing query failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Document update failed
    #[error("Failed to update document: {0}")]
    UpdateFailed(String),

    /// Page ceiling hit while fetching a collection
    #[error("Aborted fetch after {pages} pages (limit {limit}); store never returned a short page")]
    TooManyPages { pages: usize, limit: usize },

    /// Server error (5xx)
    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    /// Client error (4xx)
    #[error("Client error: {status} - {message}")]
    ClientError { status: u16, message: String },
}

/// User directory errors
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// Failed to reach the user directory
    #[error("Failed to connect to user directory: {0}")]
    ConnectionFailed(String),

    /// User not found
    #[error("User not found: {0}")]
    UserNotFound(String),

    /// Invalid response from the directory
    #[error("Invalid response from directory: {0}")]
    InvalidResponse(String),
}

/// E-mail delivery errors
///
/// A delivery failure never mutates reminder state; the record stays
/// eligible for the next scan.
#[derive(Debug, Error)]
pub enum MailError {
    /// Failed to reach the delivery provider
    #[error("Failed to connect to mail provider: {0}")]
    ConnectionFailed(String),

    /// Provider rejected the message
    #[error("Mail rejected: {status} - {message}")]
    Rejected { status: u16, message: String },

    /// Message could not be constructed
    #[error("Invalid message: {0}")]
    InvalidMessage(String),
}

// Conversion from std::io::Error
impl From<std::io::Error> for CustodianError {
    fn from(err: std::io::Error) -> Self {
        CustodianError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for CustodianError {
    fn from(err: serde_json::Error) -> Self {
        CustodianError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for CustodianError {
    fn from(err: toml::de::Error) -> Self {
        CustodianError::Configuration(format!("TOML parse error: {err}"))
    }
}

// Conversion from csv encode errors
impl From<csv::Error> for CustodianError {
    fn from(err: csv::Error) -> Self {
        CustodianError::Serialization(err.to_string())
    }
}
