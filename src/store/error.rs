//! Store error types

use thiserror::Error;

/// Errors raised by a document store backend
#[derive(Error, Debug)]
pub enum StoreError {
    /// The backing connection is not established
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// The connection string names a backend this build does not know
    #[error("Unsupported connection string: {0}")]
    UnsupportedBackend(String),

    /// Reading the document failed
    #[error("Read failed: {0}")]
    Read(String),

    /// Writing the document failed
    #[error("Write failed: {0}")]
    Write(String),

    /// The stored document could not be decoded or encoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The stored document has an unexpected shape or version
    #[error("Invalid data: {0}")]
    InvalidData(String),
}
