//! Error types
//!
//! Reads never fail outward: a missing or corrupt document loads as empty.
//! Writes report failure so callers can tell a dropped save from a real one.

use thiserror::Error;
use uuid::Uuid;

/// Failure raised by a [`KeyValueStore`](crate::platform::KeyValueStore) backend
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage backend error: {0}")]
    Backend(String),
    #[error("storage is unavailable")]
    Unavailable,
}

/// Failure of a persisted write
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to encode document: {0}")]
    Encode(#[source] serde_json::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Invalid edit of a checklist's item list
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChecklistError {
    #[error("checklist already holds the maximum of {max} items")]
    TooManyItems { max: usize },
    #[error("no item with id {0}")]
    ItemNotFound(Uuid),
    #[error("item index {index} out of bounds for {len} items")]
    IndexOutOfBounds { index: usize, len: usize },
}

/// Failure while importing an exported document
#[derive(Debug, Error)]
pub enum TransferError {
    #[error("failed to decode import: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("failed to encode export: {0}")]
    Encode(#[source] serde_json::Error),
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type StoreResult<T> = Result<T, StoreError>;
