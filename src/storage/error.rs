//! Error types for local durable storage.

use thiserror::Error;

/// Failures of the device-local key-value store.
///
/// These never describe business conditions; they only report that tracker
/// state could not be read or written.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Tracker state could not be encoded or decoded.
    #[error("Storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Writing `key` would exceed the store's capacity.
    #[error("Storage quota exceeded writing {key}: {size} bytes over a {limit} byte limit")]
    QuotaExceeded { key: String, size: usize, limit: usize },

    /// The store cannot be used at all (e.g. lock poisoned, storage disabled).
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}
