//! Error types for the remote document store and the sync worker.

use crate::model::OrderId;
use std::time::Duration;
use thiserror::Error;

/// Errors from calls against the shared order collection.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RemoteError {
    /// The order document does not exist remotely.
    #[error("Order document not found: {0}")]
    NotFound(OrderId),

    /// The call did not finish within the configured bound.
    #[error("Remote call timed out after {0:?}")]
    Timeout(Duration),

    /// The store answered but refused the write.
    #[error("Remote store rejected the request: {0}")]
    Rejected(String),

    /// The store could not be reached.
    #[error("Remote store unavailable: {0}")]
    Unavailable(String),

    /// The sync worker has shut down.
    #[error("Sync worker closed")]
    SyncClosed,

    /// The sync worker dropped the response channel.
    #[error("Sync worker dropped response channel")]
    SyncDropped,
}
