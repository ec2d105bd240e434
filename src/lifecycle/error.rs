use crate::auth::AuthError;
use crate::draft::DraftError;
use crate::model::OrderId;
use crate::remote::RemoteError;
use crate::storage::StorageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Draft(#[from] DraftError),

    #[error("Remote error: {0}")]
    Remote(#[from] RemoteError),

    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    #[error("Session state not persisted: {0}")]
    Storage(#[from] StorageError),

    /// Served before every item was completed, or not active at all.
    #[error("Order {0} is not ready to serve")]
    NotReady(OrderId),

    #[error("Sync worker failed: {0}")]
    Worker(String),
}
