use crate::model::OrderId;
use crate::remote::{OrderDocument, OrderRecord, RemoteError, RemoteWrite, SyncRequest};
use chrono::{DateTime, Utc};
use tokio::sync::{mpsc, oneshot};

/// Handle to a running [`SyncActor`](super::SyncActor).
///
/// The worker stops once every clone has been dropped.
#[derive(Clone)]
pub struct SyncClient {
    sender: mpsc::Sender<SyncRequest>,
}

impl SyncClient {
    pub fn new(sender: mpsc::Sender<SyncRequest>) -> Self {
        Self { sender }
    }

    /// Creates the order remotely and waits for the generated id.
    pub async fn create_order(&self, document: OrderDocument) -> Result<OrderId, RemoteError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(SyncRequest::Create { document, respond_to })
            .await
            .map_err(|_| RemoteError::SyncClosed)?;
        response.await.map_err(|_| RemoteError::SyncDropped)?
    }

    pub async fn orders_since(&self, since: DateTime<Utc>) -> Result<Vec<OrderRecord>, RemoteError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(SyncRequest::Fetch { since, respond_to })
            .await
            .map_err(|_| RemoteError::SyncClosed)?;
        response.await.map_err(|_| RemoteError::SyncDropped)?
    }

    /// Queues a write. Returns once it is queued, not once it is applied.
    pub async fn submit(&self, write: RemoteWrite) -> Result<(), RemoteError> {
        self.sender
            .send(SyncRequest::Write(write))
            .await
            .map_err(|_| RemoteError::SyncClosed)
    }

    /// Waits until every previously queued request has been handled.
    pub async fn flush(&self) -> Result<(), RemoteError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(SyncRequest::Flush { respond_to })
            .await
            .map_err(|_| RemoteError::SyncClosed)?;
        response.await.map_err(|_| RemoteError::SyncDropped)
    }
}
