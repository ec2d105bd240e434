//! Messages exchanged between [`SyncClient`](super::SyncClient) and
//! [`SyncActor`](super::SyncActor).

use crate::model::{ItemStatus, OrderId, PaymentMethod};
use crate::remote::{OrderDocument, OrderRecord, RemoteError};
use chrono::{DateTime, Utc};
use tokio::sync::oneshot;

/// One-shot response channel used for request/response calls.
pub type Response<T> = oneshot::Sender<Result<T, RemoteError>>;

/// A fire-and-forget patch mirroring a local tracker mutation.
#[derive(Debug, Clone, PartialEq)]
pub enum RemoteWrite {
    ItemStatus {
        order_id: OrderId,
        item_id: String,
        status: ItemStatus,
    },
    PaymentMethod {
        order_id: OrderId,
        method: PaymentMethod,
    },
    /// Status `completed` plus a server completion timestamp.
    Served { order_id: OrderId },
}

impl RemoteWrite {
    pub fn order_id(&self) -> &OrderId {
        match self {
            RemoteWrite::ItemStatus { order_id, .. }
            | RemoteWrite::PaymentMethod { order_id, .. }
            | RemoteWrite::Served { order_id } => order_id,
        }
    }

    /// Short label for logs and banners.
    pub fn kind(&self) -> &'static str {
        match self {
            RemoteWrite::ItemStatus { .. } => "item status",
            RemoteWrite::PaymentMethod { .. } => "payment method",
            RemoteWrite::Served { .. } => "order status",
        }
    }
}

/// Requests processed by the sync worker, in arrival order.
#[derive(Debug)]
pub enum SyncRequest {
    Create {
        document: OrderDocument,
        respond_to: Response<OrderId>,
    },
    Fetch {
        since: DateTime<Utc>,
        respond_to: Response<Vec<OrderRecord>>,
    },
    Write(RemoteWrite),
    /// Answered once every earlier request has been handled.
    Flush { respond_to: oneshot::Sender<()> },
}

/// Outcome of a fire-and-forget write, published for the calling screen.
#[derive(Debug, Clone, PartialEq)]
pub struct SyncReport {
    pub write: RemoteWrite,
    pub outcome: Result<(), RemoteError>,
}

impl SyncReport {
    pub fn is_failure(&self) -> bool {
        self.outcome.is_err()
    }
}
