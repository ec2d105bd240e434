//! The sync worker.

use crate::remote::{DocumentStore, RemoteError, RemoteWrite, SyncClient, SyncReport, SyncRequest};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Owns the remote store handle and applies requests sequentially.
///
/// Because a single task drains the queue, two writes to the same order
/// always reach the store in submission order.
pub struct SyncActor {
    receiver: mpsc::Receiver<SyncRequest>,
    store: Arc<dyn DocumentStore>,
    timeout: Duration,
    reports: mpsc::UnboundedSender<SyncReport>,
}

impl SyncActor {
    /// Returns the worker, a client for it, and the receiving end of its
    /// write reports.
    pub fn new(
        store: Arc<dyn DocumentStore>,
        timeout: Duration,
        buffer_size: usize,
    ) -> (Self, SyncClient, mpsc::UnboundedReceiver<SyncReport>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let (reports, report_rx) = mpsc::unbounded_channel();
        let actor = Self {
            receiver,
            store,
            timeout,
            reports,
        };
        (actor, SyncClient::new(sender), report_rx)
    }

    /// Runs until every [`SyncClient`] has been dropped.
    pub async fn run(mut self) {
        info!(timeout_ms = self.timeout.as_millis() as u64, "Sync worker started");
        let mut failures = 0usize;

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                SyncRequest::Create { document, respond_to } => {
                    debug!(customer = %document.customer_name, items = document.items.len(), "Create");
                    let result = bounded(self.timeout, self.store.create_order(document)).await;
                    match &result {
                        Ok(id) => info!(order_id = %id, "Order created remotely"),
                        Err(e) => warn!(error = %e, "Create failed"),
                    }
                    let _ = respond_to.send(result);
                }
                SyncRequest::Fetch { since, respond_to } => {
                    debug!(%since, "Fetch");
                    let result = bounded(self.timeout, self.store.orders_since(since)).await;
                    if let Err(e) = &result {
                        warn!(error = %e, "Fetch failed");
                    }
                    let _ = respond_to.send(result);
                }
                SyncRequest::Write(write) => {
                    let outcome = self.apply(&write).await;
                    match &outcome {
                        Ok(()) => debug!(order_id = %write.order_id(), kind = write.kind(), "Write applied"),
                        Err(e) => {
                            failures += 1;
                            warn!(order_id = %write.order_id(), kind = write.kind(), error = %e, "Write failed");
                        }
                    }
                    // Nobody listening is fine.
                    let _ = self.reports.send(SyncReport { write, outcome });
                }
                SyncRequest::Flush { respond_to } => {
                    let _ = respond_to.send(());
                }
            }
        }

        info!(failures, "Sync worker shutdown");
    }

    async fn apply(&self, write: &RemoteWrite) -> Result<(), RemoteError> {
        let store = &self.store;
        match write {
            RemoteWrite::ItemStatus { order_id, item_id, status } => {
                bounded(self.timeout, store.patch_item_status(order_id, item_id, *status)).await
            }
            RemoteWrite::PaymentMethod { order_id, method } => {
                bounded(self.timeout, store.patch_payment_method(order_id, *method)).await
            }
            RemoteWrite::Served { order_id } => {
                bounded(self.timeout, store.mark_served(order_id)).await
            }
        }
    }
}

async fn bounded<T, F>(limit: Duration, call: F) -> Result<T, RemoteError>
where
    F: Future<Output = Result<T, RemoteError>>,
{
    tokio::time::timeout(limit, call)
        .await
        .map_err(|_| RemoteError::Timeout(limit))?
}
