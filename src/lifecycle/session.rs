use crate::auth::AuthService;
use crate::config::SessionConfig;
use crate::draft::OrderDraft;
use crate::lifecycle::SessionError;
use crate::model::{ItemStatus, OrderId, PaymentMethod};
use crate::notice::{Notice, NoticeBoard};
use crate::remote::{DocumentStore, RemoteWrite, SyncActor, SyncClient, SyncReport};
use crate::sales::{SalesRange, SalesSummary};
use crate::storage::{LocalStore, StorageError};
use crate::tracker::OrderTracker;
use chrono::Local;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{error, info, instrument, warn};

/// Everything a signed-in barista's screens share.
///
/// Local state changes first and always sticks. The remote collection is
/// updated afterwards: order creation is awaited (its id becomes the local
/// id), every other write goes through the sync worker and reports back via
/// [`notice`](Self::notice).
///
/// # Example
///
/// ```ignore
/// let mut session = BaristaSession::start(&config, store, documents, auth);
/// let order_id = session.place_order(&draft).await?;
/// session.settle_payment(&order_id, Some("cash")).await?;
/// session.logout().await?;
/// ```
pub struct BaristaSession<S: LocalStore> {
    tracker: OrderTracker<S>,
    notices: NoticeBoard,
    sync: SyncClient,
    reports: mpsc::UnboundedReceiver<SyncReport>,
    worker: JoinHandle<()>,
    auth: Arc<dyn AuthService>,
}

impl<S: LocalStore> BaristaSession<S> {
    /// Restores the tracker from `local` and starts the sync worker.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn start(
        config: &SessionConfig,
        local: S,
        documents: Arc<dyn DocumentStore>,
        auth: Arc<dyn AuthService>,
    ) -> Self {
        let tracker = OrderTracker::restore(local);
        let (actor, sync, reports) = SyncActor::new(documents, config.remote_timeout, config.sync_buffer);
        let worker = tokio::spawn(actor.run());

        info!(active = tracker.active_orders().len(), "Session started");
        Self {
            tracker,
            notices: NoticeBoard::new(config.notice_ttl),
            sync,
            reports,
            worker,
            auth,
        }
    }

    pub fn tracker(&self) -> &OrderTracker<S> {
        &self.tracker
    }

    /// Submits the draft: creates the remote document, then tracks the order
    /// under the id the store assigned.
    ///
    /// Nothing is tracked when validation or the remote create fails.
    #[instrument(skip_all, fields(customer = draft.customer()))]
    pub async fn place_order(&mut self, draft: &OrderDraft) -> Result<OrderId, SessionError> {
        let validated = match draft.finalize() {
            Ok(v) => v,
            Err(e) => {
                self.notices.error(e.to_string());
                return Err(e.into());
            }
        };

        let order_id = match self.sync.create_order(validated.document()).await {
            Ok(id) => id,
            Err(e) => {
                warn!(error = %e, "Order not created");
                self.notices.error(format!("Failed to create order: {e}"));
                return Err(e.into());
            }
        };

        let result = self.tracker.add_order(validated.into_order(order_id.clone()));
        self.degrade(result);
        info!(%order_id, "Order placed");
        Ok(order_id)
    }

    #[instrument(skip(self))]
    pub async fn update_item_status(
        &mut self,
        order_id: &OrderId,
        item_id: &str,
        status: ItemStatus,
    ) -> Result<(), SessionError> {
        let result = self.tracker.update_item_status(order_id, item_id, status);
        self.degrade(result);
        self.sync
            .submit(RemoteWrite::ItemStatus {
                order_id: order_id.clone(),
                item_id: item_id.to_string(),
                status,
            })
            .await?;
        Ok(())
    }

    /// Records payment for the order. Any input other than `cash` settles
    /// as QR.
    #[instrument(skip(self))]
    pub async fn settle_payment(
        &mut self,
        order_id: &OrderId,
        raw_method: Option<&str>,
    ) -> Result<PaymentMethod, SessionError> {
        let method = PaymentMethod::normalize(raw_method);
        let result = self.tracker.update_payment_method(order_id, method);
        let persisted = result.is_ok();
        self.degrade(result);
        self.sync
            .submit(RemoteWrite::PaymentMethod {
                order_id: order_id.clone(),
                method,
            })
            .await?;

        // A persistence failure outranks the success banner.
        if persisted {
            self.notices.success(format!(
                "Order successfully completed with {} payment!",
                method.label()
            ));
        }
        Ok(method)
    }

    /// Moves a fully prepared order to the completed history.
    #[instrument(skip(self))]
    pub async fn serve_order(&mut self, order_id: &OrderId) -> Result<(), SessionError> {
        if !self.tracker.are_all_items_completed(order_id) {
            return Err(SessionError::NotReady(order_id.clone()));
        }
        let result = self.tracker.complete_order(order_id);
        self.degrade(result);
        self.sync
            .submit(RemoteWrite::Served {
                order_id: order_id.clone(),
            })
            .await?;
        Ok(())
    }

    /// The banner to show now, after folding in finished remote writes.
    pub fn notice(&mut self) -> Option<&Notice> {
        while let Ok(report) = self.reports.try_recv() {
            if let Err(e) = &report.outcome {
                self.notices
                    .error(format!("Failed to update {}: {e}", report.write.kind()));
            }
        }
        self.notices.current()
    }

    /// Waits until every queued remote write has been attempted.
    pub async fn flush(&self) -> Result<(), SessionError> {
        self.sync.flush().await?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn sales_summary(&self, range: SalesRange) -> Result<SalesSummary, SessionError> {
        let records = self.sync.orders_since(range.since(Local::now())).await?;
        Ok(SalesSummary::from_records(&records, range))
    }

    /// Clears both local keys, signs out, then stops the sync worker.
    ///
    /// Sign-out is attempted even when clearing fails.
    #[instrument(skip_all)]
    pub async fn logout(mut self) -> Result<(), SessionError> {
        let cleared = self.tracker.clear_persisted();
        if let Err(e) = &cleared {
            error!(error = %e, "Failed to clear session state");
        }
        self.auth.sign_out().await?;
        self.stop().await?;
        info!("Logged out");
        cleared.map_err(SessionError::from)
    }

    /// Stops the sync worker, keeping local state for the next start.
    pub async fn shutdown(self) -> Result<(), SessionError> {
        self.stop().await
    }

    async fn stop(self) -> Result<(), SessionError> {
        // Queued writes are drained before the worker exits.
        drop(self.sync);
        self.worker.await.map_err(|e| {
            error!(error = %e, "Sync worker task failed");
            SessionError::Worker(e.to_string())
        })
    }

    fn degrade(&mut self, result: Result<(), StorageError>) {
        if let Err(e) = result {
            warn!(error = %e, "Session state not persisted");
            self.notices.error(SessionError::from(e).to_string());
        }
    }
}
