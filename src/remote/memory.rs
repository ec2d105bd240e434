use crate::model::{ItemStatus, OrderId, OrderStatus, PaymentMethod};
use crate::remote::{DocumentStore, OrderDocument, OrderRecord, RemoteError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Default)]
struct Collection {
    records: Vec<OrderRecord>,
    next_id: u64,
    offline: bool,
}

/// An in-process `orders` collection.
///
/// Ids are generated as `order_1`, `order_2`, ... Clones share the same
/// collection. [`set_offline`](Self::set_offline) makes every call fail with
/// [`RemoteError::Unavailable`].
#[derive(Clone, Default)]
pub struct MemoryDocumentStore {
    inner: Arc<Mutex<Collection>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_offline(&self, offline: bool) {
        self.lock().offline = offline;
    }

    pub fn record(&self, order_id: &OrderId) -> Option<OrderRecord> {
        self.lock().records.iter().find(|r| &r.id == order_id).cloned()
    }

    pub fn records(&self) -> Vec<OrderRecord> {
        self.lock().records.clone()
    }

    /// Inserts a record as-is, keeping its id and timestamp.
    pub fn insert_record(&self, record: OrderRecord) {
        self.lock().records.push(record);
    }

    fn lock(&self) -> MutexGuard<'_, Collection> {
        // A poisoned collection is still structurally valid.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn online(&self) -> Result<MutexGuard<'_, Collection>, RemoteError> {
        let collection = self.lock();
        if collection.offline {
            return Err(RemoteError::Unavailable("store is offline".into()));
        }
        Ok(collection)
    }

    fn update(
        &self,
        order_id: &OrderId,
        apply: impl FnOnce(&mut OrderRecord),
    ) -> Result<(), RemoteError> {
        let mut collection = self.online()?;
        let record = collection
            .records
            .iter_mut()
            .find(|r| &r.id == order_id)
            .ok_or_else(|| RemoteError::NotFound(order_id.clone()))?;
        apply(record);
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn create_order(&self, document: OrderDocument) -> Result<OrderId, RemoteError> {
        let mut collection = self.online()?;
        collection.next_id += 1;
        let id = OrderId::from(format!("order_{}", collection.next_id));
        collection.records.push(OrderRecord {
            id: id.clone(),
            document,
            timestamp: Utc::now(),
            completed_at: None,
        });
        Ok(id)
    }

    async fn patch_item_status(
        &self,
        order_id: &OrderId,
        item_id: &str,
        status: ItemStatus,
    ) -> Result<(), RemoteError> {
        self.update(order_id, |record| {
            // An unmatched line leaves the document unchanged.
            record.document.set_item_status(item_id, status);
        })
    }

    async fn patch_payment_method(
        &self,
        order_id: &OrderId,
        method: PaymentMethod,
    ) -> Result<(), RemoteError> {
        self.update(order_id, |record| record.document.payment_method = Some(method))
    }

    async fn mark_served(&self, order_id: &OrderId) -> Result<(), RemoteError> {
        self.update(order_id, |record| {
            record.document.status = OrderStatus::Completed;
            record.completed_at = Some(Utc::now());
        })
    }

    async fn orders_since(&self, since: DateTime<Utc>) -> Result<Vec<OrderRecord>, RemoteError> {
        let collection = self.online()?;
        let mut records: Vec<OrderRecord> = collection
            .records
            .iter()
            .filter(|r| r.timestamp >= since)
            .cloned()
            .collect();
        records.sort_by_key(|r| r.timestamp);
        Ok(records)
    }
}
