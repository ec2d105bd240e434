//! # Remote Order Collection
//!
//! Mirrors local order mutations into the shared `orders` collection.
//!
//! ## Key Types
//!
//! - [`DocumentStore`]: the seam to the hosted document database.
//! - [`SyncActor`] / [`SyncClient`]: a single worker that applies remote
//!   writes one at a time, in the order they were submitted.
//! - [`SyncReport`]: outcome of each fire-and-forget write.
//! - [`MemoryDocumentStore`]: an in-process collection for demos and tests.
//! - [`MockDocumentStore`]: an expectation-driven double for tests.
//!
//! Creating an order is awaited by the caller because the remote id becomes
//! the local id. Every other write is submitted and forgotten; failures come
//! back as a [`SyncReport`] and never undo the local state.

pub mod actor;
pub mod client;
pub mod document;
pub mod error;
pub mod memory;
pub mod message;
pub mod mock;

pub use actor::SyncActor;
pub use client::SyncClient;
pub use document::{DocumentItem, OrderDocument, OrderRecord};
pub use error::RemoteError;
pub use memory::MemoryDocumentStore;
pub use message::{RemoteWrite, SyncReport, SyncRequest};
pub use mock::MockDocumentStore;

use crate::model::{ItemStatus, OrderId, PaymentMethod};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Operations against the shared order collection.
#[async_trait]
pub trait DocumentStore: Send + Sync + 'static {
    /// Inserts a document, letting the store stamp `timestamp`, and returns
    /// the generated id.
    async fn create_order(&self, document: OrderDocument) -> Result<OrderId, RemoteError>;

    /// Sets `status` on the line matching `item_id`: the `id-<temperature>`
    /// key first, then the base id.
    async fn patch_item_status(
        &self,
        order_id: &OrderId,
        item_id: &str,
        status: ItemStatus,
    ) -> Result<(), RemoteError>;

    async fn patch_payment_method(
        &self,
        order_id: &OrderId,
        method: PaymentMethod,
    ) -> Result<(), RemoteError>;

    /// Sets status `completed` and stamps `completedAt`.
    async fn mark_served(&self, order_id: &OrderId) -> Result<(), RemoteError>;

    /// Orders with `timestamp >= since`, oldest first.
    async fn orders_since(&self, since: DateTime<Utc>) -> Result<Vec<OrderRecord>, RemoteError>;
}
