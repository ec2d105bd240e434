//! # Order Lifecycle Tracker
//!
//! The working set of orders for the current shift: which orders are still
//! in flight, where each line item is in preparation, how each order was
//! paid, and a short recap of what was served last.
//!
//! ## Ownership
//!
//! One [`OrderTracker`] exists per staff session. It is built once by
//! [`BaristaSession`](crate::lifecycle::BaristaSession) and handed to the
//! screens that need it; there is no global instance.
//!
//! ## Durability
//!
//! Every mutation writes both lists to the [`LocalStore`] under
//! [`ACTIVE_ORDERS_KEY`] and [`COMPLETED_ORDERS_KEY`]. The in-memory change is
//! applied first and is never rolled back: a failed write surfaces as
//! `Err(StorageError)` from the mutator, and the caller decides how to degrade.
//!
//! ## Lookups
//!
//! Unknown order or item ids are ignored. The UI only ever passes ids it has
//! just displayed, so a miss is not an error.

pub mod snapshot;

use crate::model::{ItemStatus, Order, OrderId, OrderStatus, PaymentMethod};
use crate::storage::{LocalStore, StorageError};
use chrono::Utc;
use snapshot::MissingCompletion;
use std::collections::VecDeque;
use tracing::{debug, info, warn};

/// Local storage key holding the active orders.
pub const ACTIVE_ORDERS_KEY: &str = "activeOrders";
/// Local storage key holding the completed-history buffer.
pub const COMPLETED_ORDERS_KEY: &str = "completedOrders";
/// Served orders kept for the recap, most recent first.
pub const COMPLETED_HISTORY_LIMIT: usize = 5;
/// Orders shown at once on the tracking bar.
pub const DISPLAYED_ORDERS_LIMIT: usize = 3;

pub struct OrderTracker<S: LocalStore> {
    store: S,
    active: Vec<Order>,
    completed: VecDeque<Order>,
}

impl<S: LocalStore> OrderTracker<S> {
    /// An empty tracker. Nothing is read from `store`.
    pub fn new(store: S) -> Self {
        Self {
            store,
            active: Vec::new(),
            completed: VecDeque::new(),
        }
    }

    /// Rehydrates the tracker from `store`.
    ///
    /// Read or parse failures are logged and leave the affected list empty.
    pub fn restore(store: S) -> Self {
        let active = load(&store, ACTIVE_ORDERS_KEY, MissingCompletion::Empty);
        let mut completed: VecDeque<Order> =
            load(&store, COMPLETED_ORDERS_KEY, MissingCompletion::Now).into();
        completed.truncate(COMPLETED_HISTORY_LIMIT);

        info!(active = active.len(), completed = completed.len(), "Tracker restored");
        Self {
            store,
            active,
            completed,
        }
    }

    /// Appends `order` to the active set.
    ///
    /// Ids are not checked for uniqueness; a duplicate id yields two entries.
    pub fn add_order(&mut self, order: Order) -> Result<(), StorageError> {
        debug!(order_id = %order.id, items = order.items.len(), "Add order");
        self.active.push(order);
        self.persist()
    }

    /// Sets the status of one line item. Any transition is allowed.
    pub fn update_item_status(
        &mut self,
        order_id: &OrderId,
        item_id: &str,
        status: ItemStatus,
    ) -> Result<(), StorageError> {
        let mut updated = false;
        for order in self.active.iter_mut().filter(|o| &o.id == order_id) {
            if let Some(item) = order.item_mut(item_id) {
                item.status = status;
                updated = true;
            }
        }
        if !updated {
            debug!(%order_id, item_id, "Item status update matched nothing");
        }
        self.persist()
    }

    /// Marks the order served: stamps it completed, moves it to the head of
    /// the completed history and drops every entry with that id from the
    /// active set.
    pub fn complete_order(&mut self, order_id: &OrderId) -> Result<(), StorageError> {
        let Some(index) = self.active.iter().position(|o| &o.id == order_id) else {
            debug!(%order_id, "Complete matched nothing");
            return Ok(());
        };

        let mut order = self.active.remove(index);
        // Every entry sharing the id leaves the active set; history gets one copy.
        self.active.retain(|o| &o.id != order_id);
        order.status = OrderStatus::Completed;
        order.completed_at = Some(Utc::now());
        self.completed.push_front(order);
        self.completed.truncate(COMPLETED_HISTORY_LIMIT);

        debug!(%order_id, active = self.active.len(), "Order completed");
        self.persist()
    }

    /// Records how the order was paid. `method` is already normalized.
    pub fn update_payment_method(
        &mut self,
        order_id: &OrderId,
        method: PaymentMethod,
    ) -> Result<(), StorageError> {
        for order in self.active.iter_mut().filter(|o| &o.id == order_id) {
            order.payment_method = Some(method);
        }
        self.persist()
    }

    /// Replaces every active entry with id `order_id` by `order`.
    pub fn replace_order(&mut self, order_id: &OrderId, order: Order) -> Result<(), StorageError> {
        for slot in self.active.iter_mut().filter(|o| &o.id == order_id) {
            *slot = order.clone();
        }
        self.persist()
    }

    /// True only for an existing, non-empty order whose items are all completed.
    pub fn are_all_items_completed(&self, order_id: &OrderId) -> bool {
        self.order(order_id)
            .is_some_and(Order::all_items_completed)
    }

    /// Active orders that still have a pending or preparing item, in
    /// insertion order, capped at [`DISPLAYED_ORDERS_LIMIT`].
    pub fn displayed_orders(&self) -> Vec<&Order> {
        self.active
            .iter()
            .filter(|o| o.has_open_items())
            .take(DISPLAYED_ORDERS_LIMIT)
            .collect()
    }

    /// Active orders whose items are all done and can be served.
    pub fn ready_to_serve(&self) -> Vec<&Order> {
        self.active
            .iter()
            .filter(|o| o.all_items_completed())
            .collect()
    }

    pub fn order(&self, order_id: &OrderId) -> Option<&Order> {
        self.active.iter().find(|o| &o.id == order_id)
    }

    pub fn active_orders(&self) -> &[Order] {
        &self.active
    }

    /// Most recently served first.
    pub fn completed_orders(&self) -> &VecDeque<Order> {
        &self.completed
    }

    /// Forgets the working set and removes both storage keys.
    ///
    /// Called on logout so the next person on a shared terminal starts clean.
    pub fn clear_persisted(&mut self) -> Result<(), StorageError> {
        self.active.clear();
        self.completed.clear();
        self.store.remove(ACTIVE_ORDERS_KEY)?;
        self.store.remove(COMPLETED_ORDERS_KEY)?;
        info!("Tracker state cleared");
        Ok(())
    }

    fn persist(&self) -> Result<(), StorageError> {
        self.store
            .set(ACTIVE_ORDERS_KEY, &snapshot::encode(&self.active)?)?;
        self.store
            .set(COMPLETED_ORDERS_KEY, &snapshot::encode(&self.completed)?)?;
        Ok(())
    }
}

fn load<S: LocalStore>(store: &S, key: &str, missing_completion: MissingCompletion) -> Vec<Order> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            warn!(key, error = %e, "Could not read saved orders");
            return Vec::new();
        }
    };
    snapshot::decode(&raw, missing_completion).unwrap_or_else(|e| {
        warn!(key, error = %e, "Could not parse saved orders");
        Vec::new()
    })
}
