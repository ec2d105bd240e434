use async_trait::async_trait;
use coffee_pos::auth::{AuthError, AuthService, Role};
use coffee_pos::config::SessionConfig;
use coffee_pos::draft::{DraftError, OrderDraft};
use coffee_pos::lifecycle::{BaristaSession, SessionError};
use coffee_pos::model::{ItemStatus, MenuItem, Money, OrderId, OrderStatus, PaymentMethod, Temperature};
use chrono::{DateTime, Utc};
use coffee_pos::remote::{
    DocumentStore, MemoryDocumentStore, MockDocumentStore, OrderDocument, OrderRecord, RemoteError,
};
use coffee_pos::sales::SalesRange;
use coffee_pos::storage::{LocalStore, MemoryStore};
use coffee_pos::tracker::{ACTIVE_ORDERS_KEY, COMPLETED_ORDERS_KEY};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[derive(Default)]
struct RecordingAuth {
    sign_outs: AtomicUsize,
}

#[async_trait]
impl AuthService for RecordingAuth {
    async fn sign_in(&self, _email: &str, _password: &str) -> Result<Role, AuthError> {
        Ok(Role::Barista)
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        self.sign_outs.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Accepts new orders, then brings the sync worker down on the first item
/// status write.
#[derive(Default)]
struct CrashingStore {
    inner: MemoryDocumentStore,
}

#[async_trait]
impl DocumentStore for CrashingStore {
    async fn create_order(&self, document: OrderDocument) -> Result<OrderId, RemoteError> {
        self.inner.create_order(document).await
    }

    async fn patch_item_status(
        &self,
        _order_id: &OrderId,
        _item_id: &str,
        _status: ItemStatus,
    ) -> Result<(), RemoteError> {
        panic!("document store crashed");
    }

    async fn patch_payment_method(
        &self,
        _order_id: &OrderId,
        _method: PaymentMethod,
    ) -> Result<(), RemoteError> {
        Ok(())
    }

    async fn mark_served(&self, _order_id: &OrderId) -> Result<(), RemoteError> {
        Ok(())
    }

    async fn orders_since(&self, _since: DateTime<Utc>) -> Result<Vec<OrderRecord>, RemoteError> {
        Ok(vec![])
    }
}

fn config() -> SessionConfig {
    SessionConfig {
        remote_timeout: Duration::from_millis(500),
        ..SessionConfig::default()
    }
}

fn latte() -> MenuItem {
    MenuItem::hot_and_cold("latte", "Latte", Money::from_cents(850), Money::from_cents(950))
        .with_category("coffee")
}

fn croissant() -> MenuItem {
    MenuItem::new("croissant", "Butter Croissant", Money::from_cents(600)).with_category("food")
}

fn draft() -> OrderDraft {
    let mut draft = OrderDraft::new();
    draft.add_with_temperature(&latte(), Temperature::Cold).unwrap();
    draft.add(&croissant()).unwrap();
    draft.set_customer("Ana", None);
    draft
}

fn start(
    store: MemoryStore,
    documents: MemoryDocumentStore,
) -> (BaristaSession<MemoryStore>, Arc<RecordingAuth>) {
    let auth = Arc::new(RecordingAuth::default());
    let session = BaristaSession::start(&config(), store, Arc::new(documents), auth.clone());
    (session, auth)
}

#[tokio::test]
async fn test_order_lifecycle() {
    let store = MemoryStore::new();
    let documents = MemoryDocumentStore::new();
    let (mut session, _auth) = start(store.clone(), documents.clone());

    let order_id = session.place_order(&draft()).await.unwrap();
    assert_eq!(order_id, OrderId::from("order_1"));
    assert_eq!(session.tracker().displayed_orders().len(), 1);

    for item_id in ["latte-cold", "croissant"] {
        session
            .update_item_status(&order_id, item_id, ItemStatus::Preparing)
            .await
            .unwrap();
        session
            .update_item_status(&order_id, item_id, ItemStatus::Completed)
            .await
            .unwrap();
    }
    assert!(session.tracker().are_all_items_completed(&order_id));
    assert!(session.tracker().displayed_orders().is_empty());

    let method = session.settle_payment(&order_id, Some(" CASH ")).await.unwrap();
    assert_eq!(method, PaymentMethod::Cash);
    assert_eq!(
        session.notice().unwrap().message,
        "Order successfully completed with Cash payment!"
    );

    session.serve_order(&order_id).await.unwrap();
    session.flush().await.unwrap();

    let tracker = session.tracker();
    assert!(tracker.active_orders().is_empty());
    let served = &tracker.completed_orders()[0];
    assert_eq!(served.status, OrderStatus::Completed);
    assert_eq!(served.payment_method, Some(PaymentMethod::Cash));
    assert!(served.completed_at.is_some());

    let record = documents.record(&order_id).unwrap();
    assert_eq!(record.document.status, OrderStatus::Completed);
    assert_eq!(record.document.payment_method, Some(PaymentMethod::Cash));
    assert!(record
        .document
        .items
        .iter()
        .all(|item| item.status == ItemStatus::Completed));
    assert!(record.completed_at.is_some());

    assert!(store.get(COMPLETED_ORDERS_KEY).unwrap().is_some());
    session.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_remote_create_failure_tracks_nothing() {
    let documents = MemoryDocumentStore::new();
    documents.set_offline(true);
    let (mut session, _auth) = start(MemoryStore::new(), documents);

    let result = session.place_order(&draft()).await;
    assert!(matches!(
        result,
        Err(SessionError::Remote(RemoteError::Unavailable(_)))
    ));
    assert!(session.tracker().active_orders().is_empty());

    let notice = session.notice().unwrap();
    assert!(notice.is_error());
    assert!(notice.message.starts_with("Failed to create order"));
    session.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_invalid_draft_never_reaches_store() {
    let mock = MockDocumentStore::new();
    let auth = Arc::new(RecordingAuth::default());
    let mut session = BaristaSession::start(&config(), MemoryStore::new(), Arc::new(mock.clone()), auth);

    let mut empty = OrderDraft::new();
    empty.set_customer("Ana", None);
    let result = session.place_order(&empty).await;
    assert!(matches!(result, Err(SessionError::Draft(DraftError::Empty))));

    let mut nameless = draft();
    nameless.set_customer("  ", None);
    let result = session.place_order(&nameless).await;
    assert!(matches!(result, Err(SessionError::Draft(DraftError::MissingCustomer))));

    assert_eq!(session.notice().unwrap().message, "Customer name is required");
    session.shutdown().await.unwrap();
    mock.verify();
}

#[tokio::test]
async fn test_serve_requires_completed_items() {
    let (mut session, _auth) = start(MemoryStore::new(), MemoryDocumentStore::new());
    let order_id = session.place_order(&draft()).await.unwrap();

    let result = session.serve_order(&order_id).await;
    assert!(matches!(result, Err(SessionError::NotReady(id)) if id == order_id));
    assert_eq!(session.tracker().active_orders().len(), 1);

    let result = session.serve_order(&"unknown".into()).await;
    assert!(matches!(result, Err(SessionError::NotReady(_))));
    session.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_storage_failure_degrades_to_notice() {
    let (mut session, _auth) = start(MemoryStore::with_quota(16), MemoryDocumentStore::new());

    let order_id = session.place_order(&draft()).await.unwrap();
    assert!(session.tracker().order(&order_id).is_some());

    let notice = session.notice().unwrap();
    assert!(notice.is_error());
    assert!(notice.message.starts_with("Session state not persisted"));
    session.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_logout_clears_local_state() {
    let store = MemoryStore::new();
    let (mut session, auth) = start(store.clone(), MemoryDocumentStore::new());
    session.place_order(&draft()).await.unwrap();
    assert!(store.get(ACTIVE_ORDERS_KEY).unwrap().is_some());

    session.logout().await.unwrap();

    assert_eq!(store.get(ACTIVE_ORDERS_KEY).unwrap(), None);
    assert_eq!(store.get(COMPLETED_ORDERS_KEY).unwrap(), None);
    assert_eq!(auth.sign_outs.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_shutdown_keeps_state_for_next_session() {
    let store = MemoryStore::new();
    let documents = MemoryDocumentStore::new();

    let (mut session, _auth) = start(store.clone(), documents.clone());
    let order_id = session.place_order(&draft()).await.unwrap();
    session
        .update_item_status(&order_id, "croissant", ItemStatus::Preparing)
        .await
        .unwrap();
    session.shutdown().await.unwrap();

    let (session, _auth) = start(store, documents);
    let order = session.tracker().order(&order_id).unwrap();
    assert_eq!(order.item("croissant").unwrap().status, ItemStatus::Preparing);
    assert_eq!(order.total, Money::from_cents(1550));
    session.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_sales_summary_counts_settled_orders() {
    let documents = MemoryDocumentStore::new();
    let (mut session, _auth) = start(MemoryStore::new(), documents);

    let paid = session.place_order(&draft()).await.unwrap();
    session.settle_payment(&paid, Some("qr")).await.unwrap();
    session.place_order(&draft()).await.unwrap();
    session.flush().await.unwrap();

    let summary = session.sales_summary(SalesRange::Day).await.unwrap();
    assert_eq!(summary.orders, 1);
    assert_eq!(summary.qr.count, 1);
    assert_eq!(summary.qr.total, Money::from_cents(1550));
    assert_eq!(summary.revenue, Money::from_cents(1550));
    session.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_remote_writes_carry_normalized_values() {
    let mock = MockDocumentStore::new();
    let order_id = OrderId::from("order_9");
    mock.expect_create().return_ok(order_id.clone());
    mock.expect_item_status(order_id.clone(), "latte-cold", ItemStatus::Completed)
        .return_ok();
    mock.expect_payment_method(order_id.clone(), PaymentMethod::Cash)
        .return_ok();

    let auth = Arc::new(RecordingAuth::default());
    let mut session = BaristaSession::start(&config(), MemoryStore::new(), Arc::new(mock.clone()), auth);
    session.place_order(&draft()).await.unwrap();
    session
        .update_item_status(&order_id, "latte-cold", ItemStatus::Completed)
        .await
        .unwrap();
    session.settle_payment(&order_id, Some(" CASH ")).await.unwrap();
    session.flush().await.unwrap();
    assert!(!session.notice().unwrap().is_error());

    session.shutdown().await.unwrap();
    mock.verify();
}

#[tokio::test]
async fn test_payment_persistence_failure_shown_when_sync_is_down() {
    let auth = Arc::new(RecordingAuth::default());
    let mut session = BaristaSession::start(
        &config(),
        MemoryStore::with_quota(16),
        Arc::new(CrashingStore::default()),
        auth,
    );
    let order_id = session.place_order(&draft()).await.unwrap();
    session
        .update_item_status(&order_id, "croissant", ItemStatus::Completed)
        .await
        .unwrap();
    assert!(session.flush().await.is_err());

    let mut nameless = draft();
    nameless.set_customer("", None);
    assert!(session.place_order(&nameless).await.is_err());
    assert_eq!(session.notice().unwrap().message, "Customer name is required");

    let result = session.settle_payment(&order_id, Some("cash")).await;
    assert!(matches!(result, Err(SessionError::Remote(RemoteError::SyncClosed))));
    assert_eq!(
        session.tracker().order(&order_id).unwrap().payment_method,
        Some(PaymentMethod::Cash)
    );
    let notice = session.notice().unwrap();
    assert!(notice.is_error());
    assert!(notice.message.starts_with("Session state not persisted"));

    assert!(matches!(session.shutdown().await, Err(SessionError::Worker(_))));
}
