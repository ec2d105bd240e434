use coffee_pos::model::{ItemStatus, LineItem, Money, Order, OrderId, OrderStatus, PaymentMethod};
use coffee_pos::storage::FileStore;
use coffee_pos::tracker::OrderTracker;

fn a1() -> Order {
    Order::new(
        "A1",
        "Ana",
        vec![LineItem::new("x", "Latte", Money::from_cents(500), "Coffee").with_quantity(2)],
        Money::from_cents(1000),
    )
}

#[test]
fn test_single_order_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let mut tracker = OrderTracker::new(FileStore::open(dir.path()).unwrap());
    let id = OrderId::from("A1");

    tracker.add_order(a1()).unwrap();
    tracker.update_item_status(&id, "x", ItemStatus::Completed).unwrap();
    assert!(tracker.are_all_items_completed(&id));

    tracker.complete_order(&id).unwrap();
    assert!(tracker.order(&id).is_none());
    let head = &tracker.completed_orders()[0];
    assert_eq!(head.id, id);
    assert_eq!(head.status, OrderStatus::Completed);
    assert!(head.completed_at.is_some());
}

#[test]
fn test_unknown_order_is_a_no_op() {
    let dir = tempfile::tempdir().unwrap();
    let mut tracker = OrderTracker::new(FileStore::open(dir.path()).unwrap());
    tracker.add_order(a1()).unwrap();
    let before = tracker.active_orders().to_vec();

    tracker
        .update_item_status(&"missing-order".into(), "x", ItemStatus::Completed)
        .unwrap();
    assert_eq!(tracker.active_orders(), before.as_slice());
}

#[test]
fn test_state_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut tracker = OrderTracker::new(FileStore::open(dir.path()).unwrap());
        let mut served = a1();
        served.id = "S1".into();
        tracker.add_order(served).unwrap();
        tracker.complete_order(&"S1".into()).unwrap();

        tracker.add_order(a1()).unwrap();
        tracker
            .update_item_status(&"A1".into(), "x", ItemStatus::Preparing)
            .unwrap();
        tracker
            .update_payment_method(&"A1".into(), PaymentMethod::Qr)
            .unwrap();
    }

    let tracker = OrderTracker::restore(FileStore::open(dir.path()).unwrap());
    let order = tracker.order(&"A1".into()).unwrap();
    assert_eq!(order.item("x").unwrap().status, ItemStatus::Preparing);
    assert_eq!(order.payment_method, Some(PaymentMethod::Qr));
    assert_eq!(order.total, Money::from_cents(1000));
    assert_eq!(tracker.completed_orders().len(), 1);
    assert_eq!(tracker.completed_orders()[0].id.as_str(), "S1");
}

#[test]
fn test_restore_from_empty_directory() {
    let dir = tempfile::tempdir().unwrap();
    let tracker = OrderTracker::restore(FileStore::open(dir.path().join("fresh")).unwrap());
    assert!(tracker.active_orders().is_empty());
    assert!(tracker.completed_orders().is_empty());
}
