//! # Mock Document Store
//!
//! Utilities for testing the session and sync worker in isolation.
//!
//! Queue expectations with the `expect_*` builders, hand a clone of the mock
//! to the code under test, and call [`MockDocumentStore::verify`] at the end.

use crate::model::{ItemStatus, OrderId, PaymentMethod};
use crate::remote::{DocumentStore, OrderDocument, OrderRecord, RemoteError};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug)]
enum Call {
    Create,
    ItemStatus(OrderId, String, ItemStatus),
    PaymentMethod(OrderId, PaymentMethod),
    Served(OrderId),
    OrdersSince,
}

#[derive(Debug)]
enum Reply {
    Id(Result<OrderId, RemoteError>),
    Unit(Result<(), RemoteError>),
    Records(Result<Vec<OrderRecord>, RemoteError>),
}

#[derive(Debug)]
struct Expectation {
    call: Call,
    reply: Reply,
    delay: Option<Duration>,
}

type Queue = Arc<Mutex<VecDeque<Expectation>>>;

/// A [`DocumentStore`] that answers from a queue of expectations.
///
/// # Example
/// ```ignore
/// let mock = MockDocumentStore::new();
/// mock.expect_create().return_ok("order_1".into());
/// mock.expect_served("order_1".into()).return_ok();
///
/// let store: Arc<dyn DocumentStore> = Arc::new(mock.clone());
/// // Use store in tests...
/// mock.verify(); // Ensures all expectations were met
/// ```
///
/// A call that does not match the next expectation fails with
/// [`RemoteError::Rejected`] and makes `verify` panic.
#[derive(Clone, Default)]
pub struct MockDocumentStore {
    expectations: Queue,
    created: Arc<Mutex<Vec<OrderDocument>>>,
    mismatches: Arc<Mutex<Vec<String>>>,
}

impl MockDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expect_create(&self) -> ExpectationBuilder<OrderId> {
        self.builder(Call::Create)
    }

    pub fn expect_item_status(
        &self,
        order_id: OrderId,
        item_id: &str,
        status: ItemStatus,
    ) -> ExpectationBuilder<()> {
        self.builder(Call::ItemStatus(order_id, item_id.to_string(), status))
    }

    pub fn expect_payment_method(
        &self,
        order_id: OrderId,
        method: PaymentMethod,
    ) -> ExpectationBuilder<()> {
        self.builder(Call::PaymentMethod(order_id, method))
    }

    pub fn expect_served(&self, order_id: OrderId) -> ExpectationBuilder<()> {
        self.builder(Call::Served(order_id))
    }

    pub fn expect_orders_since(&self) -> ExpectationBuilder<Vec<OrderRecord>> {
        self.builder(Call::OrdersSince)
    }

    /// Documents received by `create_order`, in call order.
    pub fn created(&self) -> Vec<OrderDocument> {
        self.created.lock().unwrap().clone()
    }

    /// Verifies that all expectations were met and nothing unexpected arrived.
    pub fn verify(&self) {
        let mismatches = self.mismatches.lock().unwrap();
        if !mismatches.is_empty() {
            panic!("Unexpected calls: {:?}", *mismatches);
        }
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }

    fn builder<T>(&self, call: Call) -> ExpectationBuilder<T> {
        ExpectationBuilder {
            call,
            delay: None,
            expectations: self.expectations.clone(),
            _reply: std::marker::PhantomData,
        }
    }

    async fn answer(&self, call: Call) -> Reply {
        let expectation = self.expectations.lock().unwrap().pop_front();
        let expectation = match expectation {
            Some(exp) if same_call(&exp.call, &call) => exp,
            other => {
                let message = format!("{call:?} (expected {:?})", other.map(|e| e.call));
                self.mismatches.lock().unwrap().push(message.clone());
                return Reply::Unit(Err(RemoteError::Rejected(message)));
            }
        };
        if let Some(delay) = expectation.delay {
            tokio::time::sleep(delay).await;
        }
        expectation.reply
    }
}

fn same_call(expected: &Call, actual: &Call) -> bool {
    match (expected, actual) {
        (Call::Create, Call::Create) | (Call::OrdersSince, Call::OrdersSince) => true,
        (Call::ItemStatus(a, item_a, status_a), Call::ItemStatus(b, item_b, status_b)) => {
            a == b && item_a == item_b && status_a == status_b
        }
        (Call::PaymentMethod(a, method_a), Call::PaymentMethod(b, method_b)) => {
            a == b && method_a == method_b
        }
        (Call::Served(a), Call::Served(b)) => a == b,
        _ => false,
    }
}

fn unexpected<T>(reply: Reply) -> Result<T, RemoteError> {
    match reply {
        Reply::Unit(Err(e)) | Reply::Id(Err(e)) | Reply::Records(Err(e)) => Err(e),
        other => Err(RemoteError::Rejected(format!("mismatched reply {other:?}"))),
    }
}

#[async_trait]
impl DocumentStore for MockDocumentStore {
    async fn create_order(&self, document: OrderDocument) -> Result<OrderId, RemoteError> {
        self.created.lock().unwrap().push(document);
        match self.answer(Call::Create).await {
            Reply::Id(result) => result,
            other => unexpected(other),
        }
    }

    async fn patch_item_status(
        &self,
        order_id: &OrderId,
        item_id: &str,
        status: ItemStatus,
    ) -> Result<(), RemoteError> {
        let call = Call::ItemStatus(order_id.clone(), item_id.to_string(), status);
        match self.answer(call).await {
            Reply::Unit(result) => result,
            other => unexpected(other),
        }
    }

    async fn patch_payment_method(
        &self,
        order_id: &OrderId,
        method: PaymentMethod,
    ) -> Result<(), RemoteError> {
        match self.answer(Call::PaymentMethod(order_id.clone(), method)).await {
            Reply::Unit(result) => result,
            other => unexpected(other),
        }
    }

    async fn mark_served(&self, order_id: &OrderId) -> Result<(), RemoteError> {
        match self.answer(Call::Served(order_id.clone())).await {
            Reply::Unit(result) => result,
            other => unexpected(other),
        }
    }

    async fn orders_since(&self, _since: DateTime<Utc>) -> Result<Vec<OrderRecord>, RemoteError> {
        match self.answer(Call::OrdersSince).await {
            Reply::Records(result) => result,
            other => unexpected(other),
        }
    }
}

/// Builder for a single expectation.
pub struct ExpectationBuilder<T> {
    call: Call,
    delay: Option<Duration>,
    expectations: Queue,
    _reply: std::marker::PhantomData<T>,
}

impl<T> ExpectationBuilder<T> {
    /// Holds the reply back for `delay` before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    fn push(self, reply: Reply) {
        self.expectations.lock().unwrap().push_back(Expectation {
            call: self.call,
            reply,
            delay: self.delay,
        });
    }
}

impl ExpectationBuilder<OrderId> {
    pub fn return_ok(self, id: OrderId) {
        self.push(Reply::Id(Ok(id)));
    }

    pub fn return_err(self, error: RemoteError) {
        self.push(Reply::Id(Err(error)));
    }
}

impl ExpectationBuilder<()> {
    pub fn return_ok(self) {
        self.push(Reply::Unit(Ok(())));
    }

    pub fn return_err(self, error: RemoteError) {
        self.push(Reply::Unit(Err(error)));
    }
}

impl ExpectationBuilder<Vec<OrderRecord>> {
    pub fn return_ok(self, records: Vec<OrderRecord>) {
        self.push(Reply::Records(Ok(records)));
    }

    pub fn return_err(self, error: RemoteError) {
        self.push(Reply::Records(Err(error)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_answers_in_order() {
        let mock = MockDocumentStore::new();
        mock.expect_served("a".into()).return_ok();
        mock.expect_served("b".into())
            .return_err(RemoteError::Unavailable("down".into()));

        assert_eq!(mock.mark_served(&"a".into()).await, Ok(()));
        assert_eq!(
            mock.mark_served(&"b".into()).await,
            Err(RemoteError::Unavailable("down".into()))
        );
        mock.verify();
    }

    #[tokio::test]
    #[should_panic(expected = "Unexpected calls")]
    async fn test_mismatch_fails_verify() {
        let mock = MockDocumentStore::new();
        mock.expect_served("a".into()).return_ok();

        let result = mock.patch_payment_method(&"a".into(), PaymentMethod::Cash).await;
        assert!(matches!(result, Err(RemoteError::Rejected(_))));
        mock.verify();
    }

    #[tokio::test]
    #[should_panic(expected = "Unexpected calls")]
    async fn test_wrong_item_key_fails_verify() {
        let mock = MockDocumentStore::new();
        mock.expect_item_status("a".into(), "latte-cold", ItemStatus::Completed)
            .return_ok();

        let result = mock
            .patch_item_status(&"a".into(), "latte", ItemStatus::Completed)
            .await;
        assert!(matches!(result, Err(RemoteError::Rejected(_))));
        mock.verify();
    }

    #[tokio::test]
    #[should_panic(expected = "Unexpected calls")]
    async fn test_wrong_payment_method_fails_verify() {
        let mock = MockDocumentStore::new();
        mock.expect_payment_method("a".into(), PaymentMethod::Qr).return_ok();

        let result = mock.patch_payment_method(&"a".into(), PaymentMethod::Cash).await;
        assert!(matches!(result, Err(RemoteError::Rejected(_))));
        mock.verify();
    }
}
