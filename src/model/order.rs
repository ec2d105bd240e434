use crate::model::{ItemStatus, LineItem, Money, PaymentMethod};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Opaque order identifier assigned by the document store at creation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub String);

impl OrderId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for OrderId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for OrderId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Overall order status. There is no cancelled state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Completed,
}

/// One customer transaction in progress.
///
/// `total` is fixed when the order is placed and is not recomputed from
/// `items`; whoever edits the items keeps the two consistent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub customer: String,
    /// Only used for styling the tracking card.
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub items: Vec<LineItem>,
    pub total: Money,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default)]
    pub payment_method: Option<PaymentMethod>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Order {
    /// Creates a pending, unpaid order stamped with the current time.
    pub fn new(id: impl Into<OrderId>, customer: impl Into<String>, items: Vec<LineItem>, total: Money) -> Self {
        Self {
            id: id.into(),
            customer: customer.into(),
            gender: None,
            items,
            total,
            status: OrderStatus::Pending,
            payment_method: None,
            created_at: Utc::now(),
            completed_at: None,
        }
    }

    pub fn with_gender(mut self, gender: Option<String>) -> Self {
        self.gender = gender;
        self
    }

    /// Position of the line addressed by `item_id`.
    ///
    /// An exact `id` match wins; otherwise the first line whose base product
    /// id equals `item_id` is used, so a plain product id still reaches a
    /// line stored under its composite variant id.
    fn item_position(&self, item_id: &str) -> Option<usize> {
        self.items
            .iter()
            .position(|item| item.id == item_id)
            .or_else(|| {
                self.items
                    .iter()
                    .position(|item| item.original_id.as_deref() == Some(item_id))
            })
    }

    pub fn item_mut(&mut self, item_id: &str) -> Option<&mut LineItem> {
        let index = self.item_position(item_id)?;
        self.items.get_mut(index)
    }

    pub fn item(&self, item_id: &str) -> Option<&LineItem> {
        self.item_position(item_id).map(|index| &self.items[index])
    }

    /// At least one line still pending or being prepared.
    pub fn has_open_items(&self) -> bool {
        self.items.iter().any(|item| item.status.is_open())
    }

    /// Non-empty and every line completed.
    pub fn all_items_completed(&self) -> bool {
        !self.items.is_empty() && self.items.iter().all(|item| item.status == ItemStatus::Completed)
    }

    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Sum of line subtotals, for checking the stored `total`.
    pub fn items_total(&self) -> Money {
        self.items.iter().map(LineItem::subtotal).sum()
    }
}
