//! Order documents as stored in the shared `orders` collection.
//!
//! Field names and values follow the existing collection schema literally:
//! camelCase names, lower-case status and payment values, amounts as plain
//! numbers, and timestamps assigned by the store itself.

use crate::model::{ItemStatus, LineItem, Money, OrderStatus, PaymentMethod, Temperature};
use crate::model::OrderId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// One line inside an order document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentItem {
    /// Base product id; temperature variants share it.
    pub id: String,
    pub name: String,
    pub price: Money,
    #[serde(default)]
    pub temperature: Option<Temperature>,
    #[serde(default = "one")]
    pub quantity: u32,
    #[serde(default)]
    pub status: ItemStatus,
    /// Empty when the writer did not record one.
    #[serde(default)]
    pub category: String,
}

fn one() -> u32 {
    1
}

impl DocumentItem {
    /// The id the tracker uses for this line: `id`, or `id-<temperature>`.
    pub fn key(&self) -> String {
        match self.temperature {
            Some(t) => crate::model::variant_id(&self.id, t),
            None => self.id.clone(),
        }
    }
}

impl From<&LineItem> for DocumentItem {
    fn from(item: &LineItem) -> Self {
        Self {
            id: item.product_id().to_string(),
            name: item.name.clone(),
            price: item.price,
            temperature: item.temperature,
            quantity: item.quantity,
            status: item.status,
            category: item.category.clone(),
        }
    }
}

/// Payload of the create-order write.
///
/// `timestamp` is not part of the payload; the store stamps it on insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDocument {
    pub customer_name: String,
    #[serde(default)]
    pub customer_gender: Option<String>,
    pub items: Vec<DocumentItem>,
    pub total_amount: Money,
    #[serde(default)]
    pub status: OrderStatus,
    /// `null` until the order is settled. Unrecognized stored values read
    /// back as `None` so statistics never count them as QR.
    #[serde(default, deserialize_with = "stored_payment_method")]
    pub payment_method: Option<PaymentMethod>,
}

fn stored_payment_method<'de, D>(deserializer: D) -> Result<Option<PaymentMethod>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(PaymentMethod::parse_strict))
}

impl OrderDocument {
    /// Applies a status patch for tracker item `item_id`.
    ///
    /// Returns false when no line matches.
    pub fn set_item_status(&mut self, item_id: &str, status: ItemStatus) -> bool {
        let index = self
            .items
            .iter()
            .position(|item| item.key() == item_id)
            .or_else(|| self.items.iter().position(|item| item.id == item_id));
        match index {
            Some(i) => {
                self.items[i].status = status;
                true
            }
            None => false,
        }
    }
}

/// A stored order document as read back from the collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRecord {
    pub id: OrderId,
    #[serde(flatten)]
    pub document: OrderDocument,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}
