//! The order form: a basket being assembled before it becomes an order.

pub mod error;

pub use error::DraftError;

use crate::model::{
    detect_category, variant_id, LineItem, MenuItem, Money, Order, OrderId, OrderStatus, Temperature,
};
use crate::remote::{DocumentItem, OrderDocument};
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderDraft {
    customer: String,
    gender: Option<String>,
    items: Vec<LineItem>,
    total: Money,
}

impl OrderDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_customer(&mut self, name: impl Into<String>, gender: Option<String>) {
        self.customer = name.into();
        self.gender = gender;
    }

    /// Adds one unit of a single-temperature item.
    pub fn add(&mut self, menu_item: &MenuItem) -> Result<(), DraftError> {
        check_available(menu_item)?;
        let price = menu_item
            .price
            .ok_or_else(|| DraftError::MissingPrice(menu_item.name.clone()))?;
        let line = LineItem::new(&menu_item.id, &menu_item.name, price, category_of(menu_item));
        self.push(line);
        Ok(())
    }

    /// Adds one unit of the `temperature` variant. Hot and cold are separate
    /// lines.
    pub fn add_with_temperature(
        &mut self,
        menu_item: &MenuItem,
        temperature: Temperature,
    ) -> Result<(), DraftError> {
        check_available(menu_item)?;
        let price = menu_item
            .price_for(temperature)
            .ok_or_else(|| DraftError::MissingPrice(format!("{} ({})", menu_item.name, temperature)))?;
        let line = LineItem::variant(
            &menu_item.id,
            &menu_item.name,
            temperature,
            price,
            category_of(menu_item),
        );
        self.push(line);
        Ok(())
    }

    /// Takes one unit off the line `item_id`, dropping the line at zero.
    pub fn remove(&mut self, item_id: &str) {
        let Some(index) = self.items.iter().position(|item| item.id == item_id) else {
            return;
        };
        let line = &mut self.items[index];
        self.total -= line.price;
        if line.quantity > 1 {
            line.quantity -= 1;
        } else {
            self.items.remove(index);
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    pub fn total(&self) -> Money {
        self.total
    }

    pub fn customer(&self) -> &str {
        &self.customer
    }

    /// Validates the draft for submission.
    pub fn finalize(&self) -> Result<ValidatedOrder, DraftError> {
        if self.items.is_empty() {
            return Err(DraftError::Empty);
        }
        let customer = self.customer.trim();
        if customer.is_empty() {
            return Err(DraftError::MissingCustomer);
        }
        Ok(ValidatedOrder {
            customer: customer.to_string(),
            gender: self.gender.clone(),
            items: self.items.clone(),
            total: self.total,
        })
    }

    fn push(&mut self, line: LineItem) {
        self.total += line.price;
        match self.items.iter_mut().find(|item| item.id == line.id) {
            Some(existing) => existing.quantity += 1,
            None => self.items.push(line),
        }
        debug!(lines = self.items.len(), total = %self.total, "Draft updated");
    }
}

/// A draft that passed validation, waiting for its remote id.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedOrder {
    customer: String,
    gender: Option<String>,
    items: Vec<LineItem>,
    total: Money,
}

impl ValidatedOrder {
    /// The create-order payload: pending, unpaid.
    pub fn document(&self) -> OrderDocument {
        OrderDocument {
            customer_name: self.customer.clone(),
            customer_gender: self.gender.clone(),
            items: self.items.iter().map(DocumentItem::from).collect(),
            total_amount: self.total,
            status: OrderStatus::Pending,
            payment_method: None,
        }
    }

    /// The tracker entry, keyed by the id the store assigned.
    pub fn into_order(self, id: OrderId) -> Order {
        Order::new(id, self.customer, self.items, self.total).with_gender(self.gender)
    }
}

fn check_available(menu_item: &MenuItem) -> Result<(), DraftError> {
    if menu_item.available {
        Ok(())
    } else {
        Err(DraftError::Unavailable(menu_item.name.clone()))
    }
}

fn category_of(menu_item: &MenuItem) -> String {
    match &menu_item.category {
        Some(category) if !category.trim().is_empty() => category.clone(),
        _ => detect_category(&menu_item.name).to_string(),
    }
}

/// Line id a menu item would get in a draft, for lookups from the form.
pub fn line_id(menu_item: &MenuItem, temperature: Option<Temperature>) -> String {
    match temperature {
        Some(t) => variant_id(&menu_item.id, t),
        None => menu_item.id.clone(),
    }
}
