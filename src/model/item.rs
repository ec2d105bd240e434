use crate::model::Money;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Preparation status of a single line item.
///
/// The nominal flow is `pending -> preparing -> completed`, but any status may
/// be set from any other so a barista can correct mistakes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    #[default]
    Pending,
    Preparing,
    Completed,
}

impl ItemStatus {
    /// Still needs attention behind the counter.
    pub fn is_open(self) -> bool {
        matches!(self, ItemStatus::Pending | ItemStatus::Preparing)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ItemStatus::Pending => "pending",
            ItemStatus::Preparing => "preparing",
            ItemStatus::Completed => "completed",
        }
    }
}

impl Display for ItemStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Serving temperature for drinks offered both hot and cold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Temperature {
    Hot,
    Cold,
}

impl Temperature {
    /// Suffix used in composite line item ids (`latte-hot`).
    pub fn suffix(self) -> &'static str {
        match self {
            Temperature::Hot => "hot",
            Temperature::Cold => "cold",
        }
    }
}

impl Display for Temperature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Temperature::Hot => f.write_str("Hot"),
            Temperature::Cold => f.write_str("Cold"),
        }
    }
}

/// Builds the composite id of a temperature variant: `<productId>-<hot|cold>`.
pub fn variant_id(product_id: &str, temperature: Temperature) -> String {
    format!("{}-{}", product_id, temperature.suffix())
}

fn default_quantity() -> u32 {
    1
}

fn default_category() -> String {
    "Unknown".to_string()
}

/// One product line within an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Plain product id, or `<productId>-<temperature>` for a variant.
    pub id: String,
    /// Base product id. Missing on lines stored before variants existed.
    #[serde(default)]
    pub original_id: Option<String>,
    pub name: String,
    pub price: Money,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default)]
    pub status: ItemStatus,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<Temperature>,
}

impl LineItem {
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: Money, category: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            original_id: Some(id.clone()),
            id,
            name: name.into(),
            price,
            quantity: 1,
            status: ItemStatus::Pending,
            category: category.into(),
            temperature: None,
        }
    }

    /// A temperature variant of `product_id`, named e.g. "Latte (Hot)".
    pub fn variant(
        product_id: &str,
        base_name: &str,
        temperature: Temperature,
        price: Money,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: variant_id(product_id, temperature),
            original_id: Some(product_id.to_string()),
            name: format!("{} ({})", base_name, temperature),
            price,
            quantity: 1,
            status: ItemStatus::Pending,
            category: category.into(),
            temperature: Some(temperature),
        }
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn with_status(mut self, status: ItemStatus) -> Self {
        self.status = status;
        self
    }

    /// The base product this line refers to.
    pub fn product_id(&self) -> &str {
        self.original_id.as_deref().unwrap_or(&self.id)
    }

    /// True when `item_id` names this line, either by its own id or by the
    /// stored base product id.
    pub fn matches(&self, item_id: &str) -> bool {
        self.id == item_id || self.original_id.as_deref() == Some(item_id)
    }

    pub fn subtotal(&self) -> Money {
        self.price * self.quantity
    }
}

/// Guesses a menu category from an item name.
pub fn detect_category(name: &str) -> &'static str {
    if name.trim().is_empty() {
        return "Unknown";
    }
    let name = name.to_lowercase();
    let has = |words: &[&str]| words.iter().any(|w| name.contains(w));

    if has(&["coffee", "latte", "espresso", "cappuccino"]) {
        "Coffee"
    } else if has(&["tea"]) {
        "Tea"
    } else if has(&["cake", "pastry", "cookie", "muffin"]) {
        "Pastry"
    } else if has(&["sandwich", "salad"]) {
        "Food"
    } else if has(&["juice", "soda", "water", "drink"]) {
        "Beverage"
    } else {
        "Other"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_line() {
        let item = LineItem::variant("latte", "Latte", Temperature::Hot, Money::from_cents(900), "coffee");
        assert_eq!(item.id, "latte-hot");
        assert_eq!(item.product_id(), "latte");
        assert_eq!(item.name, "Latte (Hot)");
        assert!(item.matches("latte-hot"));
        assert!(item.matches("latte"));
        assert!(!item.matches("latte-cold"));
    }

    #[test]
    fn test_matching_does_not_use_prefixes() {
        let item = LineItem::new("tea", "Tea", Money::from_cents(300), "Tea");
        assert!(!item.matches("tea-cold"));
        assert!(!item.matches("te"));
    }

    #[test]
    fn test_lenient_deserialization() {
        let item: LineItem = serde_json::from_str(r#"{"id":"x","name":"Mocha","price":5}"#).unwrap();
        assert_eq!(item.quantity, 1);
        assert_eq!(item.status, ItemStatus::Pending);
        assert_eq!(item.category, "Unknown");
        assert_eq!(item.original_id, None);
        assert_eq!(item.product_id(), "x");
    }

    #[test]
    fn test_detect_category() {
        assert_eq!(detect_category("Iced Latte"), "Coffee");
        assert_eq!(detect_category("Green Tea"), "Tea");
        assert_eq!(detect_category("Blueberry Muffin"), "Pastry");
        assert_eq!(detect_category("Chicken Sandwich"), "Food");
        assert_eq!(detect_category("Orange Juice"), "Beverage");
        assert_eq!(detect_category("Mystery"), "Other");
        assert_eq!(detect_category("  "), "Unknown");
    }
}
