use crate::model::{Money, Temperature};
use serde::{Deserialize, Serialize};

fn available_by_default() -> bool {
    true
}

/// A catalog entry as read from the menu collection.
///
/// Items offered both hot and cold carry `hot_price` and `cold_price`;
/// single-temperature items also mirror their price into `price`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub price: Option<Money>,
    #[serde(default)]
    pub hot_price: Option<Money>,
    #[serde(default)]
    pub cold_price: Option<Money>,
    /// Absent in older records, which count as available.
    #[serde(default = "available_by_default")]
    pub available: bool,
}

impl MenuItem {
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: Money) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: None,
            price: Some(price),
            hot_price: None,
            cold_price: None,
            available: true,
        }
    }

    /// A drink offered in both temperatures.
    pub fn hot_and_cold(id: impl Into<String>, name: impl Into<String>, hot: Money, cold: Money) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: None,
            price: None,
            hot_price: Some(hot),
            cold_price: Some(cold),
            available: true,
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn unavailable(mut self) -> Self {
        self.available = false;
        self
    }

    /// The order form shows temperature buttons only when both prices exist.
    pub fn has_temperature_options(&self) -> bool {
        self.hot_price.is_some() && self.cold_price.is_some()
    }

    pub fn price_for(&self, temperature: Temperature) -> Option<Money> {
        match temperature {
            Temperature::Hot => self.hot_price,
            Temperature::Cold => self.cold_price,
        }
    }
}
