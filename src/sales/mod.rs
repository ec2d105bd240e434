//! Sales statistics over settled orders.
//!
//! Only records whose payment method is cash or QR count as sales; orders
//! still awaiting payment are ignored entirely.

use crate::model::{Money, PaymentMethod};
use crate::remote::OrderRecord;
use chrono::{DateTime, Local, Months, NaiveDate, TimeZone, Timelike, Utc};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Entries kept in [`SalesSummary::top_items`].
pub const TOP_ITEMS_LIMIT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SalesRange {
    /// Since local midnight.
    Day,
    /// The last 7 days.
    Week,
    /// The last calendar month.
    Month,
    /// The last calendar year.
    Year,
}

impl SalesRange {
    /// Start of the range ending at `now`.
    pub fn since<Tz: TimeZone>(self, now: DateTime<Tz>) -> DateTime<Utc> {
        let start = match self {
            SalesRange::Day => now
                .with_hour(0)
                .and_then(|t| t.with_minute(0))
                .and_then(|t| t.with_second(0))
                .and_then(|t| t.with_nanosecond(0)),
            SalesRange::Week => Some(now.clone() - chrono::Duration::days(7)),
            SalesRange::Month => now.clone().checked_sub_months(Months::new(1)),
            SalesRange::Year => now.clone().checked_sub_months(Months::new(12)),
        };
        // Midnight can be skipped by a DST jump; fall back to 24 hours.
        start
            .unwrap_or_else(|| now - chrono::Duration::hours(24))
            .with_timezone(&Utc)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MethodTotals {
    pub count: usize,
    pub total: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemSales {
    pub name: String,
    pub quantity: u32,
    pub revenue: Money,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySales {
    pub name: String,
    pub revenue: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HourlySales {
    pub hour: u32,
    pub sales: Money,
    pub orders: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailySales {
    pub date: NaiveDate,
    pub sales: Money,
    pub orders: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesSummary {
    pub range: SalesRange,
    pub revenue: Money,
    pub orders: usize,
    pub average_order_value: Money,
    pub cash: MethodTotals,
    pub qr: MethodTotals,
    /// Best sellers by quantity, at most [`TOP_ITEMS_LIMIT`].
    pub top_items: Vec<ItemSales>,
    /// Revenue per category over all items, highest first.
    pub categories: Vec<CategorySales>,
    /// Non-empty hours of the day; only for [`SalesRange::Day`].
    pub hourly: Vec<HourlySales>,
    /// Days ascending; only for week and month ranges.
    pub daily: Vec<DailySales>,
}

impl SalesSummary {
    /// Aggregates `records`, bucketing by local time.
    pub fn from_records(records: &[OrderRecord], range: SalesRange) -> Self {
        Self::from_records_in(records, range, &Local)
    }

    pub fn from_records_in<Tz: TimeZone>(records: &[OrderRecord], range: SalesRange, tz: &Tz) -> Self {
        let settled: Vec<(&OrderRecord, PaymentMethod)> = records
            .iter()
            .filter_map(|r| r.document.payment_method.map(|m| (r, m)))
            .collect();

        let mut summary = Self {
            range,
            revenue: Money::ZERO,
            orders: settled.len(),
            average_order_value: Money::ZERO,
            cash: MethodTotals::default(),
            qr: MethodTotals::default(),
            top_items: Vec::new(),
            categories: Vec::new(),
            hourly: Vec::new(),
            daily: Vec::new(),
        };

        let mut items: Vec<ItemSales> = Vec::new();
        let mut item_index: HashMap<String, usize> = HashMap::new();
        let mut hours: BTreeMap<u32, HourlySales> = BTreeMap::new();
        let mut days: BTreeMap<NaiveDate, DailySales> = BTreeMap::new();

        for (record, method) in &settled {
            let amount = record.document.total_amount;
            summary.revenue += amount;

            let totals = match method {
                PaymentMethod::Cash => &mut summary.cash,
                PaymentMethod::Qr => &mut summary.qr,
            };
            totals.count += 1;
            totals.total += amount;

            for item in &record.document.items {
                let name = if item.name.trim().is_empty() {
                    "Unknown Item".to_string()
                } else {
                    item.name.clone()
                };
                let category = normalize_category(&item.category, &name);
                let revenue = item.price * item.quantity;
                match item_index.get(&name) {
                    Some(&i) => {
                        let entry = &mut items[i];
                        entry.quantity += item.quantity;
                        entry.revenue += revenue;
                        entry.category = category;
                    }
                    None => {
                        item_index.insert(name.clone(), items.len());
                        items.push(ItemSales {
                            name,
                            quantity: item.quantity,
                            revenue,
                            category,
                        });
                    }
                }
            }

            let local = record.timestamp.with_timezone(tz);
            match range {
                SalesRange::Day => {
                    let hour = local.hour();
                    let bucket = hours.entry(hour).or_insert(HourlySales {
                        hour,
                        sales: Money::ZERO,
                        orders: 0,
                    });
                    bucket.sales += amount;
                    bucket.orders += 1;
                }
                SalesRange::Week | SalesRange::Month => {
                    let date = local.date_naive();
                    let bucket = days.entry(date).or_insert(DailySales {
                        date,
                        sales: Money::ZERO,
                        orders: 0,
                    });
                    bucket.sales += amount;
                    bucket.orders += 1;
                }
                SalesRange::Year => {}
            }
        }

        if summary.orders > 0 {
            let average = summary.revenue.cents() as f64 / summary.orders as f64;
            summary.average_order_value = Money::from_cents(average.round() as i64);
        }

        // Stable: ties keep first-seen order.
        items.sort_by(|a, b| b.quantity.cmp(&a.quantity));

        let mut categories: Vec<CategorySales> = Vec::new();
        for item in &items {
            match categories.iter_mut().find(|c| c.name == item.category) {
                Some(c) => c.revenue += item.revenue,
                None => categories.push(CategorySales {
                    name: item.category.clone(),
                    revenue: item.revenue,
                }),
            }
        }
        categories.sort_by(|a, b| b.revenue.cmp(&a.revenue));

        items.truncate(TOP_ITEMS_LIMIT);
        summary.top_items = items;
        summary.categories = categories;
        summary.hourly = hours.into_values().filter(|h| h.sales.is_positive()).collect();
        summary.daily = days.into_values().collect();
        summary
    }
}

/// Maps a stored category onto the reporting categories.
///
/// Missing categories are inferred from the item name.
pub fn normalize_category(raw: &str, item_name: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        let name = item_name.to_lowercase();
        let is_coffee = ["coffee", "latte", "espresso", "cappuccino"]
            .iter()
            .any(|w| name.contains(w));
        return if is_coffee { "Coffee" } else { "Non-Coffee" }.to_string();
    }

    match raw.to_lowercase().as_str() {
        "coffee" => "Coffee".to_string(),
        "noncoffee" | "non-coffee" | "tea" | "food" | "dessert" | "beverage" => "Non-Coffee".to_string(),
        _ => {
            let mut chars = raw.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        }
    }
}
