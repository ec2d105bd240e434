//! Encoding of tracker state for local storage.
//!
//! Orders are stored as a JSON array of camelCase objects. Timestamps are
//! written as RFC 3339 strings and revived leniently: older snapshots may
//! hold epoch milliseconds, and a missing or garbled `createdAt` must not
//! throw away the whole shift.

use crate::model::Order;
use crate::storage::StorageError;
use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::warn;

/// What to do with an order whose `completedAt` is missing on load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingCompletion {
    /// Leave it empty (active orders).
    Empty,
    /// Stamp it with the load time (completed-history entries).
    Now,
}

pub fn encode<'a>(orders: impl IntoIterator<Item = &'a Order>) -> Result<String, StorageError> {
    let orders: Vec<&Order> = orders.into_iter().collect();
    Ok(serde_json::to_string(&orders)?)
}

/// Decodes a stored order list.
///
/// Fails only when `raw` is not a JSON array. Individual entries that cannot
/// be read are skipped with a warning.
pub fn decode(raw: &str, missing_completion: MissingCompletion) -> Result<Vec<Order>, StorageError> {
    let entries: Vec<Value> = serde_json::from_str(raw)?;
    let now = Utc::now();

    let orders = entries
        .into_iter()
        .filter_map(|mut entry| {
            let object = entry.as_object_mut()?;

            let created_at = revive(object.get("createdAt")).unwrap_or(now);
            object.insert("createdAt".into(), Value::String(created_at.to_rfc3339()));

            let completed_at = match (revive(object.get("completedAt")), missing_completion) {
                (Some(ts), _) => Some(ts),
                (None, MissingCompletion::Now) => Some(now),
                (None, MissingCompletion::Empty) => None,
            };
            object.insert(
                "completedAt".into(),
                completed_at.map_or(Value::Null, |ts| Value::String(ts.to_rfc3339())),
            );

            match serde_json::from_value::<Order>(entry) {
                Ok(order) => Some(order),
                Err(e) => {
                    warn!(error = %e, "Skipping unreadable stored order");
                    None
                }
            }
        })
        .collect();

    Ok(orders)
}

/// Parses an RFC 3339 string or epoch milliseconds.
fn revive(value: Option<&Value>) -> Option<DateTime<Utc>> {
    match value? {
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|ts| ts.with_timezone(&Utc)),
        Value::Number(n) => n.as_i64().and_then(DateTime::<Utc>::from_timestamp_millis),
        _ => None,
    }
}
