//! # Coffee POS
//!
//! Order lifecycle tracking for a coffee-shop point of sale.
//!
//! ## Core Components
//!
//! - **[model]**: orders, line items, money and payment methods.
//! - **[draft]**: the order form, validated into a create-order payload.
//! - **[tracker]**: the shift's working set of orders, persisted to a
//!   [`storage::LocalStore`] on every change.
//! - **[remote]**: the shared order collection behind [`remote::DocumentStore`],
//!   and the worker that mirrors local changes into it.
//! - **[sales]**: revenue, payment and best-seller statistics.
//! - **[lifecycle]**: [`BaristaSession`](lifecycle::BaristaSession), which
//!   wires all of the above together for one signed-in staff member.
//!
//! ## Order Lifecycle
//!
//! 1. The barista fills an [`draft::OrderDraft`] and places it. The remote
//!    store assigns the id and the order becomes active.
//! 2. Each item moves through `pending -> preparing -> completed`.
//! 3. Payment is settled as cash or QR.
//! 4. Once every item is completed the order is served and moves to the
//!    completed history, which keeps the last five.
//!
//! ## Testing
//!
//! [`storage::MemoryStore`], [`remote::MemoryDocumentStore`] and
//! [`remote::MockDocumentStore`] stand in for the real backends.

pub mod auth;
pub mod config;
pub mod draft;
pub mod lifecycle;
pub mod model;
pub mod notice;
pub mod remote;
pub mod sales;
pub mod storage;
pub mod tracker;
