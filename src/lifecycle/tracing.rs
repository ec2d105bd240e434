//! Log output for the binary.
//!
//! Compact lines without module targets; the structured fields carry the
//! context (`order_id`, `item_id`, `kind`, ...).
//!
//! ```bash
//! # Default: info everywhere, debug for this crate
//! cargo run
//!
//! # Remote sync only
//! RUST_LOG=coffee_pos::remote=debug cargo run
//! ```

use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info,coffee_pos=debug";

pub fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
