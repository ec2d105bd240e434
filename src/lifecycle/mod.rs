//! Session wiring: one [`BaristaSession`] per signed-in staff member.

pub mod error;
pub mod session;
pub mod tracing;

pub use error::SessionError;
pub use session::BaristaSession;
pub use self::tracing::setup_tracing;
