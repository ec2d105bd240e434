//! Plain data types shared by the tracker, the order form and the sync layer.

pub mod item;
pub mod menu;
pub mod money;
pub mod order;
pub mod payment;

pub use item::*;
pub use menu::*;
pub use money::*;
pub use order::*;
pub use payment::*;
