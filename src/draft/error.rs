use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum DraftError {
    #[error("Order has no items")]
    Empty,

    #[error("Customer name is required")]
    MissingCustomer,

    #[error("Menu item is not available: {0}")]
    Unavailable(String),

    #[error("Menu item has no price: {0}")]
    MissingPrice(String),
}
