use rust_decimal::Decimal;

use super::value_objects::{ItemId, OrderStatus};

// ============================================================================
// Order Business Rule Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    #[error("invalid item quantity: {0} (must be at least 1)")]
    InvalidQuantity(i32),

    #[error("service charge percent {0} is outside the 0-100 range")]
    InvalidServiceChargePercent(Decimal),

    #[error("delivery fee cannot be negative: {0}")]
    NegativeDeliveryFee(Decimal),

    #[error("notes exceed the {max}-character limit")]
    NotesTooLong { max: usize },

    #[error("order is already cancelled")]
    AlreadyCancelled,

    #[error("cannot modify order in status {0:?}")]
    NotEditable(OrderStatus),

    #[error("no transition available from status {0:?}")]
    InvalidStatusTransition(OrderStatus),

    #[error("close-account is only valid for dine-in orders")]
    CloseRequiresDineIn,

    #[error("item {0} does not belong to this order")]
    ItemNotFound(ItemId),
}
