use crate::domain::order::OrderError;
use crate::store::StoreError;

// ============================================================================
// Boundary Error Taxonomy
// ============================================================================
//
// The four classes a transport layer maps onto status codes:
// Validation → 400, NotFound → 404, StateConflict → 409-ish 400,
// Internal → opaque 500. Domain and store errors convert into these; nothing
// is swallowed silently.
//
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Malformed input; message is safe to show the caller.
    #[error("{0}")]
    Validation(String),

    /// Referenced entity missing or outside the caller's tenant.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Operation invalid for the order's current kind/status, or a
    /// lost-update race detected by the store.
    #[error("{0}")]
    StateConflict(String),

    /// Unexpected failure; logged with full context, opaque to the caller.
    #[error("internal error")]
    Internal(#[source] anyhow::Error),
}

impl From<OrderError> for ServiceError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::InvalidQuantity(_)
            | OrderError::InvalidServiceChargePercent(_)
            | OrderError::NegativeDeliveryFee(_)
            | OrderError::NotesTooLong { .. } => Self::Validation(err.to_string()),

            OrderError::ItemNotFound(_) => Self::NotFound("item"),

            OrderError::AlreadyCancelled
            | OrderError::NotEditable(_)
            | OrderError::InvalidStatusTransition(_)
            | OrderError::CloseRequiresDineIn => Self::StateConflict(err.to_string()),
        }
    }
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => Self::NotFound("order"),
            StoreError::VersionConflict { .. } => {
                Self::StateConflict("order was modified concurrently; reload and retry".into())
            }
            StoreError::Backend(source) => Self::Internal(source),
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
