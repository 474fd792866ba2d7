use async_trait::async_trait;

use crate::domain::order::{ItemId, Order, OrderId, TenantId};

pub mod memory;

pub use memory::InMemoryOrderStore;

// ============================================================================
// Order Store - Persistence Seam
// ============================================================================
//
// The order header and its item list persist atomically; a save either
// commits the whole mutated order or nothing. Lost-update races are detected
// with the order's version token: `save` compares the caller's loaded
// version against the stored one and rejects a stale write, so two
// concurrent mutations can never both commit totals computed from the same
// pre-image.
//
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("order {0} not found")]
    NotFound(OrderId),

    #[error("version conflict on order {id}: expected {expected}, stored {actual}")]
    VersionConflict {
        id: OrderId,
        expected: i64,
        actual: i64,
    },

    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Persist a new order, assigning its id and initial version.
    async fn insert(&self, order: Order) -> Result<Order, StoreError>;

    /// Tenant-scoped load. A cross-tenant id behaves exactly like a missing
    /// one.
    async fn load(&self, tenant: TenantId, id: OrderId) -> Result<Order, StoreError>;

    /// Compare-and-swap on the order's version; returns the saved order with
    /// the version bumped.
    async fn save(&self, order: Order) -> Result<Order, StoreError>;

    /// Next line-item id, unique across the store.
    async fn next_item_id(&self) -> ItemId;

    /// All orders belonging to one tenant, in creation order.
    async fn list(&self, tenant: TenantId) -> Result<Vec<Order>, StoreError>;
}
