use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{OrderStore, StoreError};
use crate::domain::order::{ItemId, Order, OrderId, TenantId};

// ============================================================================
// In-Memory Order Store
// ============================================================================
//
// Reference implementation of the store contract, used by the demo binary and
// the tests. The version check and the write happen under one write lock, so
// the compare-and-increment is atomic exactly like a transactional UPDATE
// with a version predicate would be.
//
// ============================================================================

#[derive(Default)]
pub struct InMemoryOrderStore {
    orders: RwLock<BTreeMap<OrderId, Order>>,
    next_order_id: AtomicI64,
    next_item_id: AtomicI64,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn insert(&self, mut order: Order) -> Result<Order, StoreError> {
        order.id = OrderId(self.next_order_id.fetch_add(1, Ordering::SeqCst) + 1);
        order.version = 1;

        let mut orders = self.orders.write().await;
        orders.insert(order.id, order.clone());
        Ok(order)
    }

    async fn load(&self, tenant: TenantId, id: OrderId) -> Result<Order, StoreError> {
        let orders = self.orders.read().await;
        orders
            .get(&id)
            .filter(|o| o.tenant_id == tenant)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    async fn save(&self, mut order: Order) -> Result<Order, StoreError> {
        let mut orders = self.orders.write().await;

        let stored = orders
            .get(&order.id)
            .filter(|o| o.tenant_id == order.tenant_id)
            .ok_or(StoreError::NotFound(order.id))?;

        if stored.version != order.version {
            return Err(StoreError::VersionConflict {
                id: order.id,
                expected: order.version,
                actual: stored.version,
            });
        }

        order.version += 1;
        orders.insert(order.id, order.clone());
        Ok(order)
    }

    async fn next_item_id(&self) -> ItemId {
        ItemId(self.next_item_id.fetch_add(1, Ordering::SeqCst) + 1)
    }

    async fn list(&self, tenant: TenantId) -> Result<Vec<Order>, StoreError> {
        let orders = self.orders.read().await;
        Ok(orders
            .values()
            .filter(|o| o.tenant_id == tenant)
            .cloned()
            .collect())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
