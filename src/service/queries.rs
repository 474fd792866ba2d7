use chrono::NaiveDate;

use super::order_service::OrderService;
use crate::domain::order::{ClientId, Order, OrderKindTag, OrderStatus, TenantId};
use crate::error::ServiceError;

// ============================================================================
// Query Operations - Read-Only Projections
// ============================================================================
//
// Filtering views over the tenant's orders; items and derived totals are
// already populated on the stored aggregates. Date ranges compare the
// creation date only, both ends inclusive, so an order placed at 23:59 on
// the end date is still included.
//
// ============================================================================

impl OrderService {
    /// Orders created between `start` and `end`, inclusive through
    /// end-of-day.
    pub async fn list_by_date_range(
        &self,
        tenant: TenantId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Order>, ServiceError> {
        let orders = self.store.list(tenant).await?;
        Ok(orders
            .into_iter()
            .filter(|o| {
                let created = o.created_at.date_naive();
                created >= start && created <= end
            })
            .collect())
    }

    pub async fn list_by_client(
        &self,
        tenant: TenantId,
        client: ClientId,
    ) -> Result<Vec<Order>, ServiceError> {
        let orders = self.store.list(tenant).await?;
        Ok(orders.into_iter().filter(|o| o.client_id == client).collect())
    }

    pub async fn list_by_kind(
        &self,
        tenant: TenantId,
        kind: OrderKindTag,
    ) -> Result<Vec<Order>, ServiceError> {
        let orders = self.store.list(tenant).await?;
        Ok(orders.into_iter().filter(|o| o.kind.tag() == kind).collect())
    }

    pub async fn list_open(&self, tenant: TenantId) -> Result<Vec<Order>, ServiceError> {
        let orders = self.store.list(tenant).await?;
        Ok(orders
            .into_iter()
            .filter(|o| o.status == OrderStatus::Open)
            .collect())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
