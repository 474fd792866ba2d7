use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::catalog::ProductCatalog;
use crate::clients::ClientDirectory;
use crate::domain::order::{
    ClientId, ItemId, Order, OrderError, OrderId, OrderItem, OrderKind, ProductId, TenantId,
};
use crate::error::ServiceError;
use crate::printing::OrderPrinter;
use crate::store::OrderStore;

// ============================================================================
// Order Service
// ============================================================================
//
// Orchestrates: load → mutate in memory → recalculate → versioned save.
//
// Every operation takes an explicit tenant id supplied by the calling layer;
// nothing here reads ambient/global state. A stale save is rejected by the
// store and surfaces as a StateConflict, so concurrent mutations of one
// order can never both commit totals computed from the same pre-image.
//
// ============================================================================

/// Caller-facing shape of one requested line item.
#[derive(Debug, Clone)]
pub struct ItemRequest {
    pub product_id: ProductId,
    pub quantity: i32,
    pub notes: Option<String>,
}

pub struct OrderService {
    pub(crate) store: Arc<dyn OrderStore>,
    catalog: Arc<dyn ProductCatalog>,
    clients: Arc<dyn ClientDirectory>,
    printer: Arc<dyn OrderPrinter>,
}

impl OrderService {
    pub fn new(
        store: Arc<dyn OrderStore>,
        catalog: Arc<dyn ProductCatalog>,
        clients: Arc<dyn ClientDirectory>,
        printer: Arc<dyn OrderPrinter>,
    ) -> Self {
        Self { store, catalog, clients, printer }
    }

    /// Open a new order for an existing client, snapshotting the catalog
    /// price of every requested item.
    pub async fn create(
        &self,
        tenant: TenantId,
        client_id: ClientId,
        kind: OrderKind,
        items: Vec<ItemRequest>,
        notes: Option<String>,
    ) -> Result<Order, ServiceError> {
        let op_id = Uuid::new_v4();

        if !self.clients.exists(tenant, client_id).await {
            return Err(ServiceError::NotFound("client"));
        }

        let mut order = Order::create(tenant, client_id, kind, notes, Utc::now())?;
        for request in items {
            let item = self.snapshot_item(tenant, &request).await?;
            order.add_item(item)?;
        }

        let order = self.store.insert(order).await?;

        tracing::info!(
            op_id = %op_id,
            order_id = %order.id,
            tenant_id = %tenant,
            client_id = %client_id,
            item_count = order.items.len(),
            total = %order.totals.total,
            "order created"
        );

        Ok(order)
    }

    /// Tenant-scoped read of one order with its items and derived totals.
    pub async fn get(&self, tenant: TenantId, id: OrderId) -> Result<Order, ServiceError> {
        Ok(self.store.load(tenant, id).await?)
    }

    /// Append one item, capturing the product's current price as the
    /// snapshot, then recalculate and save.
    pub async fn add_item(
        &self,
        tenant: TenantId,
        id: OrderId,
        request: ItemRequest,
    ) -> Result<Order, ServiceError> {
        let op_id = Uuid::new_v4();

        let mut order = self.store.load(tenant, id).await?;
        let item = self.snapshot_item(tenant, &request).await?;
        order.add_item(item)?;
        let order = self.store.save(order).await?;

        tracing::info!(
            op_id = %op_id,
            order_id = %order.id,
            tenant_id = %tenant,
            product_id = %request.product_id,
            quantity = request.quantity,
            total = %order.totals.total,
            "item added"
        );

        Ok(order)
    }

    /// Remove one item the order owns, then recalculate and save.
    pub async fn remove_item(
        &self,
        tenant: TenantId,
        id: OrderId,
        item_id: ItemId,
    ) -> Result<Order, ServiceError> {
        let mut order = self.store.load(tenant, id).await?;
        order.remove_item(item_id)?;
        let order = self.store.save(order).await?;

        tracing::info!(
            order_id = %order.id,
            tenant_id = %tenant,
            item_id = %item_id,
            total = %order.totals.total,
            "item removed"
        );

        Ok(order)
    }

    /// Update an item's quantity and notes in place. The price snapshot is
    /// never re-fetched.
    pub async fn update_item(
        &self,
        tenant: TenantId,
        id: OrderId,
        item_id: ItemId,
        quantity: i32,
        notes: Option<String>,
    ) -> Result<Order, ServiceError> {
        let mut order = self.store.load(tenant, id).await?;
        order.update_item(item_id, quantity, notes)?;
        let order = self.store.save(order).await?;

        tracing::info!(
            order_id = %order.id,
            tenant_id = %tenant,
            item_id = %item_id,
            quantity,
            total = %order.totals.total,
            "item updated"
        );

        Ok(order)
    }

    /// Close a dine-in account, applying the final service-charge percentage
    /// before the last recalculation.
    pub async fn close_account(
        &self,
        tenant: TenantId,
        id: OrderId,
        final_service_charge_percent: Option<Decimal>,
    ) -> Result<Order, ServiceError> {
        let mut order = self.store.load(tenant, id).await?;
        order.close_account(final_service_charge_percent, Utc::now())?;
        let order = self.store.save(order).await?;

        tracing::info!(
            order_id = %order.id,
            tenant_id = %tenant,
            service_charge = %order.totals.service_charge,
            total = %order.totals.total,
            "account closed"
        );

        Ok(order)
    }

    /// Cancel an order in any non-terminal status.
    pub async fn cancel(&self, tenant: TenantId, id: OrderId) -> Result<Order, ServiceError> {
        let mut order = self.store.load(tenant, id).await?;
        order.cancel()?;
        let order = self.store.save(order).await?;

        tracing::info!(order_id = %order.id, tenant_id = %tenant, "order cancelled");

        Ok(order)
    }

    /// Move the order one step along the kitchen flow.
    pub async fn advance(&self, tenant: TenantId, id: OrderId) -> Result<Order, ServiceError> {
        let mut order = self.store.load(tenant, id).await?;
        let status = order.advance()?;
        let order = self.store.save(order).await?;

        tracing::info!(
            order_id = %order.id,
            tenant_id = %tenant,
            status = ?status,
            "order advanced"
        );

        Ok(order)
    }

    /// Send the order to the printing collaborator. Fire-and-forget: a
    /// printer failure is logged and reported as `false`, never an error.
    pub async fn print(&self, tenant: TenantId, id: OrderId) -> Result<bool, ServiceError> {
        let order = self.store.load(tenant, id).await?;
        let ok = self.printer.print(&order).await;

        if !ok {
            tracing::warn!(order_id = %order.id, tenant_id = %tenant, "printer reported failure");
        }

        Ok(ok)
    }

    async fn snapshot_item(
        &self,
        tenant: TenantId,
        request: &ItemRequest,
    ) -> Result<OrderItem, ServiceError> {
        if request.quantity < 1 {
            return Err(OrderError::InvalidQuantity(request.quantity).into());
        }

        let product = self
            .catalog
            .get(tenant, request.product_id)
            .await
            .ok_or(ServiceError::NotFound("product"))?;

        Ok(OrderItem {
            id: self.store.next_item_id().await,
            product_id: product.id,
            quantity: request.quantity,
            unit_price: product.price,
            notes: request.notes.clone(),
            created_at: Utc::now(),
        })
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
