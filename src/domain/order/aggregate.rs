use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::errors::OrderError;
use super::totals;
use super::value_objects::{
    ClientId, ItemId, OrderId, OrderItem, OrderKind, OrderStatus, OrderTotals, TenantId,
};

/// Free-text limit on the order header.
pub const ORDER_NOTES_MAX: usize = 500;
/// Free-text limit on a single line item.
pub const ITEM_NOTES_MAX: usize = 200;

// ============================================================================
// Order Aggregate - Domain Logic
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    // Identity
    pub id: OrderId,
    /// Optimistic-concurrency token, bumped by the store on every save.
    pub version: i64,

    // Scope
    pub tenant_id: TenantId,
    pub client_id: ClientId,

    // State
    pub kind: OrderKind,
    pub status: OrderStatus,
    pub items: Vec<OrderItem>,
    pub notes: Option<String>,

    // Derived
    pub totals: OrderTotals,

    // Audit
    pub created_at: DateTime<Utc>,
    pub finalized_at: Option<DateTime<Utc>>,
}

impl Order {
    /// New open order with no items yet. The id is a placeholder until the
    /// store assigns one on insert.
    pub fn create(
        tenant_id: TenantId,
        client_id: ClientId,
        kind: OrderKind,
        notes: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<Self, OrderError> {
        validate_notes(notes.as_deref(), ORDER_NOTES_MAX)?;

        Ok(Self {
            id: OrderId(0),
            version: 0,
            tenant_id,
            client_id,
            kind,
            status: OrderStatus::Open,
            items: Vec::new(),
            notes,
            totals: OrderTotals::ZERO,
            created_at: now,
            finalized_at: None,
        })
    }

    /// Recompute the derived totals from the current item list and kind.
    pub fn recalculate(&mut self) {
        self.totals = totals::compute(&self.kind, &self.items);
    }

    /// Append a line item and recalculate.
    ///
    /// `unit_price` is the catalog price at this moment; it becomes the item's
    /// immutable snapshot.
    pub fn add_item(&mut self, item: OrderItem) -> Result<(), OrderError> {
        self.ensure_editable()?;

        if item.quantity < 1 {
            return Err(OrderError::InvalidQuantity(item.quantity));
        }
        validate_notes(item.notes.as_deref(), ITEM_NOTES_MAX)?;

        self.items.push(item);
        self.recalculate();
        Ok(())
    }

    /// Remove one item by id. An id that belongs to another order is
    /// indistinguishable from a missing one.
    pub fn remove_item(&mut self, item_id: ItemId) -> Result<(), OrderError> {
        self.ensure_editable()?;

        let pos = self
            .items
            .iter()
            .position(|i| i.id == item_id)
            .ok_or(OrderError::ItemNotFound(item_id))?;

        self.items.remove(pos);
        self.recalculate();
        Ok(())
    }

    /// Update quantity and notes in place. The unit-price snapshot is
    /// deliberately untouched.
    pub fn update_item(
        &mut self,
        item_id: ItemId,
        quantity: i32,
        notes: Option<String>,
    ) -> Result<(), OrderError> {
        self.ensure_editable()?;

        if quantity < 1 {
            return Err(OrderError::InvalidQuantity(quantity));
        }
        validate_notes(notes.as_deref(), ITEM_NOTES_MAX)?;

        let item = self
            .items
            .iter_mut()
            .find(|i| i.id == item_id)
            .ok_or(OrderError::ItemNotFound(item_id))?;

        item.quantity = quantity;
        item.notes = notes;
        self.recalculate();
        Ok(())
    }

    /// Close a dine-in account, optionally overriding the service-charge
    /// percentage for the final recalculation.
    pub fn close_account(
        &mut self,
        final_service_charge_percent: Option<Decimal>,
        now: DateTime<Utc>,
    ) -> Result<(), OrderError> {
        self.ensure_editable()?;

        match self.kind {
            OrderKind::DineIn { .. } => {}
            OrderKind::Pickup | OrderKind::Delivery { .. } => {
                return Err(OrderError::CloseRequiresDineIn)
            }
        }

        if final_service_charge_percent.is_some() {
            self.kind = OrderKind::dine_in(final_service_charge_percent)?;
        }

        self.status = OrderStatus::Closed;
        self.finalized_at = Some(now);
        self.recalculate();
        Ok(())
    }

    /// Cancel from any non-terminal state. Totals are left as-is; revenue
    /// reporting excludes cancelled orders downstream.
    pub fn cancel(&mut self) -> Result<(), OrderError> {
        match self.status {
            OrderStatus::Cancelled => return Err(OrderError::AlreadyCancelled),
            s if s.is_terminal() => return Err(OrderError::NotEditable(s)),
            _ => {}
        }

        self.status = OrderStatus::Cancelled;
        Ok(())
    }

    /// Advance one step along the kitchen flow
    /// (`Open → Preparing → Ready → Delivered`).
    pub fn advance(&mut self) -> Result<OrderStatus, OrderError> {
        let next = self
            .status
            .next_in_flow()
            .ok_or(OrderError::InvalidStatusTransition(self.status))?;

        self.status = next;
        Ok(next)
    }

    fn ensure_editable(&self) -> Result<(), OrderError> {
        if self.status.is_terminal() {
            return Err(OrderError::NotEditable(self.status));
        }
        Ok(())
    }
}

fn validate_notes(notes: Option<&str>, max: usize) -> Result<(), OrderError> {
    match notes {
        Some(n) if n.chars().count() > max => Err(OrderError::NotesTooLong { max }),
        _ => Ok(()),
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::value_objects::ProductId;
    use rust_decimal_macros::dec;

    fn dine_in_order() -> Order {
        Order::create(
            TenantId(1),
            ClientId(1),
            OrderKind::dine_in(None).unwrap(),
            None,
            Utc::now(),
        )
        .unwrap()
    }

    fn item(id: i64, quantity: i32, unit_price: Decimal) -> OrderItem {
        OrderItem {
            id: ItemId(id),
            product_id: ProductId(id),
            quantity,
            unit_price,
            notes: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_add_item_recalculates_totals() {
        let mut order = dine_in_order();
        order.add_item(item(1, 2, dec!(25.00))).unwrap();

        assert_eq!(order.totals.subtotal, dec!(50.00));
        assert_eq!(order.totals.service_charge, dec!(5.00));
        assert_eq!(order.totals.total, dec!(55.00));
    }

    #[test]
    fn test_add_item_rejects_zero_quantity() {
        let mut order = dine_in_order();
        let err = order.add_item(item(1, 0, dec!(5.00))).unwrap_err();
        assert!(matches!(err, OrderError::InvalidQuantity(0)));
        assert!(order.items.is_empty());
    }

    #[test]
    fn test_remove_item_recalculates() {
        let mut order = dine_in_order();
        order.add_item(item(1, 1, dec!(10.00))).unwrap();
        order.add_item(item(2, 1, dec!(4.00))).unwrap();

        order.remove_item(ItemId(1)).unwrap();

        assert_eq!(order.items.len(), 1);
        assert_eq!(order.totals.subtotal, dec!(4.00));
        assert_eq!(order.totals.total, dec!(4.40));
    }

    #[test]
    fn test_remove_unknown_item_is_not_found() {
        let mut order = dine_in_order();
        order.add_item(item(1, 1, dec!(10.00))).unwrap();

        let err = order.remove_item(ItemId(99)).unwrap_err();
        assert!(matches!(err, OrderError::ItemNotFound(ItemId(99))));
    }

    #[test]
    fn test_update_item_preserves_price_snapshot() {
        let mut order = dine_in_order();
        order.add_item(item(1, 2, dec!(25.00))).unwrap();

        order.update_item(ItemId(1), 3, Some("no onions".into())).unwrap();

        let updated = &order.items[0];
        assert_eq!(updated.quantity, 3);
        assert_eq!(updated.unit_price, dec!(25.00));
        assert_eq!(order.totals.subtotal, dec!(75.00));
    }

    #[test]
    fn test_close_account_with_final_percent() {
        let mut order = dine_in_order();
        order.add_item(item(1, 2, dec!(25.00))).unwrap();

        order.close_account(Some(dec!(15)), Utc::now()).unwrap();

        assert_eq!(order.status, OrderStatus::Closed);
        assert!(order.finalized_at.is_some());
        assert_eq!(order.totals.service_charge, dec!(7.50));
        assert_eq!(order.totals.total, dec!(57.50));
    }

    #[test]
    fn test_close_account_rejected_for_delivery() {
        let mut order = Order::create(
            TenantId(1),
            ClientId(1),
            OrderKind::delivery(Some(dec!(8.00))).unwrap(),
            None,
            Utc::now(),
        )
        .unwrap();

        let err = order.close_account(None, Utc::now()).unwrap_err();
        assert!(matches!(err, OrderError::CloseRequiresDineIn));
        assert_eq!(order.status, OrderStatus::Open);
    }

    #[test]
    fn test_cancelled_order_rejects_mutation() {
        let mut order = dine_in_order();
        order.cancel().unwrap();
        assert_eq!(order.status, OrderStatus::Cancelled);

        let err = order.add_item(item(1, 1, dec!(5.00))).unwrap_err();
        assert!(matches!(err, OrderError::NotEditable(OrderStatus::Cancelled)));
    }

    #[test]
    fn test_double_cancel_rejected() {
        let mut order = dine_in_order();
        order.cancel().unwrap();
        assert!(matches!(order.cancel(), Err(OrderError::AlreadyCancelled)));
    }

    #[test]
    fn test_cancel_from_any_active_state() {
        for advances in 0..3 {
            let mut order = dine_in_order();
            for _ in 0..advances {
                order.advance().unwrap();
            }
            order.cancel().unwrap();
            assert_eq!(order.status, OrderStatus::Cancelled);
        }
    }

    #[test]
    fn test_cancel_after_delivered_rejected() {
        let mut order = dine_in_order();
        order.advance().unwrap(); // Preparing
        order.advance().unwrap(); // Ready
        order.advance().unwrap(); // Delivered

        assert!(matches!(
            order.cancel(),
            Err(OrderError::NotEditable(OrderStatus::Delivered))
        ));
    }

    #[test]
    fn test_advance_past_delivered_rejected() {
        let mut order = dine_in_order();
        order.advance().unwrap();
        order.advance().unwrap();
        assert_eq!(order.advance().unwrap(), OrderStatus::Delivered);

        assert!(matches!(
            order.advance(),
            Err(OrderError::InvalidStatusTransition(OrderStatus::Delivered))
        ));
    }

    #[test]
    fn test_order_notes_limit() {
        let long = "x".repeat(ORDER_NOTES_MAX + 1);
        let err = Order::create(
            TenantId(1),
            ClientId(1),
            OrderKind::pickup(),
            Some(long),
            Utc::now(),
        )
        .unwrap_err();
        assert!(matches!(err, OrderError::NotesTooLong { max: ORDER_NOTES_MAX }));
    }

    #[test]
    fn test_item_notes_limit() {
        let mut order = dine_in_order();
        let mut too_long = item(1, 1, dec!(5.00));
        too_long.notes = Some("x".repeat(ITEM_NOTES_MAX + 1));

        let err = order.add_item(too_long).unwrap_err();
        assert!(matches!(err, OrderError::NotesTooLong { max: ITEM_NOTES_MAX }));
    }

    #[test]
    fn test_total_invariant_after_mutations() {
        let mut order = dine_in_order();
        order.add_item(item(1, 2, dec!(9.99))).unwrap();
        order.add_item(item(2, 5, dec!(3.45))).unwrap();
        order.update_item(ItemId(1), 4, None).unwrap();
        order.remove_item(ItemId(2)).unwrap();

        let t = order.totals;
        assert_eq!(t.total, t.subtotal + t.service_charge + t.delivery_fee);
    }
}
