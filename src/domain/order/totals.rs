use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::value_objects::{OrderItem, OrderKind, OrderTotals};

// ============================================================================
// Total Calculation Engine
// ============================================================================
//
// Pure over the in-memory item list and order kind; the caller persists the
// result. Every monetary value is exact decimal arithmetic, rounded only to
// the currency's two minor-unit places.
//
// ============================================================================

/// Recompute subtotal, service charge, delivery fee and total.
///
/// The service charge is derived only for dine-in orders and explicitly
/// overwritten to zero otherwise, so a stale value can never survive an order
/// whose kind or percentage was edited. The delivery fee is passed through
/// from the `Delivery` variant unchanged.
pub fn compute(kind: &OrderKind, items: &[OrderItem]) -> OrderTotals {
    let subtotal: Decimal = items.iter().map(OrderItem::line_total).sum();

    let service_charge = match kind {
        OrderKind::DineIn { service_charge_percent } => {
            (subtotal * service_charge_percent / dec!(100)).round_dp(2)
        }
        OrderKind::Pickup | OrderKind::Delivery { .. } => Decimal::ZERO,
    };

    let delivery_fee = match kind {
        OrderKind::Delivery { delivery_fee } => *delivery_fee,
        OrderKind::Pickup | OrderKind::DineIn { .. } => Decimal::ZERO,
    };

    OrderTotals {
        subtotal,
        service_charge,
        delivery_fee,
        total: subtotal + service_charge + delivery_fee,
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::value_objects::{ItemId, ProductId};
    use chrono::Utc;

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
    fn test_dine_in_default_percent_scenario() {
        // qty 2 × 25.00 at the 10% default
        let kind = OrderKind::dine_in(None).unwrap();
        let totals = compute(&kind, &[item(1, 2, dec!(25.00))]);

        assert_eq!(totals.subtotal, dec!(50.00));
        assert_eq!(totals.service_charge, dec!(5.00));
        assert_eq!(totals.delivery_fee, dec!(0));
        assert_eq!(totals.total, dec!(55.00));
    }

    #[test]
    fn test_delivery_fee_scenario() {
        let kind = OrderKind::delivery(Some(dec!(8.00))).unwrap();
        let totals = compute(&kind, &[item(1, 1, dec!(20.00))]);

        assert_eq!(totals.subtotal, dec!(20.00));
        assert_eq!(totals.service_charge, dec!(0));
        assert_eq!(totals.delivery_fee, dec!(8.00));
        assert_eq!(totals.total, dec!(28.00));
    }

    #[test]
    fn test_service_charge_gated_to_dine_in() {
        // A pickup or delivery order never accrues a service charge.
        let items = [item(1, 4, dec!(12.50))];

        let pickup = compute(&OrderKind::Pickup, &items);
        assert_eq!(pickup.service_charge, Decimal::ZERO);
        assert_eq!(pickup.total, dec!(50.00));

        let delivery = compute(&OrderKind::delivery(Some(dec!(5.00))).unwrap(), &items);
        assert_eq!(delivery.service_charge, Decimal::ZERO);
        assert_eq!(delivery.total, dec!(55.00));
    }

    #[test]
    fn test_no_floating_point_drift() {
        // 0.10 summed ten times must be exactly 1.00, not 0.9999999...
        let items: Vec<_> = (0..10).map(|i| item(i, 1, dec!(0.10))).collect();
        let totals = compute(&OrderKind::Pickup, &items);

        assert_eq!(totals.subtotal, dec!(1.00));
        assert_eq!(totals.total, dec!(1.00));
    }

    #[test]
    fn test_service_charge_rounds_to_minor_units() {
        // 10.01 × 12.5% = 1.25125 → 1.25
        let kind = OrderKind::dine_in(Some(dec!(12.5))).unwrap();
        let totals = compute(&kind, &[item(1, 1, dec!(10.01))]);

        assert_eq!(totals.service_charge, dec!(1.25));
        assert_eq!(totals.total, dec!(11.26));
    }

    #[test]
    fn test_recalculation_is_idempotent() {
        let kind = OrderKind::dine_in(Some(dec!(10))).unwrap();
        let items = [item(1, 3, dec!(7.33)), item(2, 1, dec!(0.01))];

        let first = compute(&kind, &items);
        let second = compute(&kind, &items);
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_order_totals_zero() {
        let kind = OrderKind::dine_in(None).unwrap();
        let totals = compute(&kind, &[]);
        assert_eq!(totals, OrderTotals::ZERO);
    }

    #[test]
    fn test_total_invariant_holds() {
        let kind = OrderKind::dine_in(Some(dec!(13))).unwrap();
        let items = [item(1, 2, dec!(9.99)), item(2, 5, dec!(3.45))];
        let totals = compute(&kind, &items);

        assert_eq!(
            totals.total,
            totals.subtotal + totals.service_charge + totals.delivery_fee
        );
    }
}
