use async_trait::async_trait;

use crate::domain::order::Order;

// ============================================================================
// Printing Collaborator - Fire-and-Forget Ticket Output
// ============================================================================
//
// A print failure is reported as `false` and logged by the caller; it never
// rolls back or blocks an order mutation.
//
// ============================================================================

#[async_trait]
pub trait OrderPrinter: Send + Sync {
    /// Render and dispatch a kitchen/receipt ticket for the order.
    async fn print(&self, order: &Order) -> bool;
}

/// Printer that renders the ticket into the application log, for environments
/// without a physical print queue.
#[derive(Default)]
pub struct LogPrinter;

impl LogPrinter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl OrderPrinter for LogPrinter {
    async fn print(&self, order: &Order) -> bool {
        tracing::info!(
            order_id = %order.id,
            tenant_id = %order.tenant_id,
            item_count = order.items.len(),
            total = %order.totals.total,
            "printing order ticket"
        );

        for item in &order.items {
            tracing::info!(
                order_id = %order.id,
                product_id = %item.product_id,
                quantity = item.quantity,
                unit_price = %item.unit_price,
                line_total = %item.line_total(),
                notes = ?item.notes,
                "ticket line"
            );
        }

        true
    }
}
