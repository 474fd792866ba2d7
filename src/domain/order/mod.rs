// ============================================================================
// Order Domain - Business Logic for the Order Aggregate
// ============================================================================
//
// This module contains ALL order-specific code:
// - Value objects (ids, OrderKind, OrderStatus, OrderItem, OrderTotals)
// - Errors (OrderError enum)
// - Total calculation engine (totals::compute)
// - Aggregate (Order with guarded mutations)
//
// Orchestration and collaborator seams live in the service/ and store/
// modules; nothing here performs I/O.
//
// ============================================================================

pub mod aggregate;
pub mod errors;
pub mod totals;
pub mod value_objects;

// Re-export for convenience
pub use aggregate::*;
pub use errors::*;
pub use value_objects::*;
