//! Multi-tenant restaurant point-of-sale order engine.
//!
//! The core is the `Order`/`OrderItem` aggregate: its total-calculation
//! rules, lifecycle state machine and orchestrating service. Persistence,
//! catalog lookup, client validation and printing are collaborator traits;
//! in-memory implementations back the demo binary and the tests.

pub mod catalog;
pub mod clients;
pub mod domain;
pub mod error;
pub mod printing;
pub mod service;
pub mod store;

pub use error::ServiceError;
pub use service::{ItemRequest, OrderService};
