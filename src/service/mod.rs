pub mod order_service;
pub mod queries;

pub use order_service::{ItemRequest, OrderService};
