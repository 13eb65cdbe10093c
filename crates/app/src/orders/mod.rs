//! Order client: wire records and service adapter.

pub mod errors;
mod records;
pub mod service;

pub use errors::OrdersServiceError;
pub use service::{HttpOrdersService, MockOrdersService, OrdersService};
