//! Cart client: wire records, service adapter, reconciliation controller, and
//! the header count badge.

pub mod badge;
pub mod controller;
pub mod errors;
pub mod events;
mod records;
pub mod service;

pub use badge::CartBadge;
pub use controller::{CartController, CartPhase, MutationOutcome};
pub use errors::CartsServiceError;
pub use events::CartEvents;
pub use service::{CartsService, HttpCartsService, MockCartsService};
