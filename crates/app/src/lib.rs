//! Storefront client: REST service adapters, an explicit auth session, and
//! the cart reconciliation flow.
//!
//! The flow's one correctness rule: after every mutating call the cart is
//! re-fetched from the server, because a quantity change can flip a line's
//! pricing tier across the MOQ boundary and recompute the whole summary.
//! Mutation responses are never installed as display state.

pub mod carts;
pub mod config;
pub mod context;
pub mod http;
pub mod logging;
pub mod notify;
pub mod orders;
pub mod session;
pub mod views;
