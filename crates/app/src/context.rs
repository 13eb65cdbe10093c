//! App Context

use std::sync::Arc;

use crate::{
    carts::{CartEvents, CartsService, HttpCartsService},
    config::StorefrontConfig,
    http::{ApiClient, TokenCell},
    orders::{HttpOrdersService, OrdersService},
    session::{HttpAuthService, Session, SessionFile},
};

/// Shared service wiring for the storefront client.
#[derive(Clone)]
pub struct AppContext {
    /// Cart adapter.
    pub carts: Arc<dyn CartsService>,
    /// Order adapter.
    pub orders: Arc<dyn OrdersService>,
    /// Auth session.
    pub session: Arc<Session>,
    /// Cart-changed broadcast channel.
    pub events: CartEvents,
}

impl AppContext {
    /// Build the context from configuration, restoring any persisted session.
    #[must_use]
    pub fn from_config(config: &StorefrontConfig) -> Self {
        let token = Arc::new(TokenCell::new());
        let api = ApiClient::new(config.api.base_url.clone(), Arc::clone(&token));

        let auth = Arc::new(HttpAuthService::new(api.clone()));
        let session = Session::restore(
            auth,
            token,
            SessionFile::new(&config.session.session_file),
        );

        Self {
            carts: Arc::new(HttpCartsService::new(api.clone())),
            orders: Arc::new(HttpOrdersService::new(api)),
            session: Arc::new(session),
            events: CartEvents::new(),
        }
    }
}
