//! Header cart-count badge.
//!
//! An independent read path from the reconciliation flow: the count is never
//! derived from mutations or decremented optimistically, it is re-fetched on
//! every signal. Logout zeroes it without a server call.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::warn;

use crate::{carts::service::CartsService, session::SessionPhase};

/// Cart unit count shown in header chrome.
pub struct CartBadge {
    carts: Arc<dyn CartsService>,
    session: watch::Receiver<SessionPhase>,
    cart_changes: watch::Receiver<u64>,
    count: u64,
}

impl CartBadge {
    /// Wire the badge to its signals.
    #[must_use]
    pub fn new(
        carts: Arc<dyn CartsService>,
        session: watch::Receiver<SessionPhase>,
        cart_changes: watch::Receiver<u64>,
    ) -> Self {
        Self {
            carts,
            session,
            cart_changes,
            count: 0,
        }
    }

    /// Latest known count.
    #[must_use]
    pub const fn count(&self) -> u64 {
        self.count
    }

    /// Apply any pending session or cart-changed signals.
    pub async fn poll(&mut self) {
        if self.session.has_changed().unwrap_or(false) {
            let phase = *self.session.borrow_and_update();

            match phase {
                SessionPhase::SignedOut => self.count = 0,
                // Deferred refresh: the phase only flips after the login
                // roundtrip settles, so this cannot race it.
                SessionPhase::SignedIn => self.refresh().await,
            }
        }

        if self.cart_changes.has_changed().unwrap_or(false) {
            let _revision = *self.cart_changes.borrow_and_update();
            self.refresh().await;
        }
    }

    /// Force a server roundtrip for the count.
    pub async fn refresh(&mut self) {
        match self.carts.cart_count().await {
            Ok(count) => self.count = count,
            // A stale badge is tolerable; the next signal retries.
            Err(error) => warn!("cart count refresh failed: {error}"),
        }
    }
}
