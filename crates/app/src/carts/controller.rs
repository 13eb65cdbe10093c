//! Cart reconciliation flow.
//!
//! The controller owns a view's cart state and walks it through
//! `Idle → Loading → Ready → Mutating → Ready'`. Its one correctness rule:
//! after every mutating call the cart is re-fetched, unconditionally, because
//! the server may have flipped a line's pricing tier across the MOQ boundary
//! and recomputed the whole summary. The doubled roundtrip per action is the
//! price of never displaying a stale tier or total.

use std::sync::{
    Arc, RwLock, RwLockReadGuard, RwLockWriteGuard,
    atomic::{AtomicBool, Ordering},
};

use storefront::{
    cart::{CartSnapshot, LineId},
    product::ProductId,
};
use tracing::debug;

use crate::{
    carts::{errors::CartsServiceError, events::CartEvents, service::CartsService},
    notify::{ConfirmPrompt, Notice, Notifier},
    session::Session,
};

/// Where the flow currently is, for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartPhase {
    /// No session; nothing fetched.
    Idle,
    /// Initial fetch in flight.
    Loading,
    /// A server snapshot is installed.
    Ready,
    /// A mutating sequence is in flight; mutating controls are disabled.
    Mutating,
    /// The initial fetch failed; the view shows an empty cart.
    Error,
}

/// What happened to a mutating action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationOutcome {
    /// The mutation was applied server-side.
    Applied,
    /// Dropped: another mutating sequence was in flight. Not queued.
    Dropped,
    /// Refused: no session. No network call was made.
    Denied,
    /// Refused client-side (e.g. unknown line). No network call was made.
    Rejected,
    /// The user declined the confirmation prompt.
    Cancelled,
    /// The adapter failed; the last good snapshot was restored.
    Failed,
}

enum CartState {
    Idle,
    Loading,
    Ready(CartSnapshot),
    Mutating(CartSnapshot),
    Error(CartSnapshot),
}

impl CartState {
    fn phase(&self) -> CartPhase {
        match self {
            Self::Idle => CartPhase::Idle,
            Self::Loading => CartPhase::Loading,
            Self::Ready(_) => CartPhase::Ready,
            Self::Mutating(_) => CartPhase::Mutating,
            Self::Error(_) => CartPhase::Error,
        }
    }

    fn display(&self) -> CartSnapshot {
        match self {
            Self::Idle | Self::Loading => CartSnapshot::empty(),
            Self::Ready(snapshot) | Self::Mutating(snapshot) | Self::Error(snapshot) => {
                snapshot.clone()
            }
        }
    }
}

/// Releases the `updating` flag when a mutating sequence settles, on every
/// path out.
struct UpdatingGuard<'a>(&'a AtomicBool);

impl Drop for UpdatingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// View-level cart state machine: fetch → mutate → refetch.
pub struct CartController {
    carts: Arc<dyn CartsService>,
    session: Arc<Session>,
    notifier: Arc<dyn Notifier>,
    confirm: Arc<dyn ConfirmPrompt>,
    events: CartEvents,
    state: RwLock<CartState>,
    updating: AtomicBool,
}

impl CartController {
    /// Wire a controller to its collaborators.
    #[must_use]
    pub fn new(
        carts: Arc<dyn CartsService>,
        session: Arc<Session>,
        notifier: Arc<dyn Notifier>,
        confirm: Arc<dyn ConfirmPrompt>,
        events: CartEvents,
    ) -> Self {
        Self {
            carts,
            session,
            notifier,
            confirm,
            events,
            state: RwLock::new(CartState::Idle),
            updating: AtomicBool::new(false),
        }
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> CartPhase {
        self.read_state().phase()
    }

    /// The snapshot the view should render; empty until a load succeeds.
    #[must_use]
    pub fn snapshot(&self) -> CartSnapshot {
        self.read_state().display()
    }

    /// Whether a mutating sequence is in flight.
    #[must_use]
    pub fn is_updating(&self) -> bool {
        self.updating.load(Ordering::Acquire)
    }

    /// Initial load, also used when the session becomes present.
    ///
    /// Without a session the cart stays idle and renders empty. A failed
    /// fetch surfaces a notice and falls back to the empty cart rather than
    /// blocking the view.
    pub async fn start(&self) {
        if !self.session.is_signed_in() {
            self.set_state(CartState::Idle);
            return;
        }

        self.set_state(CartState::Loading);

        match self.carts.get_cart().await {
            Ok(snapshot) => self.set_state(CartState::Ready(snapshot)),
            Err(error) => {
                self.notifier
                    .notify(Notice::error(format!("Could not load your cart: {error}")));
                self.set_state(CartState::Error(CartSnapshot::empty()));
            }
        }
    }

    /// Drop all cart state; used when the session ends.
    pub fn reset(&self) {
        self.set_state(CartState::Idle);
    }

    /// Add `quantity` units of a product.
    pub async fn add(&self, product_id: &ProductId, quantity: u32) -> MutationOutcome {
        let (guard, last_good) = match self.begin() {
            Ok(begun) => begun,
            Err(outcome) => return outcome,
        };

        let result = self.carts.add_to_cart(product_id, quantity).await;

        self.finish(guard, last_good, result.map(drop), "Item added to your cart")
            .await
    }

    /// Raise a line's quantity by one.
    pub async fn increment(&self, line_id: &LineId) -> MutationOutcome {
        let (guard, last_good) = match self.begin() {
            Ok(begun) => begun,
            Err(outcome) => return outcome,
        };

        let Some(line) = last_good.line(line_id).cloned() else {
            return self.reject_unknown_line(guard, last_good);
        };
        let quantity = line.quantity.saturating_add(1);

        let result = self.carts.update_item(line_id, quantity).await;

        self.finish(guard, last_good, result.map(drop), "Cart updated")
            .await
    }

    /// Lower a line's quantity by one.
    ///
    /// Dropping below one removes the line; an update with quantity zero is
    /// never sent.
    pub async fn decrement(&self, line_id: &LineId) -> MutationOutcome {
        let (guard, last_good) = match self.begin() {
            Ok(begun) => begun,
            Err(outcome) => return outcome,
        };

        let Some(line) = last_good.line(line_id).cloned() else {
            return self.reject_unknown_line(guard, last_good);
        };
        let quantity = line.quantity;
        let name = line.product.name;

        if quantity <= 1 {
            let result = self.carts.remove_item(line_id).await;

            return self
                .finish(
                    guard,
                    last_good,
                    result.map(drop),
                    &format!("Removed {name} from your cart"),
                )
                .await;
        }

        let result = self.carts.update_item(line_id, quantity - 1).await;

        self.finish(guard, last_good, result.map(drop), "Cart updated")
            .await
    }

    /// Set a line's quantity outright; zero removes the line.
    pub async fn set_quantity(&self, line_id: &LineId, quantity: u32) -> MutationOutcome {
        let (guard, last_good) = match self.begin() {
            Ok(begun) => begun,
            Err(outcome) => return outcome,
        };

        let Some(line) = last_good.line(line_id).cloned() else {
            return self.reject_unknown_line(guard, last_good);
        };
        let name = line.product.name;

        if quantity < 1 {
            let result = self.carts.remove_item(line_id).await;

            return self
                .finish(
                    guard,
                    last_good,
                    result.map(drop),
                    &format!("Removed {name} from your cart"),
                )
                .await;
        }

        let result = self.carts.update_item(line_id, quantity).await;

        self.finish(guard, last_good, result.map(drop), "Cart updated")
            .await
    }

    /// Remove a line.
    pub async fn remove(&self, line_id: &LineId) -> MutationOutcome {
        let (guard, last_good) = match self.begin() {
            Ok(begun) => begun,
            Err(outcome) => return outcome,
        };

        let Some(line) = last_good.line(line_id).cloned() else {
            return self.reject_unknown_line(guard, last_good);
        };
        let name = line.product.name;

        let result = self.carts.remove_item(line_id).await;

        self.finish(
            guard,
            last_good,
            result.map(drop),
            &format!("Removed {name} from your cart"),
        )
        .await
    }

    /// Remove every line, after an explicit confirmation.
    ///
    /// Clearing is the one action gated by a blocking confirmation: unlike a
    /// quantity change it cannot be undone by re-adding, since line state is
    /// lost, not just counts.
    pub async fn clear(&self) -> MutationOutcome {
        if !self.ensure_session() {
            return MutationOutcome::Denied;
        }

        if !self.confirm.confirm("Remove every item from your cart?") {
            return MutationOutcome::Cancelled;
        }

        let (guard, last_good) = match self.acquire() {
            Ok(begun) => begun,
            Err(outcome) => return outcome,
        };

        let result = self.carts.clear_cart().await;

        self.finish(guard, last_good, result, "Cart cleared").await
    }

    fn ensure_session(&self) -> bool {
        if self.session.is_signed_in() {
            return true;
        }

        self.notifier
            .notify(Notice::warning("Sign in to manage your cart"));

        false
    }

    fn begin(&self) -> Result<(UpdatingGuard<'_>, CartSnapshot), MutationOutcome> {
        if !self.ensure_session() {
            return Err(MutationOutcome::Denied);
        }

        self.acquire()
    }

    fn acquire(&self) -> Result<(UpdatingGuard<'_>, CartSnapshot), MutationOutcome> {
        if self
            .updating
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            // Second click while a sequence is in flight: dropped, not queued.
            debug!("mutating action dropped; a sequence is already in flight");
            return Err(MutationOutcome::Dropped);
        }

        let guard = UpdatingGuard(&self.updating);
        let last_good = self.read_state().display();
        self.set_state(CartState::Mutating(last_good.clone()));

        Ok((guard, last_good))
    }

    fn reject_unknown_line(
        &self,
        guard: UpdatingGuard<'_>,
        last_good: CartSnapshot,
    ) -> MutationOutcome {
        self.notifier
            .notify(Notice::warning("That item is no longer in your cart"));
        self.set_state(CartState::Ready(last_good));
        drop(guard);

        MutationOutcome::Rejected
    }

    /// Complete a mutating sequence: refetch on success, revert on failure.
    async fn finish(
        &self,
        guard: UpdatingGuard<'_>,
        last_good: CartSnapshot,
        mutation: Result<(), CartsServiceError>,
        success_notice: &str,
    ) -> MutationOutcome {
        if let Err(error) = mutation {
            self.notifier
                .notify(Notice::error(format!("Could not update your cart: {error}")));
            self.set_state(CartState::Ready(last_good));
            drop(guard);

            return MutationOutcome::Failed;
        }

        // Fetch-after-write: display state comes from a fresh snapshot, never
        // from the mutation response.
        match self.carts.get_cart().await {
            Ok(snapshot) => {
                self.set_state(CartState::Ready(snapshot));
                self.notifier.notify(Notice::info(success_notice));
            }
            Err(error) => {
                self.notifier.notify(Notice::error(format!(
                    "Cart updated, but refreshing it failed: {error}"
                )));
                self.set_state(CartState::Ready(last_good));
            }
        }

        drop(guard);

        // The server-side cart changed whether or not the refetch landed.
        self.events.publish();

        MutationOutcome::Applied
    }

    fn set_state(&self, next: CartState) {
        *self.write_state() = next;
    }

    fn read_state(&self) -> RwLockReadGuard<'_, CartState> {
        match self.state.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, CartState> {
        match self.state.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
