//! Cart-changed broadcast channel.

use std::sync::Arc;

use tokio::sync::watch;

/// Typed cart-changed signal.
///
/// The reconciliation flow bumps the revision after every mutating sequence;
/// header chrome subscribes and re-fetches the count. A typed channel with a
/// defined publisher, instead of a stringly-named global event.
#[derive(Debug, Clone)]
pub struct CartEvents {
    revision: Arc<watch::Sender<u64>>,
}

impl CartEvents {
    /// A fresh channel at revision zero.
    #[must_use]
    pub fn new() -> Self {
        let (revision, _) = watch::channel(0);

        Self {
            revision: Arc::new(revision),
        }
    }

    /// Announce that the server-side cart changed.
    pub fn publish(&self) {
        self.revision.send_modify(|revision| *revision += 1);
    }

    /// Subscribe to change announcements.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }
}

impl Default for CartEvents {
    fn default() -> Self {
        Self::new()
    }
}
