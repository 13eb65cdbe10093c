//! User-facing notification and confirmation seams.
//!
//! The reconciliation flow surfaces failures as dismissible notices and gates
//! destructive actions behind a blocking confirmation. Both are injected as
//! traits so views and tests substitute their own.

use std::sync::{Mutex, MutexGuard};

use mockall::automock;

/// Notice severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Informational, e.g. "Item added to your cart".
    Info,
    /// Recoverable, e.g. "Sign in to manage your cart".
    Warning,
    /// A failed operation.
    Error,
}

/// A user-visible, non-blocking notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// How loudly to surface it.
    pub severity: Severity,
    /// Message text, preferring the server's wording when available.
    pub message: String,
}

impl Notice {
    /// An informational notice.
    #[must_use]
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Info,
            message: message.into(),
        }
    }

    /// A warning notice.
    #[must_use]
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }

    /// An error notice.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }
}

/// Sink for user-visible notices.
#[automock]
pub trait Notifier: Send + Sync {
    /// Surface a notice to the user.
    fn notify(&self, notice: Notice);
}

/// Blocking yes/no confirmation for destructive actions.
#[automock]
pub trait ConfirmPrompt: Send + Sync {
    /// Ask the user; `true` means proceed.
    fn confirm(&self, prompt: &str) -> bool;
}

/// Collects notices in memory, for tests and headless embedding.
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl MemoryNotifier {
    /// An empty collector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take everything recorded so far.
    pub fn drain(&self) -> Vec<Notice> {
        std::mem::take(&mut *self.guard())
    }

    /// Messages recorded so far, oldest first.
    pub fn messages(&self) -> Vec<String> {
        self.guard()
            .iter()
            .map(|notice| notice.message.clone())
            .collect()
    }

    fn guard(&self) -> MutexGuard<'_, Vec<Notice>> {
        match self.notices.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, notice: Notice) {
        self.guard().push(notice);
    }
}

/// Confirmation that always accepts; used for `--yes` flows.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysConfirm;

impl ConfirmPrompt for AlwaysConfirm {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_notifier_records_in_order() {
        let notifier = MemoryNotifier::new();

        notifier.notify(Notice::info("first"));
        notifier.notify(Notice::error("second"));

        assert_eq!(notifier.messages(), vec!["first", "second"]);

        let drained = notifier.drain();
        assert_eq!(drained.len(), 2, "drain should hand back every notice");
        assert_eq!(drained[0].severity, Severity::Info);
        assert!(notifier.messages().is_empty());
    }
}
