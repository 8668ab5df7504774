//! Operator-facing notices.
//!
//! Run-level outcomes are surfaced through the [`Notifier`] trait rather
//! than errors that unwind past the run. Notifications are fire-and-forget.

use tracing::{info, warn};

/// Events that can trigger notifications.
#[derive(Debug, Clone)]
pub enum Event {
    /// A trade run started against a resolved counterpart.
    TradeStarted {
        target: String,
        records: usize,
    },
    /// A trade run finished, by exhaustion or cancellation.
    TradeCompleted {
        target: String,
        total_sent: u32,
        cancelled: bool,
    },
    /// A trade run aborted before sending anything.
    TradeAborted {
        target: String,
        reason: String,
    },
    /// A curation cycle marked at least one item.
    CurationSummary {
        marked: u32,
        threshold: String,
    },
}

/// Trait for notification handlers.
///
/// Implementations must be thread-safe and `notify` should return quickly;
/// slow I/O belongs in a spawned task.
pub trait Notifier: Send + Sync {
    /// Handle an event.
    fn notify(&self, event: Event);
}

/// Registry of notifiers (composite pattern).
///
/// Broadcasts events to all registered notifiers.
pub struct NotifierRegistry {
    notifiers: Vec<Box<dyn Notifier>>,
}

impl NotifierRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self { notifiers: vec![] }
    }

    /// Register a notifier.
    pub fn register(&mut self, notifier: Box<dyn Notifier>) {
        self.notifiers.push(notifier);
    }

    /// Notify all registered notifiers.
    pub fn notify_all(&self, event: Event) {
        for notifier in &self.notifiers {
            notifier.notify(event.clone());
        }
    }

    /// Number of registered notifiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.notifiers.len()
    }

    /// Check if registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notifiers.is_empty()
    }
}

impl Default for NotifierRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// A no-op notifier for tests or when notices are disabled.
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _event: Event) {}
}

/// A logging notifier that surfaces events via tracing.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, event: Event) {
        match event {
            Event::TradeStarted { target, records } => {
                info!(target = %target, records, "Trade run started");
            }
            Event::TradeCompleted {
                target,
                total_sent,
                cancelled,
            } => {
                info!(target = %target, total_sent, cancelled, "Trade run completed");
            }
            Event::TradeAborted { target, reason } => {
                warn!(target = %target, reason = %reason, "Trade run aborted");
            }
            Event::CurationSummary { marked, threshold } => {
                info!(marked, threshold = %threshold, "Curation cycle marked items");
            }
        }
    }
}
