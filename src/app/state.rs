//! Shared activation state.

use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::RwLock;

/// Activation flags shared between tasks.
///
/// Each flag has exactly one writer task plus the operator surface; readers
/// observe toggles at checkpoint granularity, so last-write-wins is
/// acceptable. Tasks receive this object by reference at construction and go
/// through the accessors, never raw fields.
#[derive(Debug, Default)]
pub struct ControlState {
    trading: AtomicBool,
    curating: AtomicBool,
    /// Why the last trade run aborted, if it did.
    abort_reason: RwLock<Option<String>>,
}

impl ControlState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a trade run is active.
    pub fn is_trading(&self) -> bool {
        self.trading.load(Ordering::SeqCst)
    }

    /// Mark a trade run active. Called by the run loop at entry.
    pub fn start_trading(&self) {
        self.trading.store(true, Ordering::SeqCst);
    }

    /// Request cooperative cancellation of the active trade run.
    ///
    /// The run observes this at its next checkpoint, not immediately; a
    /// remote call already in flight completes first.
    pub fn stop_trading(&self) {
        self.trading.store(false, Ordering::SeqCst);
    }

    /// Whether the curation scheduler should scan on its next tick.
    pub fn is_curating(&self) -> bool {
        self.curating.load(Ordering::SeqCst)
    }

    /// Toggle curation. Checked at tick fire-time, so a toggle-off between
    /// ticks is honored.
    pub fn set_curating(&self, active: bool) {
        self.curating.store(active, Ordering::SeqCst);
    }

    /// Record why a trade run aborted.
    pub fn set_abort_reason(&self, reason: impl Into<String>) {
        *self.abort_reason.write() = Some(reason.into());
    }

    /// Clear the abort reason. Called when a new run starts.
    pub fn clear_abort_reason(&self) {
        *self.abort_reason.write() = None;
    }

    /// Why the last trade run aborted, if it did.
    pub fn abort_reason(&self) -> Option<String> {
        self.abort_reason.read().clone()
    }
}
