//! Rarity-threshold curation scheduler.
//!
//! While active, a fixed-period tick scans the current inventory snapshot and
//! auto-marks items at or above the effective rarity threshold. The threshold
//! is clamped so the scheduler never marks below Mythic, whatever the
//! configuration says.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashSet;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

use crate::app::ControlState;
use crate::catalog::ItemCatalog;
use crate::domain::{CurationReport, InstanceId, Rarity};
use crate::report::ReportEmitter;
use crate::service::notifier::{Event, NotifierRegistry};
use crate::session::CurationSession;

/// Lowest tier the scheduler will ever auto-mark.
pub const MIN_THRESHOLD: Rarity = Rarity::Mythic;

/// Process-lifetime set of instance ids already marked this session.
///
/// Grows monotonically and is never persisted; it only exists to avoid
/// redundant mark requests across cycles.
#[derive(Debug, Default)]
pub struct FavoriteTracker {
    seen: DashSet<InstanceId>,
}

impl FavoriteTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an instance id. Returns `true` only for first-seen ids.
    pub fn remember(&self, instance: InstanceId) -> bool {
        self.seen.insert(instance)
    }

    #[must_use]
    pub fn contains(&self, instance: &InstanceId) -> bool {
        self.seen.contains(instance)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}

/// Timing knobs for the scheduler.
#[derive(Debug, Clone)]
pub struct CuratorTiming {
    /// Interval between scan cycles.
    pub period: Duration,
    /// Pause between consecutive mark requests within a cycle.
    pub mark_delay: Duration,
}

impl Default for CuratorTiming {
    fn default() -> Self {
        Self {
            period: Duration::from_secs(10),
            mark_delay: Duration::from_millis(300),
        }
    }
}

/// The curation scheduler.
pub struct Curator {
    catalog: Arc<ItemCatalog>,
    session: Arc<dyn CurationSession>,
    notifiers: Arc<NotifierRegistry>,
    emitter: Arc<ReportEmitter>,
    state: Arc<ControlState>,
    tracker: FavoriteTracker,
    threshold: Rarity,
    timing: CuratorTiming,
}

impl Curator {
    /// Create a scheduler. `threshold` is clamped up to [`MIN_THRESHOLD`].
    #[must_use]
    pub fn new(
        catalog: Arc<ItemCatalog>,
        session: Arc<dyn CurationSession>,
        notifiers: Arc<NotifierRegistry>,
        emitter: Arc<ReportEmitter>,
        state: Arc<ControlState>,
        threshold: Rarity,
        timing: CuratorTiming,
    ) -> Self {
        let effective = if threshold.rank() < MIN_THRESHOLD.rank() {
            warn!(
                configured = %threshold,
                effective = %MIN_THRESHOLD,
                "Curation threshold clamped to minimum supported tier"
            );
            MIN_THRESHOLD
        } else {
            threshold
        };

        Self {
            catalog,
            session,
            notifiers,
            emitter,
            state,
            tracker: FavoriteTracker::new(),
            threshold: effective,
            timing,
        }
    }

    /// Effective threshold after clamping.
    #[must_use]
    pub fn threshold(&self) -> Rarity {
        self.threshold
    }

    /// Tick forever, scanning on each fire while curation is active.
    ///
    /// The activation flag is checked at fire-time, so toggling off between
    /// ticks makes the next fire a no-op.
    pub async fn run(self: Arc<Self>) {
        let mut ticker = tokio::time::interval(self.timing.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            if !self.state.is_curating() {
                continue;
            }
            self.run_cycle().await;
        }
    }

    /// Run a single scan cycle. Returns the number of items marked.
    pub async fn run_cycle(&self) -> u32 {
        let snapshot = match self.session.snapshot().await {
            Ok(records) => records,
            Err(err) => {
                warn!(error = %err, "Inventory snapshot unavailable, skipping cycle");
                return 0;
            }
        };

        let mut report = CurationReport::new(self.threshold);
        for record in &snapshot {
            let descriptor = self.catalog.resolve(record.item_id);
            if descriptor.rarity.rank() < self.threshold.rank() {
                continue;
            }
            if self.tracker.contains(&record.instance_id) {
                continue;
            }
            // Authoritative per-item check; a failed lookup counts as not
            // favorited and the item may be re-marked after a transient error.
            let already = self
                .session
                .is_favorited(&record.instance_id)
                .await
                .unwrap_or(false);
            if already {
                debug!(instance = %record.instance_id, "Already favorited, skipping");
                continue;
            }

            self.session.mark(&record.instance_id).await;
            self.tracker.remember(record.instance_id.clone());
            debug!(
                instance = %record.instance_id,
                item = %descriptor.name,
                rarity = %descriptor.rarity,
                "Mark issued"
            );
            report.record_marked(descriptor.rarity, descriptor.name);

            if !self.timing.mark_delay.is_zero() {
                tokio::time::sleep(self.timing.mark_delay).await;
            }
        }

        let marked = report.total_marked();
        if marked > 0 {
            self.notifiers.notify_all(Event::CurationSummary {
                marked,
                threshold: self.threshold.label().into(),
            });
            self.emitter.emit_curation(&report).await;
        }
        marked
    }
}
