//! Quota-driven trade orchestrator.
//!
//! One run walks a point-in-time inventory snapshot in order and offers each
//! eligible item to the counterpart until its per-rarity quota is met, the
//! snapshot is exhausted, or the run is cancelled. Failed offers retry
//! indefinitely per item: in this domain a rejection is usually transient
//! contention with the counterpart, not a permanent refusal. Cancellation is
//! cooperative and observed at the top of every record iteration and every
//! retry attempt.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::app::ControlState;
use crate::catalog::ItemCatalog;
use crate::domain::{InventoryRecord, QuotaTable, TradeReport};
use crate::error::{Result, SessionError};
use crate::report::ReportEmitter;
use crate::service::notifier::{Event, NotifierRegistry};
use crate::session::{Player, TradeSession};

/// Wait applied after a successful reposition so the actor settles in place.
const POSITION_SETTLE: Duration = Duration::from_millis(400);

/// Per-run options supplied by the operator surface.
#[derive(Debug, Clone)]
pub struct TradeOptions {
    /// Pause between failed attempts for the same item. Zero disables the
    /// sleep; the loop still yields once per attempt so it stays cancellable.
    pub retry_delay: Duration,
    /// Skip records whose favorited flag is set.
    pub skip_favorited: bool,
    /// Reposition next to the counterpart before each attempt.
    pub reposition: bool,
}

impl Default for TradeOptions {
    fn default() -> Self {
        Self {
            retry_delay: Duration::from_secs(1),
            skip_favorited: false,
            reposition: true,
        }
    }
}

/// Outcome of the per-item send loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SendOutcome {
    Accepted,
    Cancelled,
}

/// The trade run orchestrator.
pub struct Trader {
    catalog: Arc<ItemCatalog>,
    session: Arc<dyn TradeSession>,
    notifiers: Arc<NotifierRegistry>,
    emitter: Arc<ReportEmitter>,
    state: Arc<ControlState>,
}

impl Trader {
    #[must_use]
    pub fn new(
        catalog: Arc<ItemCatalog>,
        session: Arc<dyn TradeSession>,
        notifiers: Arc<NotifierRegistry>,
        emitter: Arc<ReportEmitter>,
        state: Arc<ControlState>,
    ) -> Self {
        Self {
            catalog,
            session,
            notifiers,
            emitter,
            state,
        }
    }

    /// Run one trade against `target_name` under `quotas`.
    ///
    /// Run-level failures (unresolved counterpart, unavailable or empty
    /// initial snapshot) are surfaced as a [`Event::TradeAborted`] notice and
    /// returned as an error without sending anything. The active flag is
    /// cleared on every exit path.
    pub async fn run(
        &self,
        target_name: &str,
        quotas: &QuotaTable,
        options: &TradeOptions,
    ) -> Result<TradeReport> {
        self.state.clear_abort_reason();
        self.state.start_trading();
        let result = self.run_inner(target_name, quotas, options).await;
        self.state.stop_trading();
        result
    }

    async fn run_inner(
        &self,
        target_name: &str,
        quotas: &QuotaTable,
        options: &TradeOptions,
    ) -> Result<TradeReport> {
        let target = match self.resolve_target(target_name).await {
            Ok(player) => player,
            Err(err) => return Err(self.abort(target_name, err)),
        };

        let snapshot = match self.session.snapshot().await {
            Ok(records) if records.is_empty() => {
                return Err(self.abort(target_name, SessionError::EmptyInventory));
            }
            Ok(records) => records,
            Err(err) => {
                return Err(self.abort(
                    target_name,
                    SessionError::InventoryUnavailable(err.to_string()),
                ));
            }
        };

        let mut report = TradeReport::new(&target.name);
        self.notifiers.notify_all(Event::TradeStarted {
            target: target.name.clone(),
            records: snapshot.len(),
        });
        info!(
            run_id = %report.run_id,
            target = %target.name,
            records = snapshot.len(),
            "Trade run started"
        );

        for record in &snapshot {
            if !self.state.is_trading() {
                report.cancelled = true;
                break;
            }

            let descriptor = self.catalog.resolve(record.item_id);
            let quota = quotas.get(descriptor.rarity);
            if !quota.admits(report.sent_for(descriptor.rarity)) {
                debug!(
                    instance = %record.instance_id,
                    rarity = %descriptor.rarity,
                    "Quota does not admit item, skipping"
                );
                continue;
            }
            if options.skip_favorited && record.favorited {
                debug!(instance = %record.instance_id, "Favorited item, skipping");
                continue;
            }

            match self
                .send_until_accepted(&target, record, &descriptor.category, options)
                .await
            {
                SendOutcome::Accepted => {
                    info!(
                        instance = %record.instance_id,
                        item = %descriptor.name,
                        rarity = %descriptor.rarity,
                        "Exchange accepted"
                    );
                    report.record_sent(descriptor.rarity, descriptor.name);
                }
                SendOutcome::Cancelled => {
                    report.cancelled = true;
                    break;
                }
            }
        }

        self.notifiers.notify_all(Event::TradeCompleted {
            target: target.name.clone(),
            total_sent: report.total_sent(),
            cancelled: report.cancelled,
        });
        info!(
            run_id = %report.run_id,
            total_sent = report.total_sent(),
            cancelled = report.cancelled,
            "Trade run finished"
        );
        self.emitter.emit_trade(&report).await;

        Ok(report)
    }

    /// Offer one item until the counterpart accepts or the run is cancelled.
    async fn send_until_accepted(
        &self,
        target: &Player,
        record: &InventoryRecord,
        category: &str,
        options: &TradeOptions,
    ) -> SendOutcome {
        loop {
            if !self.state.is_trading() {
                return SendOutcome::Cancelled;
            }

            if options.reposition {
                match self.session.move_to(target.id).await {
                    Ok(()) => tokio::time::sleep(POSITION_SETTLE).await,
                    Err(err) => {
                        debug!(error = %err, "Reposition failed, skipping settle wait");
                    }
                }
            }

            match self
                .session
                .request_trade(target.id, &record.instance_id, category)
                .await
            {
                Ok(true) => return SendOutcome::Accepted,
                Ok(false) => {
                    debug!(instance = %record.instance_id, "Exchange declined, retrying");
                }
                Err(err) => {
                    warn!(
                        instance = %record.instance_id,
                        error = %err,
                        "Exchange request failed, retrying"
                    );
                }
            }

            if options.retry_delay.is_zero() {
                tokio::task::yield_now().await;
            } else {
                tokio::time::sleep(options.retry_delay).await;
            }
        }
    }

    async fn resolve_target(&self, name: &str) -> std::result::Result<Player, SessionError> {
        let local = self
            .session
            .local_player()
            .await
            .map_err(|err| SessionError::Unavailable(err.to_string()))?;
        let players = self
            .session
            .players()
            .await
            .map_err(|err| SessionError::Unavailable(err.to_string()))?;

        let Some(player) = players
            .into_iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
        else {
            return Err(SessionError::TargetNotFound { name: name.into() });
        };
        if player.id == local.id {
            return Err(SessionError::TargetIsSelf { name: player.name });
        }
        Ok(player)
    }

    fn abort(&self, target_name: &str, err: SessionError) -> crate::error::Error {
        self.state.set_abort_reason(err.to_string());
        self.notifiers.notify_all(Event::TradeAborted {
            target: target_name.to_string(),
            reason: err.to_string(),
        });
        err.into()
    }
}
