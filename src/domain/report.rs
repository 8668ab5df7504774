//! Result aggregates produced by the trader and curator.

use std::collections::BTreeMap;

use uuid::Uuid;

use super::rarity::Rarity;

/// Aggregate of one trade run, built incrementally by the run loop.
#[derive(Debug, Clone)]
pub struct TradeReport {
    /// Run identifier, also stamped on the outbound document.
    pub run_id: Uuid,
    /// Counterpart the run sent items to.
    pub target: String,
    /// Whether the run ended by cancellation rather than exhausting the snapshot.
    pub cancelled: bool,
    per_rarity: BTreeMap<Rarity, u32>,
    total_sent: u32,
    sent_names: Vec<String>,
}

impl TradeReport {
    #[must_use]
    pub fn new(target: impl Into<String>) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            target: target.into(),
            cancelled: false,
            per_rarity: BTreeMap::new(),
            total_sent: 0,
            sent_names: Vec::new(),
        }
    }

    /// Record one accepted exchange.
    pub fn record_sent(&mut self, rarity: Rarity, name: impl Into<String>) {
        *self.per_rarity.entry(rarity).or_insert(0) += 1;
        self.total_sent += 1;
        self.sent_names.push(name.into());
    }

    /// Items sent for one tier so far.
    #[must_use]
    pub fn sent_for(&self, rarity: Rarity) -> u32 {
        self.per_rarity.get(&rarity).copied().unwrap_or(0)
    }

    /// Total items sent.
    #[must_use]
    pub fn total_sent(&self) -> u32 {
        self.total_sent
    }

    /// Per-tier counts, highest tier first.
    pub fn breakdown(&self) -> impl Iterator<Item = (Rarity, u32)> + '_ {
        self.per_rarity.iter().rev().map(|(r, n)| (*r, *n))
    }

    /// Names of sent items, in send order.
    #[must_use]
    pub fn sent_names(&self) -> &[String] {
        &self.sent_names
    }
}

/// Aggregate of one curation scan cycle.
#[derive(Debug, Clone)]
pub struct CurationReport {
    /// Effective threshold the cycle ran with.
    pub threshold: Rarity,
    per_rarity: BTreeMap<Rarity, u32>,
    marked_names: Vec<String>,
}

impl CurationReport {
    #[must_use]
    pub fn new(threshold: Rarity) -> Self {
        Self {
            threshold,
            per_rarity: BTreeMap::new(),
            marked_names: Vec::new(),
        }
    }

    /// Record one issued mark.
    pub fn record_marked(&mut self, rarity: Rarity, name: impl Into<String>) {
        *self.per_rarity.entry(rarity).or_insert(0) += 1;
        self.marked_names.push(name.into());
    }

    /// Total items marked this cycle.
    #[must_use]
    pub fn total_marked(&self) -> u32 {
        self.per_rarity.values().sum()
    }

    /// Per-tier counts, highest tier first.
    pub fn breakdown(&self) -> impl Iterator<Item = (Rarity, u32)> + '_ {
        self.per_rarity.iter().rev().map(|(r, n)| (*r, *n))
    }

    /// Names of marked items, in mark order.
    #[must_use]
    pub fn marked_names(&self) -> &[String] {
        &self.marked_names
    }
}
