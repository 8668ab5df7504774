//! Per-rarity send quotas.

use std::collections::HashMap;

use tracing::warn;

use super::rarity::Rarity;

/// Quota for one rarity tier, decided once at configuration-read time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Quota {
    /// Send at most this many items. Always positive.
    Capped(u32),
    /// No cap for this tier.
    Unlimited,
    /// Tier is not sent at all.
    #[default]
    Excluded,
}

impl Quota {
    /// Parse an operator-supplied quota value.
    ///
    /// `"ALL"` (any case) means unlimited; a positive integer is a cap;
    /// zero, negative, or unparsable input excludes the tier.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case("all") {
            return Quota::Unlimited;
        }
        match raw.parse::<i64>() {
            Ok(n) if n > 0 => Quota::Capped(n as u32),
            _ => Quota::Excluded,
        }
    }

    /// Whether another item may be sent given `sent` already went out.
    #[must_use]
    pub fn admits(&self, sent: u32) -> bool {
        match self {
            Quota::Capped(cap) => sent < *cap,
            Quota::Unlimited => true,
            Quota::Excluded => false,
        }
    }
}

/// Per-rarity quota table. Tiers without an entry are excluded.
#[derive(Debug, Clone, Default)]
pub struct QuotaTable {
    quotas: HashMap<Rarity, Quota>,
}

impl QuotaTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the quota for a tier.
    pub fn set(&mut self, rarity: Rarity, quota: Quota) {
        self.quotas.insert(rarity, quota);
    }

    /// Quota for a tier; missing entries are [`Quota::Excluded`].
    #[must_use]
    pub fn get(&self, rarity: Rarity) -> Quota {
        self.quotas.get(&rarity).copied().unwrap_or_default()
    }

    /// True when no tier admits any item.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.quotas.values().all(|q| *q == Quota::Excluded)
    }

    /// Build a table from raw operator input keyed by rarity name.
    ///
    /// Unrecognized rarity names are skipped with a warning rather than
    /// failing the whole table.
    #[must_use]
    pub fn from_raw(raw: &HashMap<String, String>) -> Self {
        let mut table = Self::new();
        for (name, value) in raw {
            let rarity = Rarity::parse(name);
            if rarity == Rarity::Unknown {
                warn!(rarity = %name, "Unknown rarity in quota table, skipping");
                continue;
            }
            table.set(rarity, Quota::parse(value));
        }
        table
    }
}
