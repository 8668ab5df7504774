//! Classified item metadata.

use super::ids::ItemId;
use super::rarity::Rarity;

/// Immutable descriptor for a catalog item, built once at catalog load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemDescriptor {
    pub id: ItemId,
    pub name: String,
    pub category: String,
    pub rarity: Rarity,
    /// Sell price in coins. Zero for unknown items.
    pub value: u64,
}

impl ItemDescriptor {
    /// Sentinel descriptor returned for ids missing from the catalog.
    #[must_use]
    pub fn unknown(id: ItemId) -> Self {
        Self {
            id,
            name: "Unknown".into(),
            category: "Unknown".into(),
            rarity: Rarity::Unknown,
            value: 0,
        }
    }
}
