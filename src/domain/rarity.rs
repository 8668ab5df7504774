//! Rarity tiers and their ordering.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Ordered classification of an item's scarcity.
///
/// `Unknown` sorts below every named tier so unclassified items never pass
/// a rarity threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Unknown,
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
    Mythic,
    Secret,
}

impl Rarity {
    /// Every named tier, lowest to highest. Excludes `Unknown`.
    pub const NAMED: [Rarity; 7] = [
        Rarity::Common,
        Rarity::Uncommon,
        Rarity::Rare,
        Rarity::Epic,
        Rarity::Legendary,
        Rarity::Mythic,
        Rarity::Secret,
    ];

    /// Numeric rank used for threshold comparisons. `Unknown` is 0.
    #[must_use]
    pub fn rank(&self) -> u8 {
        match self {
            Rarity::Unknown => 0,
            Rarity::Common => 1,
            Rarity::Uncommon => 2,
            Rarity::Rare => 3,
            Rarity::Epic => 4,
            Rarity::Legendary => 5,
            Rarity::Mythic => 6,
            Rarity::Secret => 7,
        }
    }

    /// Map a catalog tier number to a rarity. Out-of-range tiers are `Unknown`.
    #[must_use]
    pub fn from_tier(tier: u8) -> Self {
        match tier {
            1 => Rarity::Common,
            2 => Rarity::Uncommon,
            3 => Rarity::Rare,
            4 => Rarity::Epic,
            5 => Rarity::Legendary,
            6 => Rarity::Mythic,
            7 => Rarity::Secret,
            _ => Rarity::Unknown,
        }
    }

    /// Parse a rarity name, case-insensitive. Unrecognized names are `Unknown`.
    #[must_use]
    pub fn parse(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "common" => Rarity::Common,
            "uncommon" => Rarity::Uncommon,
            "rare" => Rarity::Rare,
            "epic" => Rarity::Epic,
            "legendary" => Rarity::Legendary,
            "mythic" => Rarity::Mythic,
            "secret" => Rarity::Secret,
            _ => Rarity::Unknown,
        }
    }

    /// Human-readable tier label.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Rarity::Unknown => "Unknown",
            Rarity::Common => "Common",
            Rarity::Uncommon => "Uncommon",
            Rarity::Rare => "Rare",
            Rarity::Epic => "Epic",
            Rarity::Legendary => "Legendary",
            Rarity::Mythic => "Mythic",
            Rarity::Secret => "Secret",
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
