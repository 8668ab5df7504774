//! Item catalog - classifies item ids into name, category, rarity, and value.
//!
//! The catalog is built once at startup from a JSON dump of the game's item
//! registry and never mutated afterwards. Lookups for ids missing from the
//! dump resolve to a sentinel descriptor instead of failing.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, info};

use crate::domain::{ItemDescriptor, ItemId, Rarity};
use crate::error::CatalogError;

/// One raw registry entry as found in the dump. Everything but `id` is
/// optional; entries without an id are skipped at load time.
#[derive(Debug, Deserialize)]
struct RawEntry {
    id: Option<u64>,
    name: Option<String>,
    #[serde(rename = "type")]
    kind: Option<String>,
    rarity: Option<String>,
    tier: Option<u8>,
    #[serde(alias = "sellPrice")]
    sell_price: Option<u64>,
}

impl RawEntry {
    fn rarity(&self) -> Rarity {
        if let Some(name) = &self.rarity {
            let parsed = Rarity::parse(name);
            if parsed != Rarity::Unknown {
                return parsed;
            }
        }
        match self.tier {
            Some(tier) => Rarity::from_tier(tier),
            None => Rarity::Unknown,
        }
    }
}

/// Immutable item classifier keyed by item id.
#[derive(Debug, Default)]
pub struct ItemCatalog {
    items: HashMap<ItemId, ItemDescriptor>,
}

impl ItemCatalog {
    /// An empty catalog. Every lookup resolves to the sentinel.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load the catalog from a JSON dump.
    pub fn load<P: AsRef<Path>>(path: P) -> std::result::Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(CatalogError::ReadFile)?;
        let entries: Vec<RawEntry> =
            serde_json::from_str(&content).map_err(CatalogError::Parse)?;

        let mut items = HashMap::with_capacity(entries.len());
        let mut skipped = 0usize;
        for entry in entries {
            let Some(id) = entry.id else {
                skipped += 1;
                continue;
            };
            let id = ItemId::new(id);
            let rarity = entry.rarity();
            items.insert(
                id,
                ItemDescriptor {
                    id,
                    name: entry.name.unwrap_or_else(|| "Unknown".into()),
                    category: entry.kind.unwrap_or_else(|| "Unknown".into()),
                    rarity,
                    value: entry.sell_price.unwrap_or(0),
                },
            );
        }

        if skipped > 0 {
            debug!(skipped, "Catalog entries without an id skipped");
        }
        info!(items = items.len(), "Item catalog loaded");

        Ok(Self { items })
    }

    /// Resolve an item id to its descriptor. Never fails; unknown ids get
    /// the `{Unknown, Unknown, Unknown, 0}` sentinel.
    #[must_use]
    pub fn resolve(&self, id: ItemId) -> ItemDescriptor {
        self.items
            .get(&id)
            .cloned()
            .unwrap_or_else(|| ItemDescriptor::unknown(id))
    }

    /// Number of classified items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when no entries were loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
