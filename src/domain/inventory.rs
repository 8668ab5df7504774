//! Point-in-time inventory records.

use serde::Deserialize;

use super::ids::{InstanceId, ItemId};

/// One owned instance of an item, as read from a snapshot.
///
/// Records are transient: they are read fresh on every snapshot and are not
/// owned by any component beyond the call that requested them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InventoryRecord {
    pub item_id: ItemId,
    pub instance_id: InstanceId,
    pub favorited: bool,
}

impl InventoryRecord {
    /// Create a new record.
    pub fn new(item_id: ItemId, instance_id: impl Into<InstanceId>, favorited: bool) -> Self {
        Self {
            item_id,
            instance_id: instance_id.into(),
            favorited,
        }
    }
}
