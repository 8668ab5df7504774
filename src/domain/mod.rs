//! Session-agnostic domain types.

mod ids;
mod inventory;
mod item;
mod quota;
mod rarity;
mod report;

pub use ids::{InstanceId, ItemId, PlayerId};
pub use inventory::InventoryRecord;
pub use item::ItemDescriptor;
pub use quota::{Quota, QuotaTable};
pub use rarity::Rarity;
pub use report::{CurationReport, TradeReport};
