//! Cross-cutting services - the trade orchestrator, the curation scheduler,
//! and operator notices.

mod curator;
mod notifier;
mod trader;

pub use curator::{Curator, CuratorTiming, FavoriteTracker, MIN_THRESHOLD};
pub use notifier::{Event, LogNotifier, Notifier, NotifierRegistry, NullNotifier};
pub use trader::{TradeOptions, Trader};
