//! Session port definitions.
//!
//! These traits define the interface the live game session must provide.
//! Invoke-style capabilities return a `Result`; notify-style capabilities
//! return nothing and the adapter swallows transport failures.

use async_trait::async_trait;

use crate::domain::{InstanceId, InventoryRecord, PlayerId};
use crate::error::Result;

/// A player present in the live session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
}

impl Player {
    pub fn new(id: impl Into<PlayerId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Presence metadata used to resolve a trade counterpart.
#[async_trait]
pub trait SessionInfo: Send + Sync {
    /// All players currently present in the session.
    async fn players(&self) -> Result<Vec<Player>>;

    /// The local player this process acts as.
    async fn local_player(&self) -> Result<Player>;
}

/// Read-only, point-in-time access to the owned inventory.
#[async_trait]
pub trait InventorySource: Send + Sync {
    /// Current list of owned item instances, in session order.
    async fn snapshot(&self) -> Result<Vec<InventoryRecord>>;

    /// Authoritative per-item favorited check against current session state.
    async fn is_favorited(&self, instance: &InstanceId) -> Result<bool>;
}

/// Invoke capability: blocking remote calls whose result matters.
#[async_trait]
pub trait TradeTransport: Send + Sync {
    /// Offer one item instance to the counterpart. Blocks until the session
    /// answers; `Ok(true)` means the exchange was accepted.
    async fn request_trade(
        &self,
        target: PlayerId,
        instance: &InstanceId,
        category: &str,
    ) -> Result<bool>;

    /// Best-effort reposition of the local actor next to the target.
    async fn move_to(&self, target: PlayerId) -> Result<()>;
}

/// Notify capability: fire-and-forget calls with no acknowledgment awaited.
#[async_trait]
pub trait MarkTransport: Send + Sync {
    /// Mark an item instance as favorited.
    async fn mark(&self, instance: &InstanceId);

    /// Idle-prevention input nudge.
    async fn nudge(&self);
}

/// Everything the trade orchestrator needs from a session.
pub trait TradeSession: SessionInfo + InventorySource + TradeTransport {}
impl<T: SessionInfo + InventorySource + TradeTransport + ?Sized> TradeSession for T {}

/// Everything the curation scheduler needs from a session.
pub trait CurationSession: InventorySource + MarkTransport {}
impl<T: InventorySource + MarkTransport + ?Sized> CurationSession for T {}
