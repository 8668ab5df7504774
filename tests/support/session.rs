use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use mule::app::ControlState;
use mule::domain::{InstanceId, InventoryRecord, PlayerId};
use mule::error::{Result, SessionError};
use mule::session::{InventorySource, MarkTransport, Player, SessionInfo, TradeTransport};

/// Scriptable in-memory session implementing every session port.
///
/// Trade outcomes are programmed per instance id; everything else defaults to
/// a healthy two-player session. All remote calls are recorded so tests can
/// assert on exactly what went over the wire.
pub struct ScriptedSession {
    local: Player,
    players: Vec<Player>,
    snapshot: Option<Vec<InventoryRecord>>,
    favorited: Mutex<HashSet<InstanceId>>,
    favorited_check_fails: bool,
    declines_remaining: Mutex<HashMap<InstanceId, usize>>,
    failing: HashSet<InstanceId>,
    reposition_works: bool,
    cancel_after_trades: Mutex<Option<(usize, Arc<ControlState>)>>,
    trade_calls: Mutex<Vec<InstanceId>>,
    mark_calls: Mutex<Vec<InstanceId>>,
}

impl ScriptedSession {
    pub fn new() -> Self {
        let local = Player::new(1u64, "LocalMule");
        Self {
            players: vec![local.clone(), Player::new(2u64, "MainAccount")],
            local,
            snapshot: Some(Vec::new()),
            favorited: Mutex::new(HashSet::new()),
            favorited_check_fails: false,
            declines_remaining: Mutex::new(HashMap::new()),
            failing: HashSet::new(),
            reposition_works: false,
            cancel_after_trades: Mutex::new(None),
            trade_calls: Mutex::new(Vec::new()),
            mark_calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_snapshot(mut self, records: Vec<InventoryRecord>) -> Self {
        self.snapshot = Some(records);
        self
    }

    pub fn snapshot_unavailable(mut self) -> Self {
        self.snapshot = None;
        self
    }

    /// Instances the session already reports as favorited.
    pub fn with_favorited(self, instances: &[&str]) -> Self {
        {
            let mut favorited = self.favorited.lock().unwrap();
            for id in instances {
                favorited.insert(InstanceId::from(*id));
            }
        }
        self
    }

    /// Make the authoritative favorited check fail for every instance.
    pub fn favorited_check_fails(mut self) -> Self {
        self.favorited_check_fails = true;
        self
    }

    /// Decline the first `count` trade attempts for an instance, then accept.
    pub fn decline_first(self, instance: &str, count: usize) -> Self {
        self.declines_remaining
            .lock()
            .unwrap()
            .insert(InstanceId::from(instance), count);
        self
    }

    /// Make every trade attempt for an instance fail at the transport level.
    pub fn failing_instance(mut self, instance: &str) -> Self {
        self.failing.insert(InstanceId::from(instance));
        self
    }

    /// Request cooperative cancellation once `count` trade calls were made.
    pub fn cancel_after_trades(self, count: usize, state: Arc<ControlState>) -> Self {
        *self.cancel_after_trades.lock().unwrap() = Some((count, state));
        self
    }

    pub fn trade_calls(&self) -> Vec<InstanceId> {
        self.trade_calls.lock().unwrap().clone()
    }

    pub fn trade_call_count(&self) -> usize {
        self.trade_calls.lock().unwrap().len()
    }

    pub fn mark_calls(&self) -> Vec<InstanceId> {
        self.mark_calls.lock().unwrap().clone()
    }
}

impl Default for ScriptedSession {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionInfo for ScriptedSession {
    async fn players(&self) -> Result<Vec<Player>> {
        Ok(self.players.clone())
    }

    async fn local_player(&self) -> Result<Player> {
        Ok(self.local.clone())
    }
}

#[async_trait]
impl InventorySource for ScriptedSession {
    async fn snapshot(&self) -> Result<Vec<InventoryRecord>> {
        match &self.snapshot {
            Some(records) => Ok(records.clone()),
            None => Err(SessionError::Unavailable("metadata store offline".into()).into()),
        }
    }

    async fn is_favorited(&self, instance: &InstanceId) -> Result<bool> {
        if self.favorited_check_fails {
            return Err(SessionError::Unavailable("favorited lookup failed".into()).into());
        }
        Ok(self.favorited.lock().unwrap().contains(instance))
    }
}

#[async_trait]
impl TradeTransport for ScriptedSession {
    async fn request_trade(
        &self,
        _target: PlayerId,
        instance: &InstanceId,
        _category: &str,
    ) -> Result<bool> {
        let call_count = {
            let mut calls = self.trade_calls.lock().unwrap();
            calls.push(instance.clone());
            calls.len()
        };

        if let Some((after, state)) = self.cancel_after_trades.lock().unwrap().as_ref() {
            if call_count >= *after {
                state.stop_trading();
            }
        }

        if self.failing.contains(instance) {
            return Err(SessionError::Unavailable("trade channel busy".into()).into());
        }

        let mut declines = self.declines_remaining.lock().unwrap();
        if let Some(remaining) = declines.get_mut(instance) {
            if *remaining > 0 {
                *remaining -= 1;
                return Ok(false);
            }
        }
        Ok(true)
    }

    async fn move_to(&self, _target: PlayerId) -> Result<()> {
        if self.reposition_works {
            Ok(())
        } else {
            Err(SessionError::Unavailable("pathfinding busy".into()).into())
        }
    }
}

#[async_trait]
impl MarkTransport for ScriptedSession {
    async fn mark(&self, instance: &InstanceId) {
        self.mark_calls.lock().unwrap().push(instance.clone());
        self.favorited.lock().unwrap().insert(instance.clone());
    }

    async fn nudge(&self) {}
}
