//! HTTP client for the local session bridge.
//!
//! The in-game companion script exposes a small REST surface on localhost:
//! presence (`/players`, `/local`), inventory (`/inventory`,
//! `/inventory/{instance}/favorited`) and remote invocations (`/trade`,
//! `/favorite`, `/nudge`). This client implements the session ports on top
//! of it.

mod dto;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::BridgeConfig;
use crate::domain::{InstanceId, InventoryRecord, ItemId, PlayerId};
use crate::error::Result;
use crate::session::{InventorySource, MarkTransport, Player, SessionInfo, TradeTransport};

use dto::{
    FavoritedResponse, InventoryResponse, MarkRequest, PlayerDto, PlayersResponse, TradeRequest,
    TradeResponse,
};

/// HTTP adapter over the session-bridge endpoint.
pub struct BridgeClient {
    http: HttpClient,
    base_url: String,
}

impl BridgeClient {
    /// Create a client with default HTTP settings.
    #[must_use]
    pub fn new(base_url: String) -> Self {
        Self {
            http: HttpClient::new(),
            base_url,
        }
    }

    #[must_use]
    pub fn from_config(config: &BridgeConfig) -> Self {
        let http = HttpClient::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .build()
            .unwrap_or_else(|err| {
                warn!(error = %err, "Failed to build HTTP client, using defaults");
                HttpClient::new()
            });

        Self {
            http,
            base_url: config.url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self
            .http
            .get(self.url(path))
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json::<T>().await?)
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let response = self
            .http
            .post(self.url(path))
            .json(body)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json::<T>().await?)
    }

    /// Fire a request whose result nobody waits for.
    async fn post_fire<B: Serialize>(&self, path: &str, body: &B) -> Result<()> {
        self.http
            .post(self.url(path))
            .json(body)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

impl From<PlayerDto> for Player {
    fn from(dto: PlayerDto) -> Self {
        Player::new(dto.id, dto.name)
    }
}

#[async_trait]
impl SessionInfo for BridgeClient {
    async fn players(&self) -> Result<Vec<Player>> {
        let response: PlayersResponse = self.get_json("/players").await?;
        Ok(response.players.into_iter().map(Player::from).collect())
    }

    async fn local_player(&self) -> Result<Player> {
        let dto: PlayerDto = self.get_json("/local").await?;
        Ok(dto.into())
    }
}

#[async_trait]
impl InventorySource for BridgeClient {
    async fn snapshot(&self) -> Result<Vec<InventoryRecord>> {
        let response: InventoryResponse = self.get_json("/inventory").await?;
        debug!(items = response.items.len(), "Inventory snapshot fetched");
        Ok(response
            .items
            .into_iter()
            .map(|item| {
                InventoryRecord::new(ItemId::new(item.item_id), item.instance_id, item.favorited)
            })
            .collect())
    }

    async fn is_favorited(&self, instance: &InstanceId) -> Result<bool> {
        let response: FavoritedResponse = self
            .get_json(&format!("/inventory/{}/favorited", instance))
            .await?;
        Ok(response.favorited)
    }
}

#[async_trait]
impl TradeTransport for BridgeClient {
    async fn request_trade(
        &self,
        target: PlayerId,
        instance: &InstanceId,
        category: &str,
    ) -> Result<bool> {
        let request = TradeRequest {
            target_id: target.as_u64(),
            instance_id: instance.as_str(),
            category,
        };
        let response: TradeResponse = self.post_json("/trade", &request).await?;
        Ok(response.accepted)
    }

    async fn move_to(&self, target: PlayerId) -> Result<()> {
        self.post_fire("/move", &serde_json::json!({ "target_id": target.as_u64() }))
            .await
    }
}

#[async_trait]
impl MarkTransport for BridgeClient {
    async fn mark(&self, instance: &InstanceId) {
        let request = MarkRequest {
            instance_id: instance.as_str(),
        };
        if let Err(err) = self.post_fire("/favorite", &request).await {
            warn!(instance = %instance, error = %err, "Mark request failed");
        }
    }

    async fn nudge(&self) {
        if let Err(err) = self.post_fire("/nudge", &serde_json::json!({})).await {
            debug!(error = %err, "Idle nudge failed");
        }
    }
}
