//! Wire types for the session-bridge HTTP API.

use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct PlayerDto {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct PlayersResponse {
    pub players: Vec<PlayerDto>,
}

#[derive(Debug, Deserialize)]
pub struct InventoryItemDto {
    pub item_id: u64,
    pub instance_id: String,
    #[serde(default)]
    pub favorited: bool,
}

#[derive(Debug, Deserialize)]
pub struct InventoryResponse {
    pub items: Vec<InventoryItemDto>,
}

#[derive(Debug, Deserialize)]
pub struct FavoritedResponse {
    pub favorited: bool,
}

#[derive(Debug, Serialize)]
pub struct TradeRequest<'a> {
    pub target_id: u64,
    pub instance_id: &'a str,
    pub category: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct TradeResponse {
    pub accepted: bool,
}

#[derive(Debug, Serialize)]
pub struct MarkRequest<'a> {
    pub instance_id: &'a str,
}
