//! Inventory handlers

use crate::response::SuccessResponse;
use crate::session::SessionUser;
use crate::{ok_json, ApiError, ApiResult, ApiState};
use axum::{
    extract::{Path, State},
    Json,
};
use reforge_core::Amount;
use reforge_ledger::{InventoryItem, TradeUpOutcome};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct SellResponse {
    pub success: bool,
    pub sold_for: Amount,
    pub new_balance: Amount,
}

#[derive(Debug, Deserialize)]
pub struct TradeUpRequest {
    pub entry_ids: Vec<Uuid>,
}

fn parse_entry_id(raw: &str) -> ApiResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| ApiError::BadRequest(format!("Invalid item id: {}", raw)))
}

pub async fn list_inventory(
    State(state): State<ApiState>,
    session: SessionUser,
) -> ApiResult<Json<Vec<InventoryItem>>> {
    ok_json!(state.ledger.inventory(&session.steam_id)?)
}

pub async fn sell_item(
    State(state): State<ApiState>,
    session: SessionUser,
    Path(entry_id): Path<String>,
) -> ApiResult<Json<SellResponse>> {
    let entry_id = parse_entry_id(&entry_id)?;
    let sale = state.ledger.sell_item(&session.steam_id, entry_id)?;

    ok_json!(SellResponse {
        success: true,
        sold_for: sale.sold_for,
        new_balance: sale.new_balance,
    })
}

pub async fn equip_item(
    State(state): State<ApiState>,
    session: SessionUser,
    Path(entry_id): Path<String>,
) -> ApiResult<Json<SuccessResponse>> {
    let entry_id = parse_entry_id(&entry_id)?;
    state.ledger.equip(&session.steam_id, entry_id)?;
    ok_json!(SuccessResponse::ok())
}

pub async fn trade_up(
    State(state): State<ApiState>,
    session: SessionUser,
    Json(req): Json<TradeUpRequest>,
) -> ApiResult<Json<TradeUpOutcome>> {
    ok_json!(state.ledger.trade_up(&session.steam_id, &req.entry_ids)?)
}
