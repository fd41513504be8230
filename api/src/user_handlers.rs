//! User profile and wallet handlers

use crate::session::SessionUser;
use crate::{ok_json, ApiError, ApiResult, ApiState};
use axum::{extract::State, Json};
use reforge_core::Amount;
use reforge_ledger::Profile;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct AddFundsRequest {
    pub amount: f64,
}

#[derive(Debug, Serialize)]
pub struct AddFundsResponse {
    pub success: bool,
    pub new_balance: Amount,
}

pub async fn get_profile(
    State(state): State<ApiState>,
    session: SessionUser,
) -> ApiResult<Json<Profile>> {
    ok_json!(state.ledger.profile(&session.steam_id)?)
}

pub async fn add_funds(
    State(state): State<ApiState>,
    session: SessionUser,
    Json(req): Json<AddFundsRequest>,
) -> ApiResult<Json<AddFundsResponse>> {
    let amount =
        Amount::from_decimal(req.amount).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let new_balance = state.ledger.add_funds(&session.steam_id, amount)?;

    ok_json!(AddFundsResponse {
        success: true,
        new_balance,
    })
}
