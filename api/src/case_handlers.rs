//! Case catalog, opening and scanning handlers

use crate::session::SessionUser;
use crate::{ok_json, ApiResult, ApiState};
use axum::{
    extract::{Path, State},
    Json,
};
use reforge_core::{Case, Item};
use reforge_ledger::{CaseDetails, OpenOutcome, ScanOutcome};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct DiscardResponse {
    pub success: bool,
    pub discarded: bool,
}

pub async fn list_cases(State(state): State<ApiState>) -> ApiResult<Json<Vec<Case>>> {
    ok_json!(state.ledger.list_cases()?)
}

pub async fn get_case(
    State(state): State<ApiState>,
    Path(case_id): Path<String>,
) -> ApiResult<Json<CaseDetails>> {
    ok_json!(state.ledger.case_details(&case_id)?)
}

pub async fn get_skin(
    State(state): State<ApiState>,
    Path(item_id): Path<String>,
) -> ApiResult<Json<Item>> {
    ok_json!(state.ledger.get_item(&item_id)?)
}

pub async fn open_case(
    State(state): State<ApiState>,
    session: SessionUser,
    Path(case_id): Path<String>,
) -> ApiResult<Json<OpenOutcome>> {
    ok_json!(state.ledger.open_case(&session.steam_id, &case_id)?)
}

/// Pay the scan fee and preview the item the case would yield
pub async fn scan_case(
    State(state): State<ApiState>,
    session: SessionUser,
    Path(case_id): Path<String>,
) -> ApiResult<Json<ScanOutcome>> {
    ok_json!(state.ledger.scan_case(&session.steam_id, &case_id)?)
}

/// Buy the scanned case and receive the previewed item
pub async fn claim_case(
    State(state): State<ApiState>,
    session: SessionUser,
    Path(case_id): Path<String>,
) -> ApiResult<Json<OpenOutcome>> {
    ok_json!(state.ledger.claim_reservation(&session.steam_id, &case_id)?)
}

pub async fn discard_scan(
    State(state): State<ApiState>,
    session: SessionUser,
) -> ApiResult<Json<DiscardResponse>> {
    let discarded = state.ledger.discard_reservation(&session.steam_id)?;
    ok_json!(DiscardResponse {
        success: true,
        discarded,
    })
}
