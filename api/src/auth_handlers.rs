//! Login / logout handlers

use crate::response::SuccessResponse;
use crate::session::SessionUser;
use crate::{ok_json, ApiResult, ApiState};
use axum::{extract::State, Json};
use reforge_ledger::Profile;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub steam_id: String,
    pub username: Option<String>,
    pub avatar: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: Profile,
}

/// Create or refresh the user and open a session
pub async fn login(
    State(state): State<ApiState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let user = state.ledger.login(
        &req.steam_id,
        req.username.as_deref(),
        req.avatar.as_deref(),
    )?;
    let token = state.sessions.issue(&user.steam_id);

    tracing::info!(steam_id = %user.steam_id, sessions = state.sessions.len(), "session opened");

    ok_json!(LoginResponse { token, user })
}

/// Close the session and drop any unclaimed scan
pub async fn logout(
    State(state): State<ApiState>,
    session: SessionUser,
) -> ApiResult<Json<SuccessResponse>> {
    state.sessions.revoke(&session.token);
    state.ledger.logout(&session.steam_id)?;

    tracing::info!(steam_id = %session.steam_id, "session closed");

    ok_json!(SuccessResponse::ok())
}
