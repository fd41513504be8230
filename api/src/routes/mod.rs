//! API routes organization
//!
//! Route groups by domain:
//! - `auth` - Login and logout
//! - `user` - Profile and wallet
//! - `cases` - Catalog, opening, scanning and claiming
//! - `inventory` - Owned items, selling, equipping and trade-ups
//!
//! Each submodule exports a router function with full paths; they are merged
//! here.

mod auth;
mod cases;
mod inventory;
mod user;

use crate::ApiState;
use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

/// Create the main router with all API endpoints
pub fn create_routes() -> Router<ApiState> {
    Router::new()
        // Core application routes
        .route("/", get(root))
        .route("/health", get(health_check))
        // Domain-specific route groups
        .merge(auth::auth_routes())
        .merge(user::user_routes())
        .merge(cases::case_routes())
        .merge(inventory::inventory_routes())
}

// Root endpoints

async fn root() -> &'static str {
    "CS Reforge API"
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    uptime_secs: u64,
    users: usize,
    sessions: usize,
}

async fn health_check(State(state): State<ApiState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
        users: state.ledger.database().user_count(),
        sessions: state.sessions.len(),
    })
}
