//! Case catalog, opening and scan/claim endpoints

use crate::case_handlers::{
    claim_case, discard_scan, get_case, get_skin, list_cases, open_case, scan_case,
};
use crate::ApiState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn case_routes() -> Router<ApiState> {
    Router::new()
        .route("/cases", get(list_cases))
        .route("/cases/discard", post(discard_scan))
        .route("/cases/{id}", get(get_case))
        .route("/cases/{id}/open", post(open_case))
        .route("/cases/{id}/scan", post(scan_case))
        .route("/cases/{id}/claim", post(claim_case))
        .route("/skins/{id}", get(get_skin))
}
