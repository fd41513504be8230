//! API Error Handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use reforge_core::Amount;
use reforge_ledger::LedgerError;
use serde_json::json;
use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Case not found: {0}")]
    CaseNotFound(String),

    #[error("Skin not found: {0}")]
    SkinNotFound(String),

    #[error("Item not found in inventory: {0}")]
    ItemNotFound(String),

    #[error("Insufficient balance: required {required}, available {available}")]
    InsufficientFunds { required: Amount, available: Amount },

    #[error("No scanned item found")]
    NoReservation,

    #[error("Case mismatch: scanned {reserved}, claimed {requested}")]
    CaseMismatch { reserved: String, requested: String },

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<LedgerError> for ApiError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::UserNotFound(id) => ApiError::UserNotFound(id),
            LedgerError::CaseNotFound(id) => ApiError::CaseNotFound(id),
            LedgerError::SkinNotFound(id) => ApiError::SkinNotFound(id),
            LedgerError::ItemNotFound(id) => ApiError::ItemNotFound(id),
            LedgerError::InsufficientFunds {
                required,
                available,
            } => ApiError::InsufficientFunds {
                required,
                available,
            },
            LedgerError::NoReservation => ApiError::NoReservation,
            LedgerError::CaseMismatch {
                reserved,
                requested,
            } => ApiError::CaseMismatch {
                reserved,
                requested,
            },
            LedgerError::InvalidInput(msg) => ApiError::BadRequest(msg),
            LedgerError::Internal(msg) => ApiError::Internal(msg),
            LedgerError::Storage(e) => ApiError::Internal(e.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            ApiError::UserNotFound(id) => (
                StatusCode::NOT_FOUND,
                "user_not_found",
                format!("User {} not found", id),
            ),
            ApiError::CaseNotFound(id) => (
                StatusCode::NOT_FOUND,
                "case_not_found",
                format!("Case {} not found", id),
            ),
            ApiError::SkinNotFound(id) => (
                StatusCode::NOT_FOUND,
                "skin_not_found",
                format!("Skin {} not found", id),
            ),
            ApiError::ItemNotFound(id) => (
                StatusCode::NOT_FOUND,
                "item_not_found",
                format!("Item {} not found in inventory", id),
            ),
            ApiError::InsufficientFunds {
                required,
                available,
            } => (
                StatusCode::BAD_REQUEST,
                "insufficient_funds",
                format!("Insufficient balance. Need ${}, have ${}", required, available),
            ),
            ApiError::NoReservation => (
                StatusCode::BAD_REQUEST,
                "no_reservation",
                "No scanned item found".to_string(),
            ),
            ApiError::CaseMismatch {
                reserved,
                requested,
            } => (
                StatusCode::BAD_REQUEST,
                "case_mismatch",
                format!(
                    "Scanned item belongs to case {}, not {}",
                    reserved, requested
                ),
            ),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "unauthorized", msg),
            ApiError::Internal(msg) => {
                // detail goes to the log only
                tracing::error!(error = %msg, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_type,
            "message": message,
        }));

        (status, body).into_response()
    }
}
