//! Profile and wallet endpoints

use crate::user_handlers::{add_funds, get_profile};
use crate::ApiState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn user_routes() -> Router<ApiState> {
    Router::new()
        .route("/user", get(get_profile))
        .route("/user/funds", post(add_funds))
}
