//! Session endpoints

use crate::auth_handlers::{login, logout};
use crate::ApiState;
use axum::{routing::post, Router};

pub fn auth_routes() -> Router<ApiState> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
}
