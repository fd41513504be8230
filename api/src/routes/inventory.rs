//! Inventory endpoints

use crate::inventory_handlers::{equip_item, list_inventory, sell_item, trade_up};
use crate::ApiState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn inventory_routes() -> Router<ApiState> {
    Router::new()
        .route("/inventory", get(list_inventory))
        .route("/inventory/trade-up", post(trade_up))
        .route("/inventory/{entry_id}/sell", post(sell_item))
        .route("/inventory/{entry_id}/equip", post(equip_item))
}
