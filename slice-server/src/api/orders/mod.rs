//! Order API module

mod handler;

use axum::middleware as axum_middleware;
use axum::{
    routing::{get, patch},
    Router,
};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/orders/my-orders", get(handler::my_orders))
        .merge(admin_routes())
}

fn admin_routes() -> Router<ServerState> {
    Router::new()
        .route("/orders/all", get(handler::list_all))
        .route("/orders/{order_id}/status", patch(handler::update_status))
        .route_layer(axum_middleware::from_fn(require_admin))
}
