//! Inventory API module - admin only

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
        .route("/inventory", get(handler::list))
        .route("/inventory/{category}/{item}", patch(handler::update_item))
        .route_layer(axum_middleware::from_fn(require_admin))
}
