//! Payment API module - checkout flow

mod handler;

use axum::{routing::post, Router};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/payment/create-order", post(handler::create_order))
        .route("/payment/verify-payment", post(handler::verify_payment))
}
