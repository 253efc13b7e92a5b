//! Order API Handlers

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use shared::pizza::OrderStatus;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::OrderView;
use crate::db::repository::OrderRepository;
use crate::utils::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: OrderStatus,
}

/// GET /orders/my-orders - caller's orders, newest first
pub async fn my_orders(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<OrderView>>> {
    let repo = OrderRepository::new(state.db.clone());
    let orders = repo.find_by_user(&user.id).await.map_err(AppError::from)?;
    Ok(Json(orders.into_iter().map(OrderView::from).collect()))
}

/// GET /orders/all - all orders with owner email, newest first (admin)
pub async fn list_all(State(state): State<ServerState>) -> AppResult<Json<Vec<OrderView>>> {
    let repo = OrderRepository::new(state.db.clone());
    let orders = repo.find_all_with_owner().await.map_err(AppError::from)?;
    Ok(Json(orders.into_iter().map(OrderView::from).collect()))
}

/// PATCH /orders/:order_id/status - set the status verbatim (admin)
///
/// The store-level contract is "set to given value"; the console only
/// offers forward transitions but overrides are allowed here.
pub async fn update_status(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(order_id): Path<String>,
    Json(payload): Json<StatusUpdateRequest>,
) -> AppResult<Json<OrderView>> {
    let repo = OrderRepository::new(state.db.clone());
    let order = repo
        .set_status(&order_id, payload.status)
        .await
        .map_err(AppError::from)?;

    tracing::info!(
        order_id = %order_id,
        status = %payload.status,
        admin = %user.email,
        "Order status updated"
    );

    Ok(Json(OrderView::from(order)))
}
