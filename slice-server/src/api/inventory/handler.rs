//! Inventory API Handlers

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use shared::catalog::IngredientCategory;

use crate::core::ServerState;
use crate::db::models::InventoryView;
use crate::db::repository::InventoryRepository;
use crate::utils::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct QuantityUpdateRequest {
    pub quantity: i64,
}

/// GET /inventory - all category records (admin)
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<InventoryView>>> {
    let repo = InventoryRepository::new(state.db.clone());
    let records = repo.find_all().await.map_err(AppError::from)?;
    Ok(Json(records.into_iter().map(InventoryView::from).collect()))
}

/// PATCH /inventory/:category/:item - set an absolute quantity (admin)
///
/// Upserts the category record on its first update.
pub async fn update_item(
    State(state): State<ServerState>,
    Path((category, item)): Path<(String, String)>,
    Json(payload): Json<QuantityUpdateRequest>,
) -> AppResult<Json<InventoryView>> {
    let category: IngredientCategory = category
        .parse()
        .map_err(|e| AppError::validation(format!("{e}")))?;

    let repo = InventoryRepository::new(state.db.clone());
    let record = repo
        .set_quantity(category, &item, payload.quantity)
        .await
        .map_err(AppError::from)?;

    tracing::info!(
        category = %category,
        item = %item,
        quantity = payload.quantity,
        "Inventory updated"
    );

    Ok(Json(InventoryView::from(record)))
}
