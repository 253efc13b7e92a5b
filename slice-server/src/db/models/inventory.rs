//! Inventory Model

use serde::{Deserialize, Serialize};
use shared::catalog::IngredientCategory;
use std::collections::BTreeMap;
use surrealdb::RecordId;

/// Default low-stock threshold per category
pub const DEFAULT_THRESHOLD: i64 = 20;

fn default_threshold() -> i64 {
    DEFAULT_THRESHOLD
}

/// One record per ingredient category, keyed by the category name
/// (`inventory:bases`, `inventory:sauces`, ...)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryRecord {
    pub id: RecordId,
    pub category: IngredientCategory,
    /// Storage key → remaining count. Counts are never negative.
    #[serde(default)]
    pub items: BTreeMap<String, i64>,
    #[serde(default = "default_threshold")]
    pub threshold: i64,
    /// Milliseconds since epoch of the last mutation
    pub last_updated: i64,
}

/// Inventory category as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryView {
    pub category: IngredientCategory,
    pub items: BTreeMap<String, i64>,
    pub threshold: i64,
    pub last_updated: i64,
}

impl From<InventoryRecord> for InventoryView {
    fn from(record: InventoryRecord) -> Self {
        Self {
            category: record.category,
            items: record.items,
            threshold: record.threshold,
            last_updated: record.last_updated,
        }
    }
}
