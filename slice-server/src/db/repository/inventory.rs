//! Inventory Repository
//!
//! One record per ingredient category, keyed by the category name so
//! lookups and updates address the record directly. Decrements are a
//! single conditional UPDATE so concurrent order finalizations
//! serialize inside the store and can never drive a count negative.

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::inventory::DEFAULT_THRESHOLD;
use crate::db::models::InventoryRecord;
use shared::catalog::IngredientCategory;
use shared::util::now_millis;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const TABLE: &str = "inventory";

#[derive(Clone)]
pub struct InventoryRepository {
    base: BaseRepository,
}

impl InventoryRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// All category records, stable order
    pub async fn find_all(&self) -> RepoResult<Vec<InventoryRecord>> {
        let records: Vec<InventoryRecord> = self
            .base
            .db()
            .query("SELECT * FROM type::table($table) ORDER BY category")
            .bind(("table", TABLE))
            .await?
            .take(0)?;
        Ok(records)
    }

    pub async fn find_by_category(
        &self,
        category: IngredientCategory,
    ) -> RepoResult<Option<InventoryRecord>> {
        let record: Option<InventoryRecord> =
            self.base.db().select((TABLE, category.as_str())).await?;
        Ok(record)
    }

    /// Create a category record with the given counts
    pub async fn create_category(
        &self,
        category: IngredientCategory,
        items: &[(&str, i64)],
    ) -> RepoResult<InventoryRecord> {
        let items: std::collections::BTreeMap<String, i64> = items
            .iter()
            .map(|(name, count)| (name.to_string(), *count))
            .collect();
        let record: Option<InventoryRecord> = self
            .base
            .db()
            .query(
                "UPSERT type::thing($table, $cat) SET category = $cat, items = $items, \
                 threshold = $threshold, last_updated = $now",
            )
            .bind(("table", TABLE))
            .bind(("cat", category))
            .bind(("items", items))
            .bind(("threshold", DEFAULT_THRESHOLD))
            .bind(("now", now_millis()))
            .await?
            .take(0)?;
        record.ok_or_else(|| RepoError::Database("Failed to create inventory record".to_string()))
    }

    /// Set an item's count to an absolute quantity, creating the
    /// category record lazily on its first update.
    pub async fn set_quantity(
        &self,
        category: IngredientCategory,
        item: &str,
        quantity: i64,
    ) -> RepoResult<InventoryRecord> {
        if quantity < 0 {
            return Err(RepoError::Validation(format!(
                "Quantity for {item} must not be negative"
            )));
        }

        let record: Option<InventoryRecord> = self
            .base
            .db()
            .query(
                "UPSERT type::thing($table, $cat) SET category = $cat, \
                 threshold = threshold ?? $threshold, items = items ?? {}, \
                 items[$item] = $quantity, last_updated = $now",
            )
            .bind(("table", TABLE))
            .bind(("cat", category))
            .bind(("item", item.to_string()))
            .bind(("quantity", quantity))
            .bind(("threshold", DEFAULT_THRESHOLD))
            .bind(("now", now_millis()))
            .await?
            .take(0)?;
        record.ok_or_else(|| RepoError::Database("Failed to upsert inventory record".to_string()))
    }

    /// Decrement a tracked item by `count`, flooring at zero.
    ///
    /// Runs as one UPDATE statement so the read-modify-write is atomic
    /// per record; untracked items stay untracked rather than appearing
    /// at zero.
    pub async fn decrement(
        &self,
        category: IngredientCategory,
        item: &str,
        count: i64,
    ) -> RepoResult<()> {
        self.base
            .db()
            .query(
                "UPDATE type::thing($table, $cat) \
                 SET items[$item] = math::max([(items[$item] ?? 0) - $count, 0]), \
                 last_updated = $now \
                 WHERE items[$item] != NONE",
            )
            .bind(("table", TABLE))
            .bind(("cat", category))
            .bind(("item", item.to_string()))
            .bind(("count", count))
            .bind(("now", now_millis()))
            .await?
            .check()
            .map_err(RepoError::from)?;
        Ok(())
    }
}
