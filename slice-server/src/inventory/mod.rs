//! Inventory consumption and low-stock alerts
//!
//! Called after a payment has been verified: every ingredient of the
//! finalized order decrements its stock count by one per unit, then the
//! remaining counts are scanned for items below their category
//! threshold. The scan-and-notify is a read-only side observation, not
//! part of the adjustment writes.

use crate::db::repository::{InventoryRepository, RepoResult};
use async_trait::async_trait;
use shared::catalog::IngredientCategory;
use shared::pizza::PizzaSelection;

/// An ingredient whose remaining count dropped below the category
/// threshold
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LowStockAlert {
    pub category: IngredientCategory,
    pub item: String,
    pub remaining: i64,
}

/// Sink for low-stock alerts (log, email, ...)
#[async_trait]
pub trait StockNotifier: Send + Sync {
    async fn notify(&self, alerts: &[LowStockAlert]);
}

/// Default notifier: one WARN line per depleted item
pub struct LogNotifier;

#[async_trait]
impl StockNotifier for LogNotifier {
    async fn notify(&self, alerts: &[LowStockAlert]) {
        for alert in alerts {
            tracing::warn!(
                category = %alert.category,
                item = %alert.item,
                remaining = alert.remaining,
                "Low stock"
            );
        }
    }
}

/// Decrement stock for every ingredient of the selection, then run the
/// low-stock check and notify if anything is below threshold.
pub async fn consume_selection(
    repo: &InventoryRepository,
    notifier: &dyn StockNotifier,
    selection: &PizzaSelection,
) -> RepoResult<()> {
    for (category, key) in selection.storage_keys() {
        repo.decrement(category, &key, 1).await?;
    }

    let alerts = low_stock(repo).await?;
    if !alerts.is_empty() {
        notifier.notify(&alerts).await;
    }
    Ok(())
}

/// Items strictly below their category threshold
pub async fn low_stock(repo: &InventoryRepository) -> RepoResult<Vec<LowStockAlert>> {
    let mut alerts = Vec::new();
    for record in repo.find_all().await? {
        for (item, remaining) in &record.items {
            if *remaining < record.threshold {
                alerts.push(LowStockAlert {
                    category: record.category,
                    item: item.clone(),
                    remaining: *remaining,
                });
            }
        }
    }
    Ok(alerts)
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::Mutex;

    /// Captures alerts instead of logging them
    pub(crate) struct CapturingNotifier {
        pub alerts: Mutex<Vec<LowStockAlert>>,
        pub calls: Mutex<usize>,
    }

    impl CapturingNotifier {
        pub fn new() -> Self {
            Self {
                alerts: Mutex::new(Vec::new()),
                calls: Mutex::new(0),
            }
        }
    }

    #[async_trait]
    impl StockNotifier for CapturingNotifier {
        async fn notify(&self, alerts: &[LowStockAlert]) {
            *self.calls.lock().unwrap() += 1;
            self.alerts.lock().unwrap().extend_from_slice(alerts);
        }
    }
}
