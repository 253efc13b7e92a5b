//! Database Module
//!
//! Embedded SurrealDB storage. Schema is defined by what the
//! repositories write; inventory gets a one-time seed on first boot so
//! the store is the single source of truth for stock counts.

pub mod models;
pub mod repository;

use crate::utils::AppError;
use models::{UserCreate, UserRecord};
use repository::{InventoryRepository, UserRepository};
use shared::catalog::IngredientCategory;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, RocksDb};

const NAMESPACE: &str = "slice";
const DATABASE: &str = "orders";

/// Initial stock counts, written once when the inventory table is empty
const DEFAULT_STOCK: &[(IngredientCategory, &[(&str, i64)])] = &[
    (
        IngredientCategory::Bases,
        &[
            ("thin", 50),
            ("thick", 45),
            ("stuffed", 30),
            ("wholewheat", 25),
            ("glutenfree", 20),
        ],
    ),
    (
        IngredientCategory::Sauces,
        &[
            ("marinara", 100),
            ("bbq", 80),
            ("alfredo", 60),
            ("pesto", 40),
            ("buffalo", 70),
        ],
    ),
    (
        IngredientCategory::Cheeses,
        &[
            ("mozzarella", 200),
            ("cheddar", 150),
            ("parmesan", 100),
            ("feta", 80),
        ],
    ),
    (
        IngredientCategory::Veggies,
        &[
            ("mushrooms", 150),
            ("peppers", 120),
            ("onions", 180),
            ("tomatoes", 160),
            ("olives", 90),
        ],
    ),
    (
        IngredientCategory::Meats,
        &[
            ("pepperoni", 100),
            ("chicken", 80),
            ("beef", 60),
            ("sausage", 70),
        ],
    ),
];

/// Database service — owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open the on-disk database and select the namespace
    pub async fn new(db_path: &str) -> Result<Self, AppError> {
        let db = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        tracing::info!("Database opened at {db_path}");

        let service = Self { db };
        service.seed_inventory_if_empty().await?;
        service.seed_admin_if_missing().await?;
        Ok(service)
    }

    /// Create the bootstrap admin account on first boot.
    ///
    /// Controlled by `ADMIN_EMAIL` / `ADMIN_PASSWORD`; identity
    /// provisioning is otherwise external, so without a configured
    /// password the seed is skipped with a warning.
    pub async fn seed_admin_if_missing(&self) -> Result<(), AppError> {
        let email =
            std::env::var("ADMIN_EMAIL").unwrap_or_else(|_| "admin@slice.local".to_string());
        let password = match std::env::var("ADMIN_PASSWORD") {
            Ok(p) if !p.is_empty() => p,
            _ => {
                tracing::warn!("ADMIN_PASSWORD not set, skipping bootstrap admin account");
                return Ok(());
            }
        };
        self.create_admin(&email, &password).await
    }

    /// Create a verified admin account unless the email is already taken
    pub async fn create_admin(&self, email: &str, password: &str) -> Result<(), AppError> {
        let users = UserRepository::new(self.db.clone());
        if users
            .find_by_email(email)
            .await
            .map_err(|e| AppError::database(e.to_string()))?
            .is_some()
        {
            return Ok(());
        }

        let password_hash = UserRecord::hash_password(password)
            .map_err(|e| AppError::internal(format!("Failed to hash admin password: {e}")))?;
        users
            .create(UserCreate {
                email: email.to_string(),
                password_hash,
                role: "admin".to_string(),
                verified: true,
            })
            .await
            .map_err(|e| AppError::database(e.to_string()))?;

        tracing::info!(email = %email, "Bootstrap admin account created");
        Ok(())
    }

    /// Write the default stock counts if no inventory records exist yet
    pub async fn seed_inventory_if_empty(&self) -> Result<(), AppError> {
        let repo = InventoryRepository::new(self.db.clone());
        let existing = repo
            .find_all()
            .await
            .map_err(|e| AppError::database(e.to_string()))?;
        if !existing.is_empty() {
            return Ok(());
        }

        for (category, items) in DEFAULT_STOCK {
            repo.create_category(*category, items)
                .await
                .map_err(|e| AppError::database(e.to_string()))?;
        }
        tracing::info!("Seeded default inventory ({} categories)", DEFAULT_STOCK.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::testing::mem_db;

    #[tokio::test]
    async fn admin_bootstrap_is_idempotent() {
        let service = DbService { db: mem_db().await };
        service.create_admin("boss@slice.local", "hunter2!").await.unwrap();
        // Second boot with the same email must not error or duplicate
        service.create_admin("boss@slice.local", "other-pass").await.unwrap();

        let users = UserRepository::new(service.db.clone());
        let admin = users
            .find_by_email("boss@slice.local")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(admin.role, "admin");
        assert!(admin.verified);
        // The original password still verifies; the later one was ignored
        assert!(admin.verify_password("hunter2!").unwrap());
        assert!(!admin.verify_password("other-pass").unwrap());
    }
}
