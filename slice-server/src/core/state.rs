use std::sync::Arc;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::DbService;
use crate::inventory::{LogNotifier, StockNotifier};
use crate::payment::{PaymentGateway, RazorpayClient};

/// Server state - shared references to every service
///
/// Cloned into each request; all fields are cheap shared handles. The
/// gateway and notifier sit behind trait objects so tests can substitute
/// fakes without a parallel data path.
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// Embedded database (SurrealDB)
    pub db: Surreal<Db>,
    /// JWT authentication service
    pub jwt_service: Arc<JwtService>,
    /// Payment gateway client
    pub gateway: Arc<dyn PaymentGateway>,
    /// Low-stock alert sink
    pub notifier: Arc<dyn StockNotifier>,
}

impl ServerState {
    pub fn new(
        config: Config,
        db: Surreal<Db>,
        jwt_service: Arc<JwtService>,
        gateway: Arc<dyn PaymentGateway>,
        notifier: Arc<dyn StockNotifier>,
    ) -> Self {
        Self {
            config,
            db,
            jwt_service,
            gateway,
            notifier,
        }
    }

    /// Initialize the full state for a production run
    ///
    /// # Panics
    ///
    /// Panics when the database cannot be opened; the process cannot do
    /// anything useful without it.
    pub async fn initialize(config: &Config) -> Self {
        std::fs::create_dir_all(config.database_path())
            .expect("Failed to create work directory structure");

        let db_service = DbService::new(&config.database_path())
            .await
            .expect("Failed to initialize database");

        let jwt_service = Arc::new(JwtService::new(config.jwt.clone()));
        let gateway: Arc<dyn PaymentGateway> =
            Arc::new(RazorpayClient::new(config.razorpay.clone()));
        let notifier: Arc<dyn StockNotifier> = Arc::new(LogNotifier);

        Self::new(config.clone(), db_service.db, jwt_service, gateway, notifier)
    }

    /// The secret shared with the payment gateway, used for signature
    /// verification
    pub fn payment_secret(&self) -> &str {
        &self.config.razorpay.key_secret
    }
}
