//! Order Repository
//!
//! Orders are created at checkout, mutated on payment verification and
//! by admin status updates, never deleted.

use super::{strip_table_prefix, BaseRepository, RepoError, RepoResult};
use crate::db::models::{OrderCreate, OrderRecord};
use serde::Serialize;
use shared::pizza::{OrderStatus, PizzaSelection};
use shared::util::now_millis;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "order";

#[derive(Serialize)]
struct StatusPatch {
    status: OrderStatus,
}

#[derive(Serialize)]
struct PaymentPatch {
    status: OrderStatus,
    razorpay_payment_id: String,
    razorpay_signature: String,
}

#[derive(Clone)]
pub struct OrderRepository {
    base: BaseRepository,
}

impl OrderRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Create a pending order correlated with a gateway order id
    pub async fn create(
        &self,
        user_key: &str,
        pizza: PizzaSelection,
        total: f64,
        razorpay_order_id: String,
    ) -> RepoResult<OrderRecord> {
        let content = OrderCreate {
            user_id: RecordId::from_table_key("user", user_key),
            pizza,
            total,
            status: OrderStatus::Pending,
            razorpay_order_id,
            razorpay_payment_id: None,
            razorpay_signature: None,
            created_at: now_millis(),
        };

        let created: Option<OrderRecord> = self.base.db().create(TABLE).content(content).await?;
        created.ok_or_else(|| RepoError::Database("Failed to create order".to_string()))
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<OrderRecord>> {
        let key = strip_table_prefix(TABLE, id);
        let order: Option<OrderRecord> = self.base.db().select((TABLE, key)).await?;
        Ok(order)
    }

    /// Orders owned by a user, newest first
    pub async fn find_by_user(&self, user_key: &str) -> RepoResult<Vec<OrderRecord>> {
        let user = RecordId::from_table_key("user", user_key);
        let orders: Vec<OrderRecord> = self
            .base
            .db()
            .query("SELECT * FROM type::table($table) WHERE user_id = $user ORDER BY created_at DESC")
            .bind(("table", TABLE))
            .bind(("user", user))
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// All orders joined with the owner email, newest first
    pub async fn find_all_with_owner(&self) -> RepoResult<Vec<OrderRecord>> {
        let orders: Vec<OrderRecord> = self
            .base
            .db()
            .query(
                "SELECT *, user_id.email AS user_email FROM type::table($table) \
                 ORDER BY created_at DESC",
            )
            .bind(("table", TABLE))
            .await?
            .take(0)?;
        Ok(orders)
    }

    /// Write the given status verbatim.
    ///
    /// Intentionally permissive: the admin console offers only forward
    /// transitions, but the store-level contract is "set to given value"
    /// so an operator can override a mis-advanced order.
    pub async fn set_status(&self, id: &str, status: OrderStatus) -> RepoResult<OrderRecord> {
        let key = strip_table_prefix(TABLE, id);
        let updated: Option<OrderRecord> = self
            .base
            .db()
            .update((TABLE, key))
            .merge(StatusPatch { status })
            .await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Order {id} not found")))
    }

    /// Persist payment correlation fields and move the order to
    /// `received`. Called only after the signature has been verified.
    pub async fn attach_payment(
        &self,
        id: &str,
        payment_id: String,
        signature: String,
    ) -> RepoResult<OrderRecord> {
        let key = strip_table_prefix(TABLE, id);
        let updated: Option<OrderRecord> = self
            .base
            .db()
            .update((TABLE, key))
            .merge(PaymentPatch {
                status: OrderStatus::Received,
                razorpay_payment_id: payment_id,
                razorpay_signature: signature,
            })
            .await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Order {id} not found")))
    }
}
