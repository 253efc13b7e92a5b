//! Order Model

use serde::{Deserialize, Serialize};
use shared::pizza::{OrderStatus, PizzaSelection};
use surrealdb::RecordId;

/// Order as stored in the `order` table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRecord {
    pub id: RecordId,
    /// Reference to the owning `user` record
    pub user_id: RecordId,
    pub pizza: PizzaSelection,
    pub total: f64,
    pub status: OrderStatus,
    /// Gateway-side order id, set at creation
    pub razorpay_order_id: String,
    #[serde(default)]
    pub razorpay_payment_id: Option<String>,
    #[serde(default)]
    pub razorpay_signature: Option<String>,
    /// Milliseconds since epoch
    pub created_at: i64,
    /// Owner email, present only on admin listings (joined at query time)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_email: Option<String>,
}

/// Content written when creating an order (id assigned by the store)
#[derive(Debug, Clone, Serialize)]
pub struct OrderCreate {
    pub user_id: RecordId,
    pub pizza: PizzaSelection,
    pub total: f64,
    pub status: OrderStatus,
    pub razorpay_order_id: String,
    pub razorpay_payment_id: Option<String>,
    pub razorpay_signature: Option<String>,
    pub created_at: i64,
}

/// Order as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderView {
    pub id: String,
    pub user_id: String,
    pub pizza: PizzaSelection,
    pub total: f64,
    pub status: OrderStatus,
    pub razorpay_order_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub razorpay_payment_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub razorpay_signature: Option<String>,
    pub created_at: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_email: Option<String>,
}

impl From<OrderRecord> for OrderView {
    fn from(record: OrderRecord) -> Self {
        Self {
            id: record.id.key().to_string(),
            user_id: record.user_id.key().to_string(),
            pizza: record.pizza,
            total: record.total,
            status: record.status,
            razorpay_order_id: record.razorpay_order_id,
            razorpay_payment_id: record.razorpay_payment_id,
            razorpay_signature: record.razorpay_signature,
            created_at: record.created_at,
            user_email: record.user_email,
        }
    }
}
