//! Payment API Handlers
//!
//! The two-step checkout flow: create a gateway intent plus a local
//! pending order, then verify the returned signature and finalize.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use shared::pizza::{OrderStatus, PizzaSelection};
use shared::pricing::calculate_price;
use shared::util::now_millis;
use validator::Validate;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::{InventoryRepository, OrderRepository};
use crate::inventory::consume_selection;
use crate::payment::{to_minor_units, verify_signature, CURRENCY};
use crate::utils::{AppError, AppResult};

/// Tolerance when comparing a client-sent amount against the recomputed
/// price (both are f64 carrying a 2dp value)
const AMOUNT_EPSILON: f64 = 0.005;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateOrderRequest {
    #[validate(range(min = 0.01, message = "Amount must be positive"))]
    pub amount: f64,
    pub pizza: PizzaSelection,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderResponse {
    /// Gateway order id, handed to the checkout widget
    pub order_id: String,
    /// Amount in minor units as echoed by the gateway
    pub amount: i64,
    pub currency: String,
    /// Local order record id
    pub db_order_id: String,
}

#[derive(Debug, Deserialize)]
pub struct VerifyPaymentRequest {
    pub razorpay_order_id: String,
    pub razorpay_payment_id: String,
    pub razorpay_signature: String,
    #[serde(rename = "dbOrderId")]
    pub db_order_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyPaymentResponse {
    pub message: String,
    pub order_id: String,
}

fn validate_selection(pizza: &PizzaSelection) -> AppResult<()> {
    if pizza.is_complete() {
        return Ok(());
    }
    let missing = if pizza.base.is_empty() {
        "base"
    } else if pizza.sauce.is_empty() {
        "sauce"
    } else {
        "cheese"
    };
    Err(AppError::validation(format!("No {missing} selected")))
}

/// POST /payment/create-order - create a gateway intent and a local
/// pending order
///
/// The gateway is called before anything is persisted, so a gateway
/// failure leaves no orphaned local record.
pub async fn create_order(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<CreateOrderRequest>,
) -> AppResult<Json<CreateOrderResponse>> {
    payload.validate()?;
    validate_selection(&payload.pizza)?;

    // The total must equal the deterministic price of the selection
    let expected = calculate_price(&payload.pizza);
    if (payload.amount - expected).abs() > AMOUNT_EPSILON {
        return Err(AppError::validation(format!(
            "Amount {:.2} does not match the price of the selection ({:.2})",
            payload.amount, expected
        )));
    }

    let receipt = format!("receipt_{}", now_millis());
    let gateway_order = state
        .gateway
        .create_order(to_minor_units(payload.amount), CURRENCY, &receipt)
        .await?;

    let repo = OrderRepository::new(state.db.clone());
    let order = repo
        .create(
            &user.id,
            payload.pizza,
            payload.amount,
            gateway_order.id.clone(),
        )
        .await
        .map_err(AppError::from)?;

    tracing::info!(
        order_id = %order.id,
        gateway_order_id = %gateway_order.id,
        amount = payload.amount,
        "Order created"
    );

    Ok(Json(CreateOrderResponse {
        order_id: gateway_order.id,
        amount: gateway_order.amount,
        currency: gateway_order.currency,
        db_order_id: order.id.key().to_string(),
    }))
}

/// POST /payment/verify-payment - reconcile a completed payment
///
/// On signature match the order moves to `received` and inventory is
/// decremented; on mismatch nothing is mutated and the order stays
/// `pending`.
pub async fn verify_payment(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<VerifyPaymentRequest>,
) -> AppResult<Json<VerifyPaymentResponse>> {
    let orders = OrderRepository::new(state.db.clone());
    let order = orders
        .find_by_id(&payload.db_order_id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::not_found(format!("Order {} not found", payload.db_order_id)))?;

    if !user.is_admin() && order.user_id.key().to_string() != user.id {
        return Err(AppError::forbidden("Order belongs to another user"));
    }

    if order.razorpay_order_id != payload.razorpay_order_id {
        return Err(AppError::validation(
            "Gateway order id does not match this order",
        ));
    }

    if !verify_signature(
        state.payment_secret(),
        &payload.razorpay_order_id,
        &payload.razorpay_payment_id,
        &payload.razorpay_signature,
    ) {
        tracing::warn!(
            target: "security",
            order_id = %order.id,
            gateway_order_id = %payload.razorpay_order_id,
            "Payment signature mismatch"
        );
        return Err(AppError::SignatureMismatch);
    }

    // A replayed verification (e.g. a client retry) is acknowledged
    // without running the finalization again, so stock is only
    // consumed once per order.
    if order.status != OrderStatus::Pending {
        return Ok(Json(VerifyPaymentResponse {
            message: "Payment verified successfully".to_string(),
            order_id: order.id.key().to_string(),
        }));
    }

    let order = orders
        .attach_payment(
            &payload.db_order_id,
            payload.razorpay_payment_id.clone(),
            payload.razorpay_signature.clone(),
        )
        .await
        .map_err(AppError::from)?;

    let inventory = InventoryRepository::new(state.db.clone());
    consume_selection(&inventory, state.notifier.as_ref(), &order.pizza)
        .await
        .map_err(AppError::from)?;

    tracing::info!(
        order_id = %order.id,
        payment_id = %payload.razorpay_payment_id,
        "Payment verified"
    );

    Ok(Json(VerifyPaymentResponse {
        message: "Payment verified successfully".to_string(),
        order_id: order.id.key().to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api;
    use crate::core::state::testing::test_state;
    use crate::db::DbService;
    use crate::inventory::testing::CapturingNotifier;
    use crate::payment::{expected_signature, GatewayError, GatewayOrder, PaymentGateway};
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::Router;
    use http::{header, Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use shared::catalog::IngredientCategory;
    use shared::pizza::OrderStatus;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tower::ServiceExt;

    struct MockGateway {
        fail: bool,
        calls: AtomicUsize,
    }

    impl MockGateway {
        fn ok() -> Self {
            Self {
                fail: false,
                calls: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl PaymentGateway for MockGateway {
        async fn create_order(
            &self,
            amount_minor: i64,
            currency: &str,
            _receipt: &str,
        ) -> Result<GatewayOrder, GatewayError> {
            let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if self.fail {
                return Err(GatewayError::Rejected {
                    status: reqwest::StatusCode::BAD_GATEWAY,
                    body: "gateway down".to_string(),
                });
            }
            Ok(GatewayOrder {
                id: format!("order_MOCK{n}"),
                amount: amount_minor,
                currency: currency.to_string(),
            })
        }
    }

    struct TestHarness {
        app: Router,
        state: crate::core::ServerState,
        notifier: Arc<CapturingNotifier>,
    }

    async fn harness(gateway: Arc<dyn PaymentGateway>) -> TestHarness {
        let notifier = Arc::new(CapturingNotifier::new());
        let state = test_state(gateway, notifier.clone()).await;

        // Seed the default stock so decrements are observable
        DbService {
            db: state.db.clone(),
        }
        .seed_inventory_if_empty()
        .await
        .unwrap();

        let app = api::build_app(&state).with_state(state.clone());
        TestHarness {
            app,
            state,
            notifier,
        }
    }

    fn bearer(state: &crate::core::ServerState, user_id: &str, role: &str) -> String {
        let token = state
            .jwt_service
            .generate_token(user_id, "user@test.com", role)
            .unwrap();
        format!("Bearer {token}")
    }

    fn pizza_json() -> Value {
        json!({
            "base": "Thin Crust",
            "sauce": "Marinara",
            "cheese": "Mozzarella",
            "veggies": ["Mushrooms", "Onions"],
            "meat": ["Pepperoni"]
        })
    }

    async fn post_json(app: &Router, uri: &str, auth: Option<&str>, body: Value) -> (StatusCode, Value) {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json");
        if let Some(auth) = auth {
            builder = builder.header(header::AUTHORIZATION, auth);
        }
        let request = builder.body(Body::from(body.to_string())).unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn remaining(state: &crate::core::ServerState, category: IngredientCategory, item: &str) -> i64 {
        let repo = InventoryRepository::new(state.db.clone());
        repo.find_by_category(category)
            .await
            .unwrap()
            .unwrap()
            .items[item]
    }

    #[tokio::test]
    async fn create_and_verify_finalizes_the_order() {
        let h = harness(Arc::new(MockGateway::ok())).await;
        let auth = bearer(&h.state, "u1", "user");

        let (status, body) = post_json(
            &h.app,
            "/payment/create-order",
            Some(&auth),
            json!({ "amount": 14.99, "pizza": pizza_json() }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["orderId"], "order_MOCK1");
        assert_eq!(body["amount"], 1499);
        assert_eq!(body["currency"], "INR");
        let db_order_id = body["dbOrderId"].as_str().unwrap().to_string();

        // The local order exists and is pending
        let orders = OrderRepository::new(h.state.db.clone());
        let order = orders.find_by_id(&db_order_id).await.unwrap().unwrap();
        assert_eq!(order.status, OrderStatus::Pending);

        let signature =
            expected_signature(h.state.payment_secret(), "order_MOCK1", "pay_TEST1");
        let (status, body) = post_json(
            &h.app,
            "/payment/verify-payment",
            Some(&auth),
            json!({
                "razorpay_order_id": "order_MOCK1",
                "razorpay_payment_id": "pay_TEST1",
                "razorpay_signature": signature,
                "dbOrderId": db_order_id,
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Payment verified successfully");

        let order = orders.find_by_id(&db_order_id).await.unwrap().unwrap();
        assert_eq!(order.status, OrderStatus::Received);
        assert_eq!(order.razorpay_payment_id.as_deref(), Some("pay_TEST1"));

        // Each ingredient decremented by one
        assert_eq!(remaining(&h.state, IngredientCategory::Bases, "thin").await, 49);
        assert_eq!(remaining(&h.state, IngredientCategory::Sauces, "marinara").await, 99);
        assert_eq!(remaining(&h.state, IngredientCategory::Cheeses, "mozzarella").await, 199);
        assert_eq!(remaining(&h.state, IngredientCategory::Veggies, "mushrooms").await, 149);
        assert_eq!(remaining(&h.state, IngredientCategory::Veggies, "onions").await, 179);
        assert_eq!(remaining(&h.state, IngredientCategory::Meats, "pepperoni").await, 99);

        // glutenfree sits at exactly its threshold in the seed; the
        // strictly-below rule means no alert yet
        assert_eq!(*h.notifier.calls.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn replayed_verification_consumes_stock_only_once() {
        let h = harness(Arc::new(MockGateway::ok())).await;
        let auth = bearer(&h.state, "u1", "user");

        let (_, body) = post_json(
            &h.app,
            "/payment/create-order",
            Some(&auth),
            json!({ "amount": 14.99, "pizza": pizza_json() }),
        )
        .await;
        let db_order_id = body["dbOrderId"].as_str().unwrap().to_string();

        let signature =
            expected_signature(h.state.payment_secret(), "order_MOCK1", "pay_TEST1");
        let payload = json!({
            "razorpay_order_id": "order_MOCK1",
            "razorpay_payment_id": "pay_TEST1",
            "razorpay_signature": signature,
            "dbOrderId": db_order_id,
        });

        let (status, _) =
            post_json(&h.app, "/payment/verify-payment", Some(&auth), payload.clone()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(remaining(&h.state, IngredientCategory::Bases, "thin").await, 49);

        // A client retry of the same verification is acknowledged but
        // must not decrement again
        let (status, body) =
            post_json(&h.app, "/payment/verify-payment", Some(&auth), payload).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Payment verified successfully");
        assert_eq!(remaining(&h.state, IngredientCategory::Bases, "thin").await, 49);
        assert_eq!(remaining(&h.state, IngredientCategory::Meats, "pepperoni").await, 99);

        let orders = OrderRepository::new(h.state.db.clone());
        let order = orders.find_by_id(&db_order_id).await.unwrap().unwrap();
        assert_eq!(order.status, OrderStatus::Received);
    }

    #[tokio::test]
    async fn bad_signature_leaves_order_pending_and_stock_untouched() {
        let h = harness(Arc::new(MockGateway::ok())).await;
        let auth = bearer(&h.state, "u1", "user");

        let (_, body) = post_json(
            &h.app,
            "/payment/create-order",
            Some(&auth),
            json!({ "amount": 14.99, "pizza": pizza_json() }),
        )
        .await;
        let db_order_id = body["dbOrderId"].as_str().unwrap().to_string();

        let (status, body) = post_json(
            &h.app,
            "/payment/verify-payment",
            Some(&auth),
            json!({
                "razorpay_order_id": "order_MOCK1",
                "razorpay_payment_id": "pay_TEST1",
                "razorpay_signature": "0000000000000000000000000000000000000000000000000000000000000000",
                "dbOrderId": db_order_id,
            }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid signature");

        let orders = OrderRepository::new(h.state.db.clone());
        let order = orders.find_by_id(&db_order_id).await.unwrap().unwrap();
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.razorpay_payment_id, None);
        assert_eq!(remaining(&h.state, IngredientCategory::Bases, "thin").await, 50);
    }

    #[tokio::test]
    async fn gateway_failure_leaves_no_local_order() {
        let h = harness(Arc::new(MockGateway::failing())).await;
        let auth = bearer(&h.state, "u1", "user");

        let (status, _) = post_json(
            &h.app,
            "/payment/create-order",
            Some(&auth),
            json!({ "amount": 14.99, "pizza": pizza_json() }),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

        let orders = OrderRepository::new(h.state.db.clone());
        assert!(orders.find_by_user("u1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn mismatched_amount_is_rejected_before_the_gateway() {
        let h = harness(Arc::new(MockGateway::ok())).await;
        let auth = bearer(&h.state, "u1", "user");

        let (status, _) = post_json(
            &h.app,
            "/payment/create-order",
            Some(&auth),
            json!({ "amount": 9.99, "pizza": pizza_json() }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let orders = OrderRepository::new(h.state.db.clone());
        assert!(orders.find_by_user("u1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn incomplete_selection_is_rejected() {
        let h = harness(Arc::new(MockGateway::ok())).await;
        let auth = bearer(&h.state, "u1", "user");

        let (status, body) = post_json(
            &h.app,
            "/payment/create-order",
            Some(&auth),
            json!({ "amount": 8.99, "pizza": { "base": "", "sauce": "Marinara", "cheese": "Feta" } }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "No base selected");
    }

    #[tokio::test]
    async fn checkout_requires_a_token() {
        let h = harness(Arc::new(MockGateway::ok())).await;

        let (status, _) = post_json(
            &h.app,
            "/payment/create-order",
            None,
            json!({ "amount": 14.99, "pizza": pizza_json() }),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn verifying_someone_elses_order_is_forbidden() {
        let h = harness(Arc::new(MockGateway::ok())).await;
        let owner = bearer(&h.state, "u1", "user");
        let intruder = bearer(&h.state, "u2", "user");

        let (_, body) = post_json(
            &h.app,
            "/payment/create-order",
            Some(&owner),
            json!({ "amount": 14.99, "pizza": pizza_json() }),
        )
        .await;
        let db_order_id = body["dbOrderId"].as_str().unwrap().to_string();

        let signature =
            expected_signature(h.state.payment_secret(), "order_MOCK1", "pay_TEST1");
        let (status, _) = post_json(
            &h.app,
            "/payment/verify-payment",
            Some(&intruder),
            json!({
                "razorpay_order_id": "order_MOCK1",
                "razorpay_payment_id": "pay_TEST1",
                "razorpay_signature": signature,
                "dbOrderId": db_order_id,
            }),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }
}
