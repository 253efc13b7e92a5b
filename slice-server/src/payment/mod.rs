//! Payment module
//!
//! Gateway client for creating payment intents and the signature check
//! that reconciles a completed payment with its local order.

pub mod gateway;
pub mod signature;

pub use gateway::{GatewayError, GatewayOrder, PaymentGateway, RazorpayClient, RazorpayConfig};
pub use signature::{expected_signature, verify_signature};

/// Fixed settlement currency
pub const CURRENCY: &str = "INR";

/// Convert a major-unit amount to the gateway's minor unit (paise)
pub fn to_minor_units(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}
