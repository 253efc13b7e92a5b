//! Payment signature verification
//!
//! Razorpay signs each completed payment as
//! `hex(HMAC_SHA256(key_secret, "<order_id>|<payment_id>"))` and sends
//! the result back with the redirect. The recipe here has to match the
//! provider contract bit-for-bit.

use ring::constant_time::verify_slices_are_equal;
use ring::hmac;

/// The signature the gateway is expected to have produced
pub fn expected_signature(secret: &str, order_id: &str, payment_id: &str) -> String {
    let key = hmac::Key::new(hmac::HMAC_SHA256, secret.as_bytes());
    let payload = format!("{order_id}|{payment_id}");
    hex::encode(hmac::sign(&key, payload.as_bytes()).as_ref())
}

/// Constant-time check of a supplied signature.
///
/// Malformed input (non-hex, wrong length) is rejected without
/// comparing.
pub fn verify_signature(secret: &str, order_id: &str, payment_id: &str, supplied: &str) -> bool {
    let Ok(supplied_raw) = hex::decode(supplied) else {
        return false;
    };
    let key = hmac::Key::new(hmac::HMAC_SHA256, secret.as_bytes());
    let payload = format!("{order_id}|{payment_id}");
    let tag = hmac::sign(&key, payload.as_bytes());
    verify_slices_are_equal(tag.as_ref(), &supplied_raw).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    // Vectors produced with `printf '<order>|<payment>' |
    //   openssl dgst -sha256 -hmac '<secret>'`
    const SECRET: &str = "test-razorpay-secret";
    const ORDER_ID: &str = "order_QmXzp81Lw9C2aD";
    const PAYMENT_ID: &str = "pay_J8kT0f5Rn3VbYe";
    const SIGNATURE: &str = "5c60ce73bec53c17eea57070d0f1e0e19e9cb52ee5ab7b4e06bb8797597b1721";

    #[test]
    fn matches_the_provider_recipe() {
        assert_eq!(expected_signature(SECRET, ORDER_ID, PAYMENT_ID), SIGNATURE);
        assert_eq!(
            expected_signature("s3cr3t", "abc", "def"),
            "3b1a7a1259de5336c92ca8ed49b61d2945e21e9a79f85fe01277c235a5250af2"
        );
    }

    #[test]
    fn accepts_exactly_the_expected_signature() {
        assert!(verify_signature(SECRET, ORDER_ID, PAYMENT_ID, SIGNATURE));
    }

    #[test]
    fn rejects_any_other_string() {
        // Flipped last nibble
        let mut wrong = SIGNATURE.to_string();
        wrong.pop();
        wrong.push('2');
        assert!(!verify_signature(SECRET, ORDER_ID, PAYMENT_ID, &wrong));

        // Different key
        assert!(!verify_signature("other-secret", ORDER_ID, PAYMENT_ID, SIGNATURE));
        // Swapped ids
        assert!(!verify_signature(SECRET, PAYMENT_ID, ORDER_ID, SIGNATURE));
        // Garbage input must not panic
        assert!(!verify_signature(SECRET, ORDER_ID, PAYMENT_ID, "not-hex"));
        assert!(!verify_signature(SECRET, ORDER_ID, PAYMENT_ID, ""));
        assert!(!verify_signature(SECRET, ORDER_ID, PAYMENT_ID, "deadbeef"));
    }
}
