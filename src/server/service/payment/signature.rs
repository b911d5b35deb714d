//! Webhook signature checks for the supported payment providers.

use hmac::{Hmac, Mac};
use sha2::{Sha256, Sha512};

type HmacSha256 = Hmac<Sha256>;
type HmacSha512 = Hmac<Sha512>;

pub const PAYSTACK_HEADER: &str = "x-paystack-signature";
pub const FLUTTERWAVE_HEADER: &str = "verif-hash";
pub const STRIPE_HEADER: &str = "stripe-signature";

/// Maximum age of a Stripe signature timestamp, in seconds.
pub const STRIPE_TOLERANCE_SECONDS: i64 = 300;

/// Hex HMAC-SHA512 of the body, as sent by Paystack.
pub fn paystack_signature(secret: &str, body: &[u8]) -> Option<String> {
    let mut mac = HmacSha512::new_from_slice(secret.as_bytes()).ok()?;
    mac.update(body);

    Some(hex::encode(mac.finalize().into_bytes()))
}

pub fn verify_paystack(secret: &str, body: &[u8], signature: &str) -> bool {
    let Some(expected) = paystack_signature(secret, body) else {
        return false;
    };

    constant_time_eq(
        expected.as_bytes(),
        signature.trim().to_ascii_lowercase().as_bytes(),
    )
}

/// Flutterwave sends the configured secret hash verbatim.
pub fn verify_flutterwave(secret_hash: &str, header: &str) -> bool {
    constant_time_eq(secret_hash.as_bytes(), header.trim().as_bytes())
}

/// Hex HMAC-SHA256 of `"<timestamp>.<body>"`, as sent by Stripe in `v1`.
pub fn stripe_signature(secret: &str, timestamp: i64, body: &[u8]) -> Option<String> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).ok()?;
    mac.update(timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(body);

    Some(hex::encode(mac.finalize().into_bytes()))
}

/// Checks a `Stripe-Signature: t=<ts>,v1=<hex>[,v1=<hex>]` header.
///
/// Any `v1` entry may match. The timestamp must lie within
/// [`STRIPE_TOLERANCE_SECONDS`] of `now` in either direction.
pub fn verify_stripe(secret: &str, body: &[u8], header: &str, now: i64) -> bool {
    let mut timestamp = None;
    let mut signatures = Vec::new();
    for part in header.split(',') {
        match part.trim().split_once('=') {
            Some(("t", value)) => timestamp = value.parse::<i64>().ok(),
            Some(("v1", value)) => signatures.push(value),
            _ => {}
        }
    }

    let Some(timestamp) = timestamp else {
        return false;
    };
    if (now - timestamp).abs() > STRIPE_TOLERANCE_SECONDS {
        return false;
    }

    let Some(expected) = stripe_signature(secret, timestamp, body) else {
        return false;
    };

    signatures
        .iter()
        .any(|s| constant_time_eq(expected.as_bytes(), s.as_bytes()))
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &[u8] = br#"{"event":"charge.success","data":{"reference":"ref-1"}}"#;

    #[test]
    fn paystack_accepts_own_signature() {
        let signature = paystack_signature("sk_test", BODY).unwrap();

        assert_eq!(signature.len(), 128);
        assert!(verify_paystack("sk_test", BODY, &signature));
        assert!(verify_paystack(
            "sk_test",
            BODY,
            &signature.to_ascii_uppercase()
        ));
    }

    #[test]
    fn paystack_rejects_tampered_body() {
        let signature = paystack_signature("sk_test", BODY).unwrap();

        assert!(!verify_paystack("sk_test", b"{\"event\":\"x\"}", &signature));
        assert!(!verify_paystack("other", BODY, &signature));
        assert!(!verify_paystack("sk_test", BODY, ""));
    }

    #[test]
    fn flutterwave_compares_hash() {
        assert!(verify_flutterwave("hash-123", "hash-123"));
        assert!(!verify_flutterwave("hash-123", "hash-124"));
        assert!(!verify_flutterwave("hash-123", ""));
    }

    #[test]
    fn stripe_accepts_fresh_signature() {
        let signature = stripe_signature("whsec_test", 1_700_000_000, BODY).unwrap();
        let header = format!("t=1700000000,v1={}", signature);

        assert!(verify_stripe("whsec_test", BODY, &header, 1_700_000_100));
    }

    #[test]
    fn stripe_accepts_any_v1_entry() {
        let signature = stripe_signature("whsec_test", 1_700_000_000, BODY).unwrap();
        let header = format!("t=1700000000,v1=deadbeef,v1={},v0=abc", signature);

        assert!(verify_stripe("whsec_test", BODY, &header, 1_700_000_000));
    }

    #[test]
    fn stripe_rejects_stale_or_tampered() {
        let signature = stripe_signature("whsec_test", 1_700_000_000, BODY).unwrap();
        let header = format!("t=1700000000,v1={}", signature);

        assert!(!verify_stripe("whsec_test", BODY, &header, 1_700_000_301));
        assert!(!verify_stripe("whsec_test", b"{}", &header, 1_700_000_000));
        assert!(!verify_stripe("whsec_test", BODY, "v1=abc", 1_700_000_000));
        assert!(!verify_stripe("whsec_test", BODY, "garbage", 1_700_000_000));
    }
}
