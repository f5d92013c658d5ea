//! Payment provider integration via REST API (no SDK dependency)
//!
//! Hosted-checkout flow: the panel requests a checkout URL, the customer
//! pays on the provider's page, and the provider confirms through a
//! signed webhook. Plan state only ever changes from verified webhooks.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Maximum accepted webhook age, to prevent replays
const WEBHOOK_MAX_AGE_SECS: i64 = 300;

/// Create a hosted checkout session for a plan subscription; returns the
/// payment page URL.
pub async fn create_checkout_session(
    api_base: &str,
    secret_key: &str,
    tenant_id: &str,
    plan_id: &str,
    customer_email: &str,
    success_url: &str,
    cancel_url: &str,
) -> Result<String, BoxError> {
    let client = reqwest::Client::new();
    let resp: serde_json::Value = client
        .post(format!("{api_base}/checkout/sessions"))
        .basic_auth(secret_key, None::<&str>)
        .form(&[
            ("mode", "subscription"),
            ("customer_email", customer_email),
            ("plan", plan_id),
            ("success_url", success_url),
            ("cancel_url", cancel_url),
            ("metadata[tenant_id]", tenant_id),
            ("metadata[plan_id]", plan_id),
        ])
        .send()
        .await?
        .json()
        .await?;

    resp["url"]
        .as_str()
        .map(String::from)
        .ok_or_else(|| format!("Checkout session creation failed: {resp}").into())
}

/// Verify a webhook signature header of the form `t=<unix>,v1=<hex hmac>`.
///
/// The HMAC-SHA256 is computed over `"{timestamp}.{payload}"` and compared
/// in constant time; events older than 5 minutes are rejected even with a
/// valid signature.
pub fn verify_webhook_signature(
    payload: &[u8],
    sig_header: &str,
    secret: &str,
) -> Result<(), &'static str> {
    verify_with_now(payload, sig_header, secret, chrono::Utc::now().timestamp())
}

fn verify_with_now(
    payload: &[u8],
    sig_header: &str,
    secret: &str,
    now: i64,
) -> Result<(), &'static str> {
    let mut timestamp = "";
    let mut signature = "";
    for part in sig_header.split(',') {
        if let Some(t) = part.strip_prefix("t=") {
            timestamp = t;
        } else if let Some(v) = part.strip_prefix("v1=") {
            signature = v;
        }
    }

    if timestamp.is_empty() || signature.is_empty() {
        return Err("Invalid signature header");
    }

    let signed_payload = format!("{timestamp}.{}", std::str::from_utf8(payload).unwrap_or(""));
    let mut mac =
        Hmac::<Sha256>::new_from_slice(secret.as_bytes()).map_err(|_| "HMAC key error")?;
    mac.update(signed_payload.as_bytes());

    let sig_bytes = hex::decode(signature).map_err(|_| "Invalid signature hex")?;
    mac.verify_slice(&sig_bytes)
        .map_err(|_| "Webhook signature mismatch")?;

    let ts: i64 = timestamp.parse().map_err(|_| "Invalid timestamp")?;
    if (now - ts).abs() > WEBHOOK_MAX_AGE_SECS {
        return Err("Webhook timestamp too old");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "whsec_test";

    fn sign(payload: &[u8], ts: i64, secret: &str) -> String {
        let signed = format!("{ts}.{}", std::str::from_utf8(payload).unwrap());
        let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(signed.as_bytes());
        format!("t={ts},v1={}", hex::encode(mac.finalize().into_bytes()))
    }

    #[test]
    fn test_valid_signature_accepted() {
        let payload = br#"{"type":"checkout.completed"}"#;
        let header = sign(payload, 1_000_000, SECRET);
        assert!(verify_with_now(payload, &header, SECRET, 1_000_000).is_ok());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let payload = br#"{"type":"checkout.completed"}"#;
        let header = sign(payload, 1_000_000, "whsec_other");
        assert_eq!(
            verify_with_now(payload, &header, SECRET, 1_000_000),
            Err("Webhook signature mismatch")
        );
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let payload = br#"{"type":"checkout.completed"}"#;
        let header = sign(payload, 1_000_000, SECRET);
        assert!(verify_with_now(b"{}", &header, SECRET, 1_000_000).is_err());
    }

    #[test]
    fn test_malformed_header_rejected() {
        assert_eq!(
            verify_with_now(b"{}", "garbage", SECRET, 0),
            Err("Invalid signature header")
        );
        assert_eq!(
            verify_with_now(b"{}", "t=123,v1=nothex", SECRET, 0),
            Err("Invalid signature hex")
        );
    }

    #[test]
    fn test_stale_timestamp_rejected() {
        let payload = b"{}";
        let header = sign(payload, 1_000_000, SECRET);
        assert_eq!(
            verify_with_now(payload, &header, SECRET, 1_000_000 + 301),
            Err("Webhook timestamp too old")
        );
        // Just inside the window is fine
        assert!(verify_with_now(payload, &header, SECRET, 1_000_000 + 299).is_ok());
    }
}
