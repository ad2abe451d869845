//! Webhook signature verification.
//!
//! Both Shopify and WooCommerce sign webhook deliveries with HMAC-SHA256
//! over the exact raw request bytes, base64-encoded into a header. The
//! body must be verified as received — re-serializing the JSON can change
//! byte layout and break the comparison.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

type HmacSha256 = Hmac<Sha256>;

/// Verify a base64-encoded HMAC-SHA256 signature over `raw_body`.
///
/// Returns `false` for any mismatch, an empty secret, or a header that is
/// not valid base64. Never errors: verification failure is a boundary
/// rejection, not an exceptional condition. The underlying comparison is
/// constant-time (`Mac::verify_slice`).
pub fn verify_hmac_base64(secret: &str, raw_body: &[u8], signature_header: &str) -> bool {
    if secret.is_empty() {
        return false;
    }

    let Ok(expected) = STANDARD.decode(signature_header.trim()) else {
        return false;
    };

    let mut mac = match HmacSha256::new_from_slice(secret.as_bytes()) {
        Ok(mac) => mac,
        Err(_) => return false,
    };
    mac.update(raw_body);
    mac.verify_slice(&expected).is_ok()
}

/// Compute the base64-encoded HMAC-SHA256 signature for a payload.
///
/// Counterpart of [`verify_hmac_base64`]; used by tests and by any future
/// outbound delivery path that needs to sign payloads the same way.
pub fn compute_hmac_base64(secret: &str, raw_body: &[u8]) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(raw_body);
    STANDARD.encode(mac.finalize().into_bytes())
}
