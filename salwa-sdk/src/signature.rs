//! Signature algorithm for Saleor webhook deliveries.
//!
//! Saleor signs every webhook request body with the app's secret key and
//! puts the result into the `Saleor-Signature` header:
//!
//! ```text
//! Saleor-Signature: hex(HMAC-SHA256(raw_body, webhook_secret))
//! ```
//!
//! The body must be verified byte-for-byte as received, before any JSON
//! parsing takes place.

/// Header carrying the hex-encoded HMAC of the request body.
pub const SIGNATURE_HEADER: &str = "saleor-signature";

/// Header naming the event type of the delivery (e.g. `order_fulfilled`).
pub const EVENT_HEADER: &str = "saleor-event";

/// Header carrying the GraphQL API URL of the Saleor instance that sent the
/// delivery.
pub const API_URL_HEADER: &str = "saleor-api-url";

/// Errors produced by signature operations.
#[derive(Debug, thiserror::Error)]
pub enum SignatureError {
    #[error("invalid hex encoding")]
    InvalidHex(#[from] hex::FromHexError),
    #[error("invalid signature")]
    SignatureMismatch,
}

impl From<ring::error::Unspecified> for SignatureError {
    fn from(_: ring::error::Unspecified) -> Self {
        Self::SignatureMismatch
    }
}

fn hmac_key(secret: &[u8]) -> ring::hmac::Key {
    ring::hmac::Key::new(ring::hmac::HMAC_SHA256, secret)
}

/// Compute the `Saleor-Signature` header value for `body`.
pub fn sign_payload(body: &[u8], secret: &[u8]) -> String {
    let tag = ring::hmac::sign(&hmac_key(secret), body);
    hex::encode(tag.as_ref())
}

/// Verify a `Saleor-Signature` header value against the raw request body.
///
/// Surrounding whitespace and hex letter case are ignored. The comparison
/// itself is constant-time.
pub fn verify_payload(
    header_value: &str,
    body: &[u8],
    secret: &[u8],
) -> Result<(), SignatureError> {
    let signature = hex::decode(header_value.trim())?;
    ring::hmac::verify(&hmac_key(secret), body, &signature)?;
    Ok(())
}
