//! Token claims decoding and expiry checks
//!
//! Tokens are compact three-segment credentials whose middle segment is a
//! base64url-encoded JSON claims record. No signature verification happens
//! client-side; the claims are inspected only for expiry and role. Every
//! malformed input decodes to `None` rather than an error, and expiry checks
//! fail closed: a token we cannot read is a token we treat as expired.

use chrono::Utc;
use serde::Deserialize;

/// Decoded token claims
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Claims {
    /// Subject identity (username)
    #[serde(default)]
    pub sub: Option<String>,

    /// Expiry as epoch seconds
    #[serde(default)]
    pub exp: Option<i64>,

    /// Administrator role flag
    #[serde(default)]
    pub is_admin: bool,
}

/// Decode base64url (URL-safe base64, padding optional)
fn base64_decode_url(input: &str) -> Option<Vec<u8>> {
    use base64::{Engine as _, engine::general_purpose};

    // Base64url uses - instead of + and _ instead of /
    let standard_b64 = input.replace('-', "+").replace('_', "/");

    let padding = match standard_b64.len() % 4 {
        0 => "",
        2 => "==",
        3 => "=",
        _ => return None,
    };

    general_purpose::STANDARD
        .decode(format!("{}{}", standard_b64, padding))
        .ok()
}

/// Decode the claims segment of a token.
///
/// Returns `None` for anything that is not a well-formed three-segment token
/// with a decodable JSON payload: wrong segment count, undecodable base64url,
/// or content that is not a JSON object.
pub fn decode_token(token: &str) -> Option<Claims> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return None;
    }

    let payload = base64_decode_url(parts[1])?;
    serde_json::from_slice(&payload).ok()
}

/// Check whether a token is expired.
///
/// Fail-closed: undecodable claims or a missing `exp` count as expired.
/// The boundary is inclusive, so a token expiring exactly now is expired.
/// The seconds-to-millis conversion saturates, so an absurdly large `exp`
/// reads as far-future rather than panicking on overflow.
pub fn is_token_expired(token: &str) -> bool {
    let exp = match decode_token(token).and_then(|c| c.exp) {
        Some(exp) => exp,
        None => return true,
    };

    exp.saturating_mul(1000) <= Utc::now().timestamp_millis()
}
