use base64::Engine as _;
use chrono::{DateTime, Utc};

use crate::error::AuthError;

/// Decode the JWT `exp` claim without verifying the signature.
///
/// The service's tokens are opaque to the client; this is a best-effort
/// check so a stale token is not sent just to be rejected.
///
/// # Errors
///
/// Returns `AuthError::MalformedToken` if the token is not a JWT or has no
/// usable `exp` claim.
pub fn decode_expiry(jwt: &str) -> Result<DateTime<Utc>, AuthError> {
    let parts: Vec<&str> = jwt.split('.').collect();
    if parts.len() != 3 {
        return Err(AuthError::MalformedToken("invalid JWT format".into()));
    }
    let payload = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(parts[1])
        .map_err(|e| AuthError::MalformedToken(format!("base64 decode failed: {e}")))?;
    let value: serde_json::Value = serde_json::from_slice(&payload)
        .map_err(|e| AuthError::MalformedToken(format!("JSON parse failed: {e}")))?;
    let exp = value["exp"]
        .as_i64()
        .ok_or_else(|| AuthError::MalformedToken("missing exp claim".into()))?;
    DateTime::from_timestamp(exp, 0)
        .ok_or_else(|| AuthError::MalformedToken("invalid exp timestamp".into()))
}

/// Whether the token expires within `buffer_secs`.
///
/// Tokens whose expiry cannot be read are treated as live; the server has
/// the final say.
#[must_use]
pub fn is_expired(jwt: &str, buffer_secs: i64) -> bool {
    decode_expiry(jwt).is_ok_and(|exp| exp.timestamp() - buffer_secs <= Utc::now().timestamp())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_jwt_with_exp(exp: i64) -> String {
        let engine = base64::engine::general_purpose::URL_SAFE_NO_PAD;
        let header = engine.encode(r#"{"alg":"HS256"}"#);
        let payload = engine.encode(format!(r#"{{"sub":"ana","exp":{exp}}}"#));
        let signature = engine.encode("fake_sig");
        format!("{header}.{payload}.{signature}")
    }

    #[test]
    fn decode_expiry_valid_jwt() {
        let future_exp = Utc::now().timestamp() + 3600;
        let dt = decode_expiry(&make_jwt_with_exp(future_exp)).unwrap();
        assert_eq!(dt.timestamp(), future_exp);
    }

    #[test]
    fn decode_expiry_rejects_opaque_tokens() {
        assert!(decode_expiry("not-a-jwt").is_err());
        assert!(decode_expiry("a.b").is_err());
    }

    #[test]
    fn expired_and_live_tokens() {
        let now = Utc::now().timestamp();
        assert!(is_expired(&make_jwt_with_exp(now - 10), 0));
        assert!(!is_expired(&make_jwt_with_exp(now + 3600), 0));
        assert!(is_expired(&make_jwt_with_exp(now + 30), 60));
    }

    #[test]
    fn unreadable_expiry_counts_as_live() {
        assert!(!is_expired("opaque-session-token", 0));
    }
}
