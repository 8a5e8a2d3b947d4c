//! Request and callback signatures.
//!
//! The digest is `md5(base64(body) + secret_key)` rendered as lowercase hex.
//! MD5 is fixed by the remote protocol.

use base64::prelude::*;
use serde_json::{Map, Value};

use crate::{CryptomusError, Result};

/// Name of the signature field in callback bodies and of the request header.
pub const SIGNATURE_FIELD: &str = "sign";

/// Compute the signature for `body` with `secret_key`.
///
/// # Errors
///
/// [`CryptomusError::EmptyKey`] if `secret_key` is empty.
///
/// # Example
///
/// ```
/// use cryptomus_lib::sign::sign;
///
/// let digest = sign("secret", br#"{"amount":"10"}"#).unwrap();
/// assert_eq!(digest.len(), 32);
/// ```
pub fn sign(secret_key: &str, body: &[u8]) -> Result<String> {
    if secret_key.is_empty() {
        return Err(CryptomusError::EmptyKey);
    }

    let mut data = BASE64_STANDARD.encode(body);
    data.push_str(secret_key);

    Ok(format!("{:x}", md5::compute(data.as_bytes())))
}

/// Verify the `sign` field of a callback body.
///
/// The field is removed, the remaining members are re-serialized in the order
/// they were received and the digest of those bytes must equal the provided
/// value exactly.
///
/// Re-serialization writes `/` unescaped. Callbacks whose sender signed a
/// `\/`-escaped rendering (PHP `json_encode` defaults) only verify with
/// [`verify_sign_escaped`].
pub fn verify_sign(secret_key: &str, raw_body: &[u8]) -> Result<()> {
    verify_rendered(secret_key, raw_body, false)
}

/// Like [`verify_sign`], but escapes every `/` as `\/` in the re-serialized
/// body before computing the digest.
pub fn verify_sign_escaped(secret_key: &str, raw_body: &[u8]) -> Result<()> {
    verify_rendered(secret_key, raw_body, true)
}

fn verify_rendered(secret_key: &str, raw_body: &[u8], escape_slashes: bool) -> Result<()> {
    let mut fields: Map<String, Value> = serde_json::from_slice(raw_body)
        .map_err(|e| CryptomusError::decode(format!("callback body is not a JSON object: {}", e)))?;

    let provided = match fields.shift_remove(SIGNATURE_FIELD) {
        Some(Value::String(provided)) => provided,
        _ => return Err(CryptomusError::MissingSignature),
    };

    let mut unsigned = serde_json::to_vec(&fields)?;
    if escape_slashes {
        unsigned = escape_forward_slashes(&unsigned);
    }
    let expected = sign(secret_key, &unsigned)?;

    if provided != expected {
        tracing::warn!(escape_slashes, "callback signature mismatch");
        return Err(CryptomusError::InvalidSignature);
    }

    Ok(())
}

// `/` only appears inside string literals in serde_json output.
fn escape_forward_slashes(json: &[u8]) -> Vec<u8> {
    let mut escaped = Vec::with_capacity(json.len());
    for &byte in json {
        if byte == b'/' {
            escaped.push(b'\\');
        }
        escaped.push(byte);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_known_vector() {
        // base64("") == "", so the digest is md5 of the key alone
        assert_eq!(
            sign("secret", b"").unwrap(),
            format!("{:x}", md5::compute(b"secret"))
        );
        // base64("{}") == "e30="
        assert_eq!(
            sign("key", b"{}").unwrap(),
            format!("{:x}", md5::compute(b"e30=key"))
        );
    }

    #[test]
    fn test_sign_is_lowercase_hex() {
        let digest = sign("k", b"payload").unwrap();
        assert_eq!(digest.len(), 32);
        assert!(digest
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn test_sign_empty_key() {
        assert!(matches!(sign("", b"body"), Err(CryptomusError::EmptyKey)));
        assert!(matches!(sign("", b""), Err(CryptomusError::EmptyKey)));
    }

    #[test]
    fn test_verify_roundtrip() {
        let unsigned = br#"{"type":"payment","uuid":"abc","amount":"10.00","status":"paid"}"#;
        let digest = sign("secret", unsigned).unwrap();
        let body = format!(
            r#"{{"type":"payment","uuid":"abc","amount":"10.00","status":"paid","sign":"{}"}}"#,
            digest
        );
        verify_sign("secret", body.as_bytes()).unwrap();
    }

    #[test]
    fn test_verify_preserves_received_order() {
        // Keys deliberately out of alphabetical order, sign in the middle
        let unsigned = br#"{"uuid":"abc","amount":"1","additional_data":null}"#;
        let digest = sign("secret", unsigned).unwrap();
        let body = format!(
            r#"{{"uuid":"abc","sign":"{}","amount":"1","additional_data":null}}"#,
            digest
        );
        verify_sign("secret", body.as_bytes()).unwrap();
    }

    #[test]
    fn test_verify_wrong_key() {
        let unsigned = br#"{"uuid":"abc"}"#;
        let digest = sign("secret-1", unsigned).unwrap();
        let body = format!(r#"{{"uuid":"abc","sign":"{}"}}"#, digest);
        assert!(matches!(
            verify_sign("secret-2", body.as_bytes()),
            Err(CryptomusError::InvalidSignature)
        ));
    }

    #[test]
    fn test_verify_tampered_body() {
        let digest = sign("secret", br#"{"amount":"1"}"#).unwrap();
        let body = format!(r#"{{"amount":"100","sign":"{}"}}"#, digest);
        assert!(matches!(
            verify_sign("secret", body.as_bytes()),
            Err(CryptomusError::InvalidSignature)
        ));
    }

    #[test]
    fn test_verify_missing_signature() {
        assert!(matches!(
            verify_sign("secret", br#"{"uuid":"abc"}"#),
            Err(CryptomusError::MissingSignature)
        ));
        assert!(matches!(
            verify_sign("secret", br#"{"uuid":"abc","sign":42}"#),
            Err(CryptomusError::MissingSignature)
        ));
    }

    #[test]
    fn test_verify_not_an_object() {
        assert!(matches!(
            verify_sign("secret", b"[1,2,3]"),
            Err(CryptomusError::Decode(_))
        ));
        assert!(matches!(
            verify_sign("secret", b"not json"),
            Err(CryptomusError::Decode(_))
        ));
    }

    #[test]
    fn test_verify_empty_key() {
        assert!(matches!(
            verify_sign("", br#"{"sign":"00"}"#),
            Err(CryptomusError::EmptyKey)
        ));
    }

    #[test]
    fn test_verify_escaped_slashes() {
        // Sender signed the `\/` rendering of the URL
        let unsigned = br#"{"url":"https:\/\/pay.cryptomus.com\/x","status":"paid"}"#;
        let digest = sign("secret", unsigned).unwrap();
        let body = format!(
            r#"{{"url":"https:\/\/pay.cryptomus.com\/x","status":"paid","sign":"{}"}}"#,
            digest
        );

        assert!(matches!(
            verify_sign("secret", body.as_bytes()),
            Err(CryptomusError::InvalidSignature)
        ));
        verify_sign_escaped("secret", body.as_bytes()).unwrap();
    }

    #[test]
    fn test_verify_escaped_rejects_plain_rendering() {
        let unsigned = br#"{"url":"https://pay.cryptomus.com/x"}"#;
        let digest = sign("secret", unsigned).unwrap();
        let body = format!(r#"{{"url":"https://pay.cryptomus.com/x","sign":"{}"}}"#, digest);

        verify_sign("secret", body.as_bytes()).unwrap();
        assert!(matches!(
            verify_sign_escaped("secret", body.as_bytes()),
            Err(CryptomusError::InvalidSignature)
        ));
    }
}
