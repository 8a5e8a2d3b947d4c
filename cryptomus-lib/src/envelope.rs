//! The `state`/`result`/`errors` envelope wrapping every API response.

use serde::de::{DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::Value;

use crate::errors::ValidationErrors;
use crate::{CryptomusError, Result};

/// Decoded response envelope.
///
/// `result` is kept as raw JSON until `state` has been checked, so failure
/// envelopes whose `result` does not fit the success shape still report the
/// server's state and errors.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct ResponseEnvelope {
    /// 0 on success, nonzero on logical failure.
    pub state: i64,

    /// Operation-specific payload.
    #[serde(default)]
    pub result: Option<Value>,

    /// Field name → validation messages.
    #[serde(default, deserialize_with = "lenient_errors")]
    pub errors: ValidationErrors,
}

impl ResponseEnvelope {
    /// Parse an envelope from a 2xx body.
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        serde_json::from_slice(body).map_err(CryptomusError::decode)
    }

    /// Resolve the envelope into the typed result or the matching error.
    pub fn into_result<T: DeserializeOwned>(self) -> Result<T> {
        if self.state != 0 {
            if !self.errors.is_empty() {
                return Err(CryptomusError::RemoteValidation {
                    status: None,
                    errors: self.errors,
                });
            }
            return Err(CryptomusError::RemoteState { state: self.state });
        }

        match self.result {
            None | Some(Value::Null) => Err(CryptomusError::EmptyResult),
            Some(result) => serde_json::from_value(result).map_err(CryptomusError::decode),
        }
    }
}

/// Best-effort body of a non-2xx response.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ErrorBody {
    /// Human-readable reason, when the server sent one.
    #[serde(default)]
    pub message: Option<String>,

    /// Field name → messages; empty when absent or not a map.
    #[serde(default, deserialize_with = "lenient_errors")]
    pub errors: ValidationErrors,
}

impl ErrorBody {
    /// Turn a non-success status and its body into an error.
    pub fn into_error(status: u16, body: &[u8]) -> CryptomusError {
        match serde_json::from_slice::<ErrorBody>(body) {
            Ok(parsed) if !parsed.errors.is_empty() => CryptomusError::RemoteValidation {
                status: Some(status),
                errors: parsed.errors,
            },
            Ok(ErrorBody {
                message: Some(message),
                ..
            }) if !message.trim().is_empty() => CryptomusError::RemoteStatus {
                status,
                message: Some(message),
            },
            _ => CryptomusError::RemoteStatus {
                status,
                message: None,
            },
        }
    }
}

/// Accepts `null`, `[]`, or an object whose members are a string or a list
/// of strings.
fn lenient_errors<'de, D>(deserializer: D) -> std::result::Result<ValidationErrors, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let mut errors = ValidationErrors::new();

    if let Some(Value::Object(fields)) = value {
        for (field, messages) in fields {
            let messages = match messages {
                Value::String(message) => vec![message],
                Value::Array(items) => items
                    .into_iter()
                    .map(|item| match item {
                        Value::String(message) => message,
                        other => other.to_string(),
                    })
                    .collect(),
                Value::Null => continue,
                other => vec![other.to_string()],
            };
            errors.insert(field, messages);
        }
    }

    Ok(errors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq, Deserialize)]
    struct Item {
        id: u32,
        name: String,
    }

    #[test]
    fn test_success_returns_result() {
        let envelope = ResponseEnvelope::from_slice(br#"{"state":0,"result":{"id":7,"name":"x"}}"#)
            .unwrap();
        let item: Item = envelope.into_result().unwrap();
        assert_eq!(
            item,
            Item {
                id: 7,
                name: "x".to_string()
            }
        );
    }

    #[test]
    fn test_success_without_result() {
        for body in [&br#"{"state":0,"result":null}"#[..], br#"{"state":0}"#] {
            let err = ResponseEnvelope::from_slice(body)
                .unwrap()
                .into_result::<Item>()
                .unwrap_err();
            assert!(matches!(err, CryptomusError::EmptyResult));
        }
    }

    #[test]
    fn test_nonzero_state_with_errors() {
        let body = br#"{"state":1,"errors":{"amount":["must be positive"]}}"#;
        let err = ResponseEnvelope::from_slice(body)
            .unwrap()
            .into_result::<Item>()
            .unwrap_err();
        match err {
            CryptomusError::RemoteValidation { status, errors } => {
                assert_eq!(status, None);
                assert_eq!(errors["amount"], vec!["must be positive".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_nonzero_state_without_errors() {
        for body in [
            &br#"{"state":1,"result":null}"#[..],
            br#"{"state":2,"errors":{}}"#,
            br#"{"state":3,"errors":[]}"#,
            br#"{"state":4,"result":[]}"#,
        ] {
            let err = ResponseEnvelope::from_slice(body)
                .unwrap()
                .into_result::<Item>()
                .unwrap_err();
            assert!(matches!(err, CryptomusError::RemoteState { .. }), "{err}");
        }
    }

    #[test]
    fn test_shape_mismatch_is_decode_error() {
        let err = ResponseEnvelope::from_slice(br#"{"state":0,"result":{"id":"seven"}}"#)
            .unwrap()
            .into_result::<Item>()
            .unwrap_err();
        assert!(matches!(err, CryptomusError::Decode(_)));

        assert!(matches!(
            ResponseEnvelope::from_slice(b"<html>"),
            Err(CryptomusError::Decode(_))
        ));
        assert!(matches!(
            ResponseEnvelope::from_slice(br#"{"result":null}"#),
            Err(CryptomusError::Decode(_))
        ));
    }

    #[test]
    fn test_error_body_variants() {
        let err = ErrorBody::into_error(422, br#"{"state":1,"errors":{"uuid":"is invalid"}}"#);
        assert_eq!(err.status(), Some(422));
        assert_eq!(
            err.validation_errors().unwrap()["uuid"],
            vec!["is invalid".to_string()]
        );

        let err = ErrorBody::into_error(401, br#"{"message":"Unauthorized"}"#);
        match err {
            CryptomusError::RemoteStatus { status, message } => {
                assert_eq!(status, 401);
                assert_eq!(message.as_deref(), Some("Unauthorized"));
            }
            other => panic!("unexpected error: {other}"),
        }

        let err = ErrorBody::into_error(502, b"Bad Gateway");
        assert!(matches!(
            err,
            CryptomusError::RemoteStatus {
                status: 502,
                message: None
            }
        ));
    }
}
