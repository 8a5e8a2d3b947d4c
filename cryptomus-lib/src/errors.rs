//! Error types for Cryptomus client operations.
//!
//! Every failed call yields exactly one [`CryptomusError`] carrying the
//! context needed to diagnose it (HTTP status, state code or the server's
//! validation map) without re-inspecting the wire trace.

use std::collections::BTreeMap;
use std::fmt;

/// Field name → validation messages, as returned in the `errors` member of
/// a response envelope.
pub type ValidationErrors = BTreeMap<String, Vec<String>>;

/// Stable error codes for FFI and log correlation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum CryptomusErrorCode {
    /// Transport/network layer error
    Transport = 2000,
    /// Empty signing key
    EmptyKey = 3000,
    /// Callback body carries no `sign` field
    MissingSignature = 3001,
    /// Callback signature mismatch
    InvalidSignature = 3002,
    /// Non-success HTTP status
    RemoteStatus = 4000,
    /// Field-level validation failure reported by the server
    RemoteValidation = 4001,
    /// HTTP success with a nonzero state code
    RemoteState = 4002,
    /// Success state without a result payload
    EmptyResult = 4003,
    /// Malformed or unexpected response body
    Decode = 5000,
    /// Request payload could not be encoded
    Serialization = 5001,
    /// Local precondition failed before dispatch
    InvalidData = 5002,
    /// Configuration or client construction error
    Config = 9000,
}

/// Error type for Cryptomus client operations.
#[derive(Debug)]
pub enum CryptomusError {
    /// Network or connection failure. Never retried by this crate.
    Transport(String),

    /// Non-2xx response without a validation map.
    RemoteStatus {
        /// HTTP status code
        status: u16,
        /// `message` from the error body, when one could be decoded
        message: Option<String>,
    },

    /// Server rejected one or more request fields.
    RemoteValidation {
        /// HTTP status code, `None` when the failure arrived with HTTP 2xx
        status: Option<u16>,
        /// Field name → messages
        errors: ValidationErrors,
    },

    /// HTTP succeeded but the envelope reported a nonzero state.
    RemoteState {
        /// Server state code
        state: i64,
    },

    /// Response body is not valid JSON or does not match the expected shape.
    Decode(String),

    /// Envelope reported success but carried no result.
    EmptyResult,

    /// Signing was attempted with an empty secret key.
    EmptyKey,

    /// Callback body has no string-typed `sign` field.
    MissingSignature,

    /// Callback `sign` field does not match the recomputed digest.
    InvalidSignature,

    /// Local precondition failed; nothing was sent.
    InvalidData {
        /// Field or parameter name
        field: String,
        /// Reason for invalidity
        reason: String,
    },

    /// Request payload serialization error.
    Serialization(String),

    /// Configuration error.
    Config(String),
}

impl CryptomusError {
    /// Get the error code.
    pub fn code(&self) -> CryptomusErrorCode {
        match self {
            Self::Transport(_) => CryptomusErrorCode::Transport,
            Self::RemoteStatus { .. } => CryptomusErrorCode::RemoteStatus,
            Self::RemoteValidation { .. } => CryptomusErrorCode::RemoteValidation,
            Self::RemoteState { .. } => CryptomusErrorCode::RemoteState,
            Self::Decode(_) => CryptomusErrorCode::Decode,
            Self::EmptyResult => CryptomusErrorCode::EmptyResult,
            Self::EmptyKey => CryptomusErrorCode::EmptyKey,
            Self::MissingSignature => CryptomusErrorCode::MissingSignature,
            Self::InvalidSignature => CryptomusErrorCode::InvalidSignature,
            Self::InvalidData { .. } => CryptomusErrorCode::InvalidData,
            Self::Serialization(_) => CryptomusErrorCode::Serialization,
            Self::Config(_) => CryptomusErrorCode::Config,
        }
    }

    /// Get the error message as an owned String (useful for FFI).
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// HTTP status attached to the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RemoteStatus { status, .. } => Some(*status),
            Self::RemoteValidation { status, .. } => *status,
            _ => None,
        }
    }

    /// Validation map attached to the error, if any.
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            Self::RemoteValidation { errors, .. } => Some(errors),
            _ => None,
        }
    }

    /// Create a transport error from any error type.
    pub fn transport<E: fmt::Display>(err: E) -> Self {
        Self::Transport(err.to_string())
    }

    /// Create a decode error from any error type.
    pub fn decode<E: fmt::Display>(err: E) -> Self {
        Self::Decode(err.to_string())
    }

    /// Create an invalid data error.
    pub fn invalid_data(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidData {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

fn write_validation_errors(f: &mut fmt::Formatter<'_>, errors: &ValidationErrors) -> fmt::Result {
    let mut first = true;
    for (field, messages) in errors {
        if !first {
            write!(f, "; ")?;
        }
        first = false;
        write!(f, "{}: {}", field, messages.join(", "))?;
    }
    Ok(())
}

impl fmt::Display for CryptomusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(msg) => write!(f, "transport error: {}", msg),
            Self::RemoteStatus { status, message } => match message {
                Some(message) => write!(f, "unexpected HTTP status {}: {}", status, message),
                None => write!(f, "unexpected HTTP status {}", status),
            },
            Self::RemoteValidation { status, errors } => {
                match status {
                    Some(status) => write!(f, "validation errors (HTTP {}): ", status)?,
                    None => write!(f, "validation errors: ")?,
                }
                write_validation_errors(f, errors)
            }
            Self::RemoteState { state } => write!(f, "API returned non-zero state: {}", state),
            Self::Decode(msg) => write!(f, "failed to decode response: {}", msg),
            Self::EmptyResult => write!(f, "API response result is empty"),
            Self::EmptyKey => write!(f, "API key cannot be empty"),
            Self::MissingSignature => write!(f, "missing signature field in request body"),
            Self::InvalidSignature => write!(f, "invalid signature"),
            Self::InvalidData { field, reason } => write!(f, "invalid {}: {}", field, reason),
            Self::Serialization(msg) => write!(f, "serialization error: {}", msg),
            Self::Config(msg) => write!(f, "configuration error: {}", msg),
        }
    }
}

impl std::error::Error for CryptomusError {}

impl From<serde_json::Error> for CryptomusError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = CryptomusError::RemoteState { state: 1 };
        assert_eq!(err.code(), CryptomusErrorCode::RemoteState);
        assert_eq!(err.status(), None);

        let err = CryptomusError::RemoteStatus {
            status: 502,
            message: None,
        };
        assert_eq!(err.code(), CryptomusErrorCode::RemoteStatus);
        assert_eq!(err.status(), Some(502));
    }

    #[test]
    fn test_error_display() {
        let mut errors = ValidationErrors::new();
        errors.insert("amount".to_string(), vec!["must be positive".to_string()]);
        errors.insert(
            "currency".to_string(),
            vec!["is required".to_string(), "is unknown".to_string()],
        );
        let err = CryptomusError::RemoteValidation {
            status: Some(422),
            errors,
        };
        assert_eq!(
            err.to_string(),
            "validation errors (HTTP 422): amount: must be positive; currency: is required, is unknown"
        );

        let err = CryptomusError::RemoteStatus {
            status: 404,
            message: Some("Not found".to_string()),
        };
        assert_eq!(err.to_string(), "unexpected HTTP status 404: Not found");
    }

    #[test]
    fn test_helper_constructors() {
        let err = CryptomusError::invalid_data("uuid", "either uuid or order_id must be provided");
        assert_eq!(err.code(), CryptomusErrorCode::InvalidData);
        assert!(err.to_string().contains("uuid"));

        let err = CryptomusError::transport("connection reset");
        assert_eq!(err.code(), CryptomusErrorCode::Transport);
        assert!(err.validation_errors().is_none());
    }

    #[test]
    fn test_from_serde_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: CryptomusError = json_err.into();
        assert_eq!(err.code(), CryptomusErrorCode::Serialization);
    }
}
