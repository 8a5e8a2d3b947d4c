//! Client identity and configuration.
//!
//! # Environment Variables
//!
//! [`ClientConfig::from_env`] reads:
//! - `CRYPTOMUS_MERCHANT_ID` - merchant identifier sent in the `merchant` header
//! - `CRYPTOMUS_PAYMENT_KEY` - secret key for payment operations
//! - `CRYPTOMUS_PAYOUT_KEY` - secret key for payout operations
//! - `CRYPTOMUS_BASE_URL` - API root (default [`DEFAULT_BASE_URL`])
//! - `CRYPTOMUS_TIMEOUT_SECS` - request timeout in seconds (default 30)

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{CryptomusError, Result};

/// Production API root.
pub const DEFAULT_BASE_URL: &str = "https://api.cryptomus.com/v1";

/// API surface a secret key belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiSurface {
    /// Payment operations (invoices, recurrences, exchange rates).
    #[default]
    Payment,
    /// Payout operations.
    Payout,
}

impl ApiSurface {
    /// Name used in configuration and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Payment => "payment",
            Self::Payout => "payout",
        }
    }
}

impl fmt::Display for ApiSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApiSurface {
    type Err = CryptomusError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "payment" => Ok(Self::Payment),
            "payout" => Ok(Self::Payout),
            other => Err(CryptomusError::invalid_data(
                "surface",
                format!("unknown API surface '{}', expected payment or payout", other),
            )),
        }
    }
}

/// Merchant identity plus transport settings.
///
/// Immutable once handed to [`crate::Cryptomus`]; every request made by that
/// client shares it.
#[derive(Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// API root the endpoint paths are joined onto.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Merchant identifier (opaque).
    #[serde(default)]
    pub merchant_id: String,

    /// Secret key for payment operations.
    #[serde(default)]
    pub payment_api_key: String,

    /// Secret key for payout operations.
    #[serde(default)]
    pub payout_api_key: String,

    /// Request timeout in seconds, honoured by the transport. Must be non-zero.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout() -> u64 {
    30
}

impl ClientConfig {
    /// Create a configuration pointing at the production API.
    pub fn new(
        merchant_id: impl Into<String>,
        payment_api_key: impl Into<String>,
        payout_api_key: impl Into<String>,
    ) -> Self {
        Self {
            base_url: default_base_url(),
            merchant_id: merchant_id.into(),
            payment_api_key: payment_api_key.into(),
            payout_api_key: payout_api_key.into(),
            timeout_secs: default_timeout(),
        }
    }

    /// Override the API root (useful for testing).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Secret key for the given surface.
    pub fn key_for(&self, surface: ApiSurface) -> &str {
        match surface {
            ApiSurface::Payment => &self.payment_api_key,
            ApiSurface::Payout => &self.payout_api_key,
        }
    }

    /// Load configuration from `CRYPTOMUS_*` environment variables.
    ///
    /// Missing credentials become empty strings; signing with an empty key
    /// fails later with [`CryptomusError::EmptyKey`].
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).unwrap_or_default();

        let mut config = Self::new(
            get("CRYPTOMUS_MERCHANT_ID"),
            get("CRYPTOMUS_PAYMENT_KEY"),
            get("CRYPTOMUS_PAYOUT_KEY"),
        );

        if let Some(base_url) = lookup("CRYPTOMUS_BASE_URL").filter(|v| !v.trim().is_empty()) {
            config = config.with_base_url(base_url.trim());
        }

        if let Some(raw) = lookup("CRYPTOMUS_TIMEOUT_SECS") {
            let secs = raw.trim().parse::<u64>().map_err(|e| {
                CryptomusError::Config(format!("CRYPTOMUS_TIMEOUT_SECS '{}': {}", raw, e))
            })?;
            if secs == 0 {
                return Err(CryptomusError::Config(
                    "CRYPTOMUS_TIMEOUT_SECS must be at least 1".to_string(),
                ));
            }
            config = config.with_timeout(secs);
        }

        Ok(config)
    }
}

fn redact(key: &str) -> &'static str {
    if key.is_empty() {
        "<empty>"
    } else {
        "<redacted>"
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("merchant_id", &self.merchant_id)
            .field("payment_api_key", &redact(&self.payment_api_key))
            .field("payout_api_key", &redact(&self.payout_api_key))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_client_config() {
        let config = ClientConfig::new("merchant-1", "pay-key", "payout-key")
            .with_base_url("http://localhost:8080/v1")
            .with_timeout(5);

        assert_eq!(config.base_url, "http://localhost:8080/v1");
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.key_for(ApiSurface::Payment), "pay-key");
        assert_eq!(config.key_for(ApiSurface::Payout), "payout-key");
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::new("m", "", "");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 30);

        let parsed: ClientConfig = serde_json::from_str(r#"{"merchant_id":"m"}"#).unwrap();
        assert_eq!(parsed.base_url, DEFAULT_BASE_URL);
        assert_eq!(parsed.timeout_secs, 30);
        assert!(parsed.payment_api_key.is_empty());
    }

    #[test]
    fn test_debug_redacts_keys() {
        let config = ClientConfig::new("merchant-1", "super-secret", "");
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
        assert!(rendered.contains("<empty>"));
    }

    #[test]
    fn test_from_lookup() {
        let vars: HashMap<&str, &str> = [
            ("CRYPTOMUS_MERCHANT_ID", "merchant-1"),
            ("CRYPTOMUS_PAYMENT_KEY", "pay-key"),
            ("CRYPTOMUS_BASE_URL", " http://127.0.0.1:9000/v1 "),
            ("CRYPTOMUS_TIMEOUT_SECS", "12"),
        ]
        .into_iter()
        .collect();

        let config =
            ClientConfig::from_lookup(|name| vars.get(name).map(|v| v.to_string())).unwrap();
        assert_eq!(config.merchant_id, "merchant-1");
        assert_eq!(config.payment_api_key, "pay-key");
        assert_eq!(config.payout_api_key, "");
        assert_eq!(config.base_url, "http://127.0.0.1:9000/v1");
        assert_eq!(config.timeout_secs, 12);
    }

    #[test]
    fn test_from_lookup_bad_timeout() {
        let err = ClientConfig::from_lookup(|name| {
            (name == "CRYPTOMUS_TIMEOUT_SECS").then(|| "soon".to_string())
        })
        .unwrap_err();
        assert!(matches!(err, CryptomusError::Config(_)));
    }

    #[test]
    fn test_from_lookup_zero_timeout() {
        let err = ClientConfig::from_lookup(|name| {
            (name == "CRYPTOMUS_TIMEOUT_SECS").then(|| "0".to_string())
        })
        .unwrap_err();
        assert!(matches!(err, CryptomusError::Config(_)));
        assert!(err.to_string().contains("CRYPTOMUS_TIMEOUT_SECS"));
    }

    #[test]
    fn test_surface_parse() {
        assert_eq!("payment".parse::<ApiSurface>().unwrap(), ApiSurface::Payment);
        assert_eq!(" Payout ".parse::<ApiSurface>().unwrap(), ApiSurface::Payout);
        assert!("refund".parse::<ApiSurface>().is_err());
    }
}
