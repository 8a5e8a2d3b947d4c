//! Prelude module for convenient imports.
//!
//! ```rust,ignore
//! use cryptomus_lib::prelude::*;
//! ```

// Client and configuration
pub use crate::{ApiSurface, ClientConfig, Cryptomus};

// Error handling
pub use crate::errors::{CryptomusError, CryptomusErrorCode};
pub use crate::Result;

// Domain types
pub use crate::{ExchangeRate, Recurrence, RecurrenceLookup, RecurrencePage, RecurrenceRequest};

// Signatures
pub use crate::sign::{sign, verify_sign, verify_sign_escaped};

// Transport
pub use crate::transport::{HttpMethod, HttpRequest, HttpResponse, HttpTransport};

#[cfg(feature = "http-transport")]
pub use crate::transport::ReqwestTransport;
