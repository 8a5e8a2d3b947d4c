//! Cryptomus merchant API client.
//!
//! This crate builds signed HTTP requests for the Cryptomus API and decodes
//! its `state`/`result`/`errors` envelopes into typed results. It keeps no
//! state beyond the immutable [`ClientConfig`] and delegates the wire to an
//! injected [`HttpTransport`].
//!
//! # Features
//!
//! - **Signer**: `md5(base64(body) + key)` request signatures and callback
//!   verification ([`sign::sign`], [`sign::verify_sign`])
//! - **Dispatcher**: one signed round trip per call with typed errors
//!   ([`Cryptomus::send`])
//! - **Operations**: recurring payments and exchange rates
//! - **Transport Abstraction**: reqwest by default (`http-transport`), or any
//!   [`HttpTransport`] implementation
//!
//! # Example
//!
//! ```rust,ignore
//! use cryptomus_lib::{ClientConfig, Cryptomus, RecurrenceRequest};
//!
//! let client = Cryptomus::new(ClientConfig::from_env()?)?;
//!
//! for rate in client.list_exchange_rates("USDT").await? {
//!     println!("1 {} = {} {}", rate.from, rate.course, rate.to);
//! }
//!
//! let request = RecurrenceRequest::new("5", "USDT", "Pro plan", "monthly")
//!     .with_order_id("order-42");
//! let recurrence = client.create_recurrence(&request).await?;
//! println!("payer link: {}", recurrence.url);
//! ```

pub mod client;
pub mod config;
pub mod endpoint;
pub mod envelope;
pub mod errors;
pub mod exchange;
pub mod prelude;
pub mod recurrence;
pub mod sign;
pub mod transport;

/// Test utilities for client testing.
///
/// This module is only available with the `test-utils` feature or in test builds.
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use client::Cryptomus;
pub use config::{ApiSurface, ClientConfig, DEFAULT_BASE_URL};
pub use envelope::ResponseEnvelope;
pub use errors::{CryptomusError, CryptomusErrorCode, ValidationErrors};
pub use exchange::ExchangeRate;
pub use recurrence::{Paginate, Recurrence, RecurrenceLookup, RecurrencePage, RecurrenceRequest};
pub use sign::{sign, verify_sign, verify_sign_escaped};
pub use transport::{HttpMethod, HttpRequest, HttpResponse, HttpTransport};

#[cfg(feature = "http-transport")]
pub use transport::ReqwestTransport;

/// Common result alias for Cryptomus operations.
pub type Result<T> = std::result::Result<T, CryptomusError>;
