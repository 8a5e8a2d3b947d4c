//! Test utilities for the Cryptomus client.
//!
//! This module provides:
//! - [`MockTransport`], an in-memory [`crate::HttpTransport`] that records
//!   requests and replays canned responses
//! - fixtures for common response bodies
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use cryptomus_lib::test_utils::{MockTransport, TestFixtures};
//! use cryptomus_lib::{ClientConfig, Cryptomus};
//!
//! let transport = Arc::new(MockTransport::new());
//! transport.push_json(200, &TestFixtures::exchange_rates_envelope());
//!
//! let client = Cryptomus::with_transport(ClientConfig::new("m", "k", ""), transport.clone());
//! let rates = client.list_exchange_rates("USDT").await?;
//! assert_eq!(transport.call_count(), 1);
//! ```

mod fixtures;
mod mock_transport;

pub use fixtures::TestFixtures;
pub use mock_transport::MockTransport;
