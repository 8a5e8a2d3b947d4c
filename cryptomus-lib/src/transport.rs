//! HTTP transport abstraction.
//!
//! The dispatcher hands a fully formed [`HttpRequest`] to an [`HttpTransport`]
//! and gets back status, headers and body bytes. Connection handling and
//! timeouts are the transport's business.
//!
//! With the default `http-transport` feature, [`ReqwestTransport`] provides
//! a reqwest-backed implementation.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use crate::Result;

/// HTTP methods used by the API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outbound request, ready to put on the wire.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpRequest {
    /// First header value matching `name` (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

/// Response as read from the wire.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Build a response with no headers.
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    /// Whether the status is 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// First header value matching `name` (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}

/// Performs a single HTTP round trip.
///
/// Implementations must not retry; failures surface as
/// [`crate::CryptomusError::Transport`].
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait HttpTransport: Send + Sync {
    /// Send `request` and read the full response.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse>;
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl<T: HttpTransport + ?Sized> HttpTransport for Arc<T> {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        (**self).send(request).await
    }
}

#[cfg(feature = "http-transport")]
pub use reqwest_transport::ReqwestTransport;

#[cfg(feature = "http-transport")]
mod reqwest_transport {
    use std::time::Duration;

    use async_trait::async_trait;

    use super::{HttpMethod, HttpRequest, HttpResponse, HttpTransport};
    use crate::{CryptomusError, Result};

    /// reqwest-backed transport with a per-request timeout.
    #[derive(Clone, Debug)]
    pub struct ReqwestTransport {
        client: reqwest::Client,
        /// `None` when the wrapped client was configured elsewhere.
        timeout_secs: Option<u64>,
    }

    impl ReqwestTransport {
        /// Create a transport whose requests time out after `timeout_secs`.
        ///
        /// Fails with [`CryptomusError::Config`] when `timeout_secs` is zero.
        pub fn new(timeout_secs: u64) -> Result<Self> {
            if timeout_secs == 0 {
                return Err(CryptomusError::Config(
                    "request timeout must be at least 1 second".to_string(),
                ));
            }

            let client = reqwest::Client::builder()
                .timeout(Duration::from_secs(timeout_secs))
                .build()
                .map_err(|e| {
                    CryptomusError::Config(format!("Failed to build HTTP client: {}", e))
                })?;

            Ok(Self {
                client,
                timeout_secs: Some(timeout_secs),
            })
        }

        /// Wrap an existing reqwest client; its own timeout settings apply.
        pub fn from_client(client: reqwest::Client) -> Self {
            Self {
                client,
                timeout_secs: None,
            }
        }

        /// Map reqwest errors to CryptomusError.
        fn map_reqwest_error(&self, url: &str, e: reqwest::Error) -> CryptomusError {
            if e.is_timeout() {
                match self.timeout_secs {
                    Some(secs) => CryptomusError::Transport(format!(
                        "request to {} timed out after {}s: {}",
                        url, secs, e
                    )),
                    None => {
                        CryptomusError::Transport(format!("request to {} timed out: {}", url, e))
                    }
                }
            } else if e.is_connect() {
                CryptomusError::Transport(format!("connection to {} failed: {}", url, e))
            } else {
                CryptomusError::Transport(format!("HTTP request failed: {}", e))
            }
        }
    }

    #[cfg_attr(not(target_arch = "wasm32"), async_trait)]
    #[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
    impl HttpTransport for ReqwestTransport {
        async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
            let mut builder = match request.method {
                HttpMethod::Get => self.client.get(&request.url),
                HttpMethod::Post => self.client.post(&request.url),
            };

            for (name, value) in &request.headers {
                builder = builder.header(name.as_str(), value.as_str());
            }

            if !request.body.is_empty() {
                builder = builder.body(request.body);
            }

            let response = builder
                .send()
                .await
                .map_err(|e| self.map_reqwest_error(&request.url, e))?;

            let status = response.status().as_u16();
            let headers = response
                .headers()
                .iter()
                .filter_map(|(name, value)| {
                    value
                        .to_str()
                        .ok()
                        .map(|v| (name.as_str().to_string(), v.to_string()))
                })
                .collect();
            let body = response
                .bytes()
                .await
                .map_err(|e| self.map_reqwest_error(&request.url, e))?
                .to_vec();

            Ok(HttpResponse {
                status,
                headers,
                body,
            })
        }
    }
}
