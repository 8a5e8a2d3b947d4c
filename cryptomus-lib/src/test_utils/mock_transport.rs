//! In-memory transport for tests.

use std::collections::VecDeque;
use std::sync::RwLock;

use async_trait::async_trait;
use serde_json::Value;

use crate::transport::{HttpRequest, HttpResponse, HttpTransport};
use crate::{CryptomusError, Result};

/// Records every request and answers from a queue of canned responses.
///
/// An empty queue answers with a transport error.
#[derive(Debug, Default)]
pub struct MockTransport {
    responses: RwLock<VecDeque<Result<HttpResponse>>>,
    requests: RwLock<Vec<HttpRequest>>,
}

impl MockTransport {
    /// Create a transport with no canned responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a raw response.
    pub fn push_response(&self, response: HttpResponse) {
        self.responses.write().unwrap().push_back(Ok(response));
    }

    /// Queue a response with the given status and raw body.
    pub fn push_body(&self, status: u16, body: impl Into<Vec<u8>>) {
        self.push_response(HttpResponse::new(status, body));
    }

    /// Queue a JSON response.
    pub fn push_json(&self, status: u16, body: &Value) {
        let mut response = HttpResponse::new(status, body.to_string());
        response
            .headers
            .push(("content-type".to_string(), "application/json".to_string()));
        self.push_response(response);
    }

    /// Queue a transport failure.
    pub fn push_error(&self, error: CryptomusError) {
        self.responses.write().unwrap().push_back(Err(error));
    }

    /// All requests seen so far, in order.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.read().unwrap().clone()
    }

    /// Most recent request, if any.
    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests.read().unwrap().last().cloned()
    }

    /// Number of requests seen so far.
    pub fn call_count(&self) -> usize {
        self.requests.read().unwrap().len()
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl HttpTransport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        self.requests.write().unwrap().push(request);
        self.responses
            .write()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(CryptomusError::transport("no canned response queued")))
    }
}
