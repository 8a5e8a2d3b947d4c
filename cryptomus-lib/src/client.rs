//! Request dispatcher.
//!
//! [`Cryptomus`] bundles the client identity with an [`HttpTransport`]. Every
//! domain operation funnels through [`Cryptomus::send_signed`]:
//!
//! 1. interpolate the endpoint template and join it onto the base URL
//! 2. serialize the payload (absent payload = empty body)
//! 3. sign the exact body bytes with the surface key
//! 4. attach `Content-Type`, `merchant` and `sign` headers
//! 5. perform one round trip through the transport
//! 6. decode the envelope into the result or a typed error

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::{ApiSurface, ClientConfig};
use crate::endpoint::{interpolate, join_url};
use crate::envelope::{ErrorBody, ResponseEnvelope};
use crate::sign::{sign, verify_sign, SIGNATURE_FIELD};
use crate::transport::{HttpMethod, HttpRequest, HttpResponse, HttpTransport};
use crate::Result;

#[cfg(feature = "http-transport")]
use crate::transport::ReqwestTransport;

/// Header carrying the merchant identifier.
pub const MERCHANT_HEADER: &str = "merchant";
/// Header carrying the request signature.
pub const SIGN_HEADER: &str = SIGNATURE_FIELD;

/// Cryptomus API client.
///
/// Holds no mutable state; share it by reference across tasks.
#[derive(Debug)]
pub struct Cryptomus<T> {
    config: ClientConfig,
    transport: T,
}

#[cfg(feature = "http-transport")]
impl Cryptomus<ReqwestTransport> {
    /// Create a client over the reqwest transport, honouring
    /// `config.timeout_secs`.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(config.timeout_secs)?;
        Ok(Self::with_transport(config, transport))
    }
}

impl<T: HttpTransport> Cryptomus<T> {
    /// Create a client over an injected transport.
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self { config, transport }
    }

    /// Get the configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Get the transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Verify a callback body received by a webhook receiver, using the key of
    /// the given surface.
    pub fn verify_webhook(&self, surface: ApiSurface, raw_body: &[u8]) -> Result<()> {
        verify_sign(self.config.key_for(surface), raw_body)
    }

    /// Dispatch a request signed with the payment key.
    pub async fn send<P, R>(
        &self,
        method: HttpMethod,
        endpoint_template: &str,
        path_args: &[(&str, &str)],
        payload: Option<&P>,
    ) -> Result<R>
    where
        P: Serialize + Sync + ?Sized,
        R: DeserializeOwned,
    {
        self.send_signed(
            ApiSurface::Payment,
            method,
            endpoint_template,
            path_args,
            payload,
        )
        .await
    }

    /// Dispatch a request signed with the key of `surface`.
    #[tracing::instrument(
        skip_all,
        fields(surface = %surface, method = %method, endpoint = endpoint_template)
    )]
    pub async fn send_signed<P, R>(
        &self,
        surface: ApiSurface,
        method: HttpMethod,
        endpoint_template: &str,
        path_args: &[(&str, &str)],
        payload: Option<&P>,
    ) -> Result<R>
    where
        P: Serialize + Sync + ?Sized,
        R: DeserializeOwned,
    {
        let request = self.build_request(surface, method, endpoint_template, path_args, payload)?;
        tracing::debug!(url = %request.url, body_len = request.body.len(), "dispatching request");

        let response = self.transport.send(request).await?;
        decode_response(response)
    }

    /// Assemble the signed request without sending it.
    pub fn build_request<P>(
        &self,
        surface: ApiSurface,
        method: HttpMethod,
        endpoint_template: &str,
        path_args: &[(&str, &str)],
        payload: Option<&P>,
    ) -> Result<HttpRequest>
    where
        P: Serialize + ?Sized,
    {
        let path = interpolate(endpoint_template, path_args)?;
        let url = join_url(&self.config.base_url, &path);

        let body = match payload {
            Some(payload) => serde_json::to_vec(payload)?,
            None => Vec::new(),
        };

        let signature = sign(self.config.key_for(surface), &body)?;

        Ok(HttpRequest {
            method,
            url,
            headers: vec![
                ("Content-Type".to_string(), "application/json".to_string()),
                (MERCHANT_HEADER.to_string(), self.config.merchant_id.clone()),
                (SIGN_HEADER.to_string(), signature),
            ],
            body,
        })
    }
}

/// Turn a raw response into the typed result or the matching error.
pub fn decode_response<R: DeserializeOwned>(response: HttpResponse) -> Result<R> {
    if !response.is_success() {
        tracing::warn!(status = response.status, "non-success HTTP status");
        return Err(ErrorBody::into_error(response.status, &response.body));
    }

    let envelope = ResponseEnvelope::from_slice(&response.body)?;
    if envelope.state != 0 {
        tracing::warn!(state = envelope.state, "API returned non-zero state");
    } else {
        tracing::debug!("API returned success state");
    }

    envelope.into_result()
}
