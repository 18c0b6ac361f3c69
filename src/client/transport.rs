//! Network transport.
//!
//! The client never talks to the network directly. It hands a finished
//! [`HttpRequest`] to a [`Transport`] and classifies whatever comes back, so
//! any HTTP stack can be plugged in. [`ReqwestTransport`] is the default.

use crate::client::ClientConfig;
use crate::error::BoxError;
use crate::types::{HttpRequest, HttpResponse, ResponseBody};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Sends a request and returns the response.
///
/// Implementations must return every HTTP status, including 4xx and 5xx, as
/// an ordinary response. `Err` is reserved for failures where no response
/// exists at all (DNS, connect, timeout).
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform one exchange. Error statuses are responses, not errors.
    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, BoxError>;
}

/// [`Transport`] backed by a `reqwest::Client`.
///
/// Redirects are never followed, so 3xx responses reach the client as-is.
#[derive(Clone, Debug)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Transport with the default [`ClientConfig`].
    pub fn new() -> Self {
        Self::with_config(&ClientConfig::default())
    }

    /// Build the underlying client from `config`.
    pub fn with_config(config: &ClientConfig) -> Self {
        let mut builder = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .pool_idle_timeout(Duration::from_secs(config.pool_idle_timeout_secs));

        if !config.proxy_url.is_empty() {
            match reqwest::Proxy::all(&config.proxy_url) {
                Ok(proxy) => builder = builder.proxy(proxy),
                Err(e) => tracing::warn!("Ignoring invalid proxy {}: {}", config.proxy_url, e),
            }
        }

        let client = builder.build().unwrap_or_else(|e| {
            tracing::warn!("Falling back to default HTTP client: {}", e);
            reqwest::Client::default()
        });

        ReqwestTransport { client }
    }

    /// Wrap an existing client. Its redirect policy is left untouched.
    pub fn from_client(client: reqwest::Client) -> Self {
        ReqwestTransport { client }
    }

    /// The underlying `reqwest` client.
    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, BoxError> {
        let mut req_builder = self
            .client
            .request(request.method.clone(), request.uri.as_str())
            .version(request.version)
            .headers(request.headers.clone());

        if let Some(body) = &request.body {
            req_builder = req_builder.body(body.clone());
        }

        let response = req_builder.send().await?;

        let status = response.status();
        let version = response.version();
        let headers = response.headers().clone();

        // Status and headers already arrived; a failed body read is reported
        // through the body so the exchange still yields a response.
        let body = match response.bytes().await {
            Ok(bytes) => ResponseBody::Bytes(bytes),
            Err(e) => ResponseBody::Unreadable(Arc::new(e)),
        };

        Ok(HttpResponse {
            status,
            version,
            headers,
            body,
            reason: status.canonical_reason().unwrap_or_default().to_string(),
        })
    }
}
