//! Client configuration.

use crate::protocol::media_types;
use serde::{Deserialize, Serialize};

/// Configuration for a [`HalClient`](crate::HalClient) and its default transport.
///
/// Deserializable so it can live in an application's own config file; every
/// field falls back to its default when missing.
///
/// # Examples
///
/// ```
/// use hal_client::ClientConfig;
///
/// let config = ClientConfig {
///     request_timeout_ms: 5_000,
///     ..Default::default()
/// };
/// assert_eq!(config.content_types[0], "application/hal+json");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Sent as `User-Agent` on every request.
    pub user_agent: String,
    /// Media types a response may declare, in preference order. Also joined
    /// into the default `Accept` header.
    pub content_types: Vec<String>,
    /// Total time allowed for one exchange, in milliseconds.
    pub request_timeout_ms: u64,
    /// Time allowed to establish a connection, in milliseconds.
    pub connect_timeout_ms: u64,
    /// How long an idle pooled connection is kept, in seconds.
    pub pool_idle_timeout_secs: u64,
    /// Proxy for all schemes. Empty means none.
    pub proxy_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            user_agent: concat!("hal_client/", env!("CARGO_PKG_VERSION")).to_string(),
            content_types: media_types::ACCEPTED.iter().map(|t| t.to_string()).collect(),
            request_timeout_ms: 30_000,
            connect_timeout_ms: 10_000,
            pool_idle_timeout_secs: 90,
            proxy_url: String::new(),
        }
    }
}
