//! HAL client implementation.
//!
//! This module turns high-level calls into HTTP exchanges and the responses
//! back into navigable resources:
//!
//! - **Compose requests** from a default request, a URI reference and options
//! - **Send them** through a pluggable [`Transport`]
//! - **Classify responses** by status and content type
//! - **Materialize resources** from JSON bodies
//!
//! # Module Organization
//!
//! ```text
//! client/
//! ├── fetch     - HalClient façade and request pipeline
//! ├── builder   - RequestBuilder, options applied to the default request
//! ├── factory   - ResourceFactory, response to resource
//! ├── transport - Transport contract and the reqwest adapter
//! └── config    - Client configuration
//! ```
//!
//! # Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`HalClient`] | Immutable client, entry point for every request |
//! | [`RequestBuilder`] | Composes an [`HttpRequest`](crate::HttpRequest) without sending it |
//! | [`Transport`] | Network capability the client sends through |
//! | [`ReqwestTransport`] | Default transport backed by `reqwest` |
//! | [`ClientConfig`] | Client configuration options |
//!
//! # Examples
//!
//! ## Creating a Client
//!
//! ```
//! use hal_client::client::{ClientConfig, HalClient};
//!
//! // Default configuration
//! let client = HalClient::new("http://example.com/api/").unwrap();
//!
//! // Custom configuration
//! let config = ClientConfig {
//!     request_timeout_ms: 2_000,
//!     ..Default::default()
//! };
//! let client = HalClient::with_config("http://example.com/api/", config).unwrap();
//! assert_eq!(client.root_url().as_str(), "http://example.com/api/");
//! ```
//!
//! ## Plugging in a Transport
//!
//! ```
//! use async_trait::async_trait;
//! use hal_client::client::{ClientConfig, HalClient, Transport};
//! use hal_client::error::BoxError;
//! use hal_client::{HttpRequest, HttpResponse};
//! use http::StatusCode;
//! use std::sync::Arc;
//!
//! struct Canned;
//!
//! #[async_trait]
//! impl Transport for Canned {
//!     async fn send(&self, _request: &HttpRequest) -> Result<HttpResponse, BoxError> {
//!         Ok(HttpResponse::new(StatusCode::OK, r#"{"name": "canned"}"#)
//!             .with_header("Content-Type", "application/hal+json"))
//!     }
//! }
//!
//! let client =
//!     HalClient::with_transport("http://example.com", ClientConfig::default(), Arc::new(Canned))
//!         .unwrap();
//! ```

mod builder;
mod config;
mod factory;
mod fetch;
mod transport;

pub use builder::RequestBuilder;
pub use config::ClientConfig;
pub use fetch::HalClient;
pub use transport::{ReqwestTransport, Transport};
