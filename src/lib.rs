#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

//! # HAL client: navigating hypermedia APIs
//!
//! This crate implements a client for APIs speaking HAL (Hypertext
//! Application Language): JSON documents carrying a `_links` map of
//! relations and an `_embedded` map of nested resources.
//!
//! Based on [draft-kelly-json-hal](https://datatracker.ietf.org/doc/html/draft-kelly-json-hal)
//!
//! ## Overview
//!
//! Instead of building URLs by hand, callers start at a root resource and
//! follow relation names:
//!
//! 1. **Requests** - a [`HalClient`] composes and sends requests relative to a root URL
//! 2. **Resources** - each response body is materialized into a [`HalResource`]
//! 3. **Links** - relations are exposed as [`HalLink`]s that can be followed
//! 4. **Embedded resources** - `_embedded` entries become child resources
//!
//! ## Key Features
//!
//! - **Relation normalization**: bare strings, objects and mixed lists all read the same
//! - **Curies**: `doc:items` is found when asking for `items`
//! - **URI templates**: RFC 6570 levels 1 to 4 for templated links
//! - **Content negotiation**: `application/hal+json`, `application/json`, `application/vnd.error+json`
//! - **Created responses**: a `201` with an empty body is followed to its `Location`
//! - **Error taxonomy**: transport failures, bad responses and unknown relations are distinct
//! - **Pluggable transport**: any HTTP stack behind the [`Transport`] trait
//!
//! ## Client Usage
//!
//! ```no_run
//! use hal_client::{HalClient, RequestOptions, Variables};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = HalClient::new("http://propilex.herokuapp.com")?;
//!     let root = client.root(RequestOptions::new()).await?;
//!
//!     if let Some(documents) = root.first_link("documents")? {
//!         let variables = json!({"page": 1, "limit": 10});
//!         let page = documents
//!             .get(variables.as_object().unwrap(), RequestOptions::new())
//!             .await?;
//!         println!("total: {:?}", page.property("total"));
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - **[client]** - HalClient, request composition, transport and response handling
//! - **[resource]** - HalResource and HalLink
//! - **[types]** - Request, response and option types
//! - **[template]** - URI template expansion
//! - **[error]** - Error types and result handling
//! - **[protocol]** - Media types, reserved keys and header helpers

pub mod client;
pub mod error;
pub mod protocol;
pub mod resource;
pub mod template;
pub mod types;

pub use client::{ClientConfig, HalClient, ReqwestTransport, Transport};
pub use error::{
    BadResponseError, HalError, HttpClientError, InvalidRelationError, RelationKind,
    ResponseClass, Result,
};
pub use resource::{HalLink, HalResource};
pub use template::{Rfc6570Expander, TemplateError, UriTemplateExpander, Variables};
pub use types::{
    HttpRequest, HttpResponse, Query, Reply, RequestBody, RequestOptions, ResponseBody,
};
