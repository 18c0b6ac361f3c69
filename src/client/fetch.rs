//! The HAL client façade.
//!
//! # Examples
//!
//! ## Browsing from the root
//!
//! ```no_run
//! use hal_client::{HalClient, RequestOptions, Variables};
//!
//! #[tokio::main]
//! async fn main() -> hal_client::Result<()> {
//!     let client = HalClient::new("http://propilex.herokuapp.com")?;
//!     let root = client.root(RequestOptions::new()).await?;
//!
//!     let documents = root
//!         .first_link("documents")?
//!         .expect("root links to documents")
//!         .get(&Variables::new(), RequestOptions::new())
//!         .await?;
//!
//!     for document in documents.resource("documents")? {
//!         println!("{:?}", document.property("title"));
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Creating a resource
//!
//! ```no_run
//! use hal_client::{HalClient, RequestOptions};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> hal_client::Result<()> {
//!     let client = HalClient::new("http://propilex.herokuapp.com")?
//!         .with_header("Authorization", "Bearer secret")?;
//!
//!     // A 201 with an empty body and a Location is followed with one GET.
//!     let created = client
//!         .post("/documents", RequestOptions::new().with_json(json!({"title": "Test"})))
//!         .await?;
//!     println!("{:?}", created.properties());
//!     Ok(())
//! }
//! ```

use crate::client::builder::RequestBuilder;
use crate::client::factory::{Materialized, ResourceFactory};
use crate::client::{ClientConfig, ReqwestTransport, Transport};
use crate::error::{BadResponseError, HalError, HttpClientError, Result};
use crate::protocol::format_accept_header;
use crate::resource::HalResource;
use crate::template::{Rfc6570Expander, UriTemplateExpander};
use crate::types::{HttpRequest, HttpResponse, Reply, RequestOptions};
use http::header::{HeaderName, HeaderValue, ACCEPT, USER_AGENT};
use http::Method;
use std::fmt;
use std::sync::Arc;
use url::Url;

/// Entry point for talking to a HAL API.
///
/// A client is an immutable value: the root URL, default headers, transport
/// and URI template expander. Every `with_*` method returns a new client and
/// leaves the original untouched. Clones share the transport, which is the
/// only state reused across requests.
///
/// Requests never retry and nothing is cached. Each call performs one
/// transport exchange, or two when a `201 Created` with an empty body is
/// followed to its `Location`.
#[derive(Clone)]
pub struct HalClient {
    transport: Arc<dyn Transport>,
    expander: Arc<dyn UriTemplateExpander>,
    factory: ResourceFactory,
    default_request: HttpRequest,
}

impl HalClient {
    /// Create a client with the default configuration and transport.
    pub fn new(root_url: &str) -> Result<Self> {
        Self::with_config(root_url, ClientConfig::default())
    }

    /// Create a client with `config` and a [`ReqwestTransport`] built from it.
    pub fn with_config(root_url: &str, config: ClientConfig) -> Result<Self> {
        let transport = Arc::new(ReqwestTransport::with_config(&config));
        Self::with_transport(root_url, config, transport)
    }

    /// Create a client that sends through `transport`.
    pub fn with_transport(
        root_url: &str,
        config: ClientConfig,
        transport: Arc<dyn Transport>,
    ) -> Result<Self> {
        let user_agent = HeaderValue::try_from(config.user_agent.as_str())
            .map_err(|e| HalError::InvalidHeader(format!("{}: {}", USER_AGENT, e)))?;
        let accept = HeaderValue::try_from(format_accept_header(&config.content_types[..]))
            .map_err(|e| HalError::InvalidHeader(format!("{}: {}", ACCEPT, e)))?;

        let default_request = HttpRequest::new(Method::GET, Url::parse(root_url)?)
            .with_header(USER_AGENT, user_agent)
            .with_header(ACCEPT, accept);

        Ok(HalClient {
            transport,
            expander: Arc::new(Rfc6570Expander),
            factory: ResourceFactory::new(&config.content_types[..]),
            default_request,
        })
    }

    // ========== Configuration ==========

    /// Base URL that relative URIs resolve against.
    pub fn root_url(&self) -> &Url {
        &self.default_request.uri
    }

    /// All default values of a header.
    pub fn header(&self, name: &str) -> Vec<&str> {
        self.default_request.header(name)
    }

    /// The default headers sent with every request.
    pub fn headers(&self) -> &http::HeaderMap {
        &self.default_request.headers
    }

    /// A client whose default `name` header is replaced by `value`.
    pub fn with_header(&self, name: &str, value: &str) -> Result<Self> {
        let header = HeaderName::try_from(name)
            .map_err(|e| HalError::InvalidHeader(format!("{}: {}", name, e)))?;
        let value = HeaderValue::try_from(value)
            .map_err(|e| HalError::InvalidHeader(format!("{}: {}", name, e)))?;

        let mut client = self.clone();
        client.default_request.headers.insert(header, value);
        Ok(client)
    }

    /// A client resolving relative URIs against `root_url`.
    pub fn with_root_url(&self, root_url: &str) -> Result<Self> {
        let mut client = self.clone();
        client.default_request.uri = Url::parse(root_url)?;
        Ok(client)
    }

    /// A client expanding templated links with `expander`.
    pub fn with_uri_template_expander(&self, expander: Arc<dyn UriTemplateExpander>) -> Self {
        let mut client = self.clone();
        client.expander = expander;
        client
    }

    /// The URI template expander used by links of this client.
    pub fn expander(&self) -> &dyn UriTemplateExpander {
        self.expander.as_ref()
    }

    /// Media types accepted in responses, in preference order.
    pub fn content_types(&self) -> &[String] {
        self.factory.content_types()
    }

    /// The request `method` against `uri` would send, without sending it.
    pub fn create_request(
        &self,
        method: Method,
        uri: &str,
        options: &RequestOptions,
    ) -> Result<HttpRequest> {
        RequestBuilder::new(&self.default_request).build(method, uri, options)
    }

    // ========== Requests ==========

    /// GET the root URL.
    pub async fn root(&self, options: RequestOptions) -> Result<HalResource> {
        self.request(Method::GET, "", options).await?.into_result()
    }

    /// GET `uri`, resolved relative to the root URL.
    ///
    /// Delegates to [`request`](Self::request). Setting `return_raw_response`
    /// makes a 2xx reply fail with [`HalError::RawResponse`].
    pub async fn get(&self, uri: &str, options: RequestOptions) -> Result<HalResource> {
        self.request(Method::GET, uri, options).await?.into_result()
    }

    /// POST to `uri`. See [`get`](Self::get).
    pub async fn post(&self, uri: &str, options: RequestOptions) -> Result<HalResource> {
        self.request(Method::POST, uri, options).await?.into_result()
    }

    /// PUT to `uri`. See [`get`](Self::get).
    pub async fn put(&self, uri: &str, options: RequestOptions) -> Result<HalResource> {
        self.request(Method::PUT, uri, options).await?.into_result()
    }

    /// DELETE `uri`. See [`get`](Self::get).
    pub async fn delete(&self, uri: &str, options: RequestOptions) -> Result<HalResource> {
        self.request(Method::DELETE, uri, options).await?.into_result()
    }

    /// Send `method` against `uri`, resolved relative to the root URL.
    ///
    /// A 2xx response becomes a [`Reply::Resource`], or a [`Reply::Raw`] when
    /// `return_raw_response` is set. Any other status fails with a
    /// [`BadResponseError`] carrying a resource read from the error body on a
    /// best-effort basis.
    ///
    /// # Errors
    ///
    /// - [`HalError::HttpClient`] if the transport fails
    /// - [`HalError::BadResponse`] for a non-2xx status or an unusable body
    /// - [`HalError::InvalidUrl`] or [`HalError::InvalidHeader`] for bad input
    pub async fn request(&self, method: Method, uri: &str, options: RequestOptions) -> Result<Reply> {
        let request = self.create_request(method, uri, &options)?;
        let response = self.send(&request).await?;

        if options.return_raw_response && response.is_success() {
            return Ok(Reply::Raw(response));
        }

        self.handle_response(request, response)
            .await
            .map(Reply::Resource)
    }

    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse> {
        tracing::debug!("Sending {} {}", request.method, request.uri);

        match self.transport.send(request).await {
            Ok(response) => {
                tracing::debug!(
                    "Received {} for {} {}",
                    response.status,
                    request.method,
                    request.uri
                );
                Ok(response)
            }
            Err(e) => {
                tracing::warn!("Request {} {} failed: {}", request.method, request.uri, e);
                Err(HttpClientError::new(request.clone(), e).into())
            }
        }
    }

    /// Classify a response. A `201 Created` pointing elsewhere is followed
    /// once; the follow-up response is never followed again.
    async fn handle_response(
        &self,
        mut request: HttpRequest,
        mut response: HttpResponse,
    ) -> Result<HalResource> {
        let mut follow_location = true;

        loop {
            match self.materialize(&request, &response, follow_location)? {
                Materialized::Resource(resource) => return Ok(resource),
                Materialized::FollowLocation(location) => {
                    tracing::debug!("Following Location {} of created resource", location);
                    request = self.create_request(Method::GET, &location, &RequestOptions::new())?;
                    response = self.send(&request).await?;
                    follow_location = false;
                }
            }
        }
    }

    fn materialize(
        &self,
        request: &HttpRequest,
        response: &HttpResponse,
        follow_location: bool,
    ) -> Result<Materialized> {
        if response.is_success() {
            return self
                .factory
                .create(self, request, response, false, follow_location);
        }

        let resource = match self.factory.create(self, request, response, true, false) {
            Ok(Materialized::Resource(resource)) => resource,
            Ok(Materialized::FollowLocation(_)) => HalResource::new(self.clone()),
            Err(e) => {
                tracing::trace!("Error body of {} not usable: {}", request.uri, e);
                HalResource::new(self.clone())
            }
        };

        Err(BadResponseError::from_status(request.clone(), response.clone(), resource).into())
    }
}

impl fmt::Debug for HalClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HalClient")
            .field("root_url", &self.default_request.uri.as_str())
            .field("headers", &self.default_request.headers)
            .field("content_types", &self.factory.content_types())
            .finish_non_exhaustive()
    }
}
