//! Error types for HAL client operations.
//!
//! # Error Categories
//!
//! | Error | Raised when | Carries |
//! |-------|-------------|---------|
//! | [`HttpClientError`] | The transport itself failed (DNS, connect, timeout) | request, cause |
//! | [`BadResponseError`] | The exchange completed but produced no usable resource | request, response, resource |
//! | [`InvalidRelationError`] | A link or embedded relation does not exist | relation name |
//! | [`TemplateError`] | A templated link could not be expanded | expander error |
//!
//! None of these are retried internally.
//!
//! # Examples
//!
//! ```no_run
//! use hal_client::{HalClient, HalError, RequestOptions};
//!
//! # async fn run() -> hal_client::Result<()> {
//! let client = HalClient::new("http://example.com/api/")?;
//! match client.get("missing", RequestOptions::new()).await {
//!     Ok(resource) => println!("{:?}", resource.properties()),
//!     Err(HalError::BadResponse(err)) if err.is_client_error() => {
//!         println!("{} -> {:?}", err, err.resource().properties());
//!     }
//!     Err(err) => return Err(err),
//! }
//! # Ok(())
//! # }
//! ```

use crate::resource::HalResource;
use crate::template::TemplateError;
use crate::types::{HttpRequest, HttpResponse};
use http::StatusCode;
use std::error::Error as StdError;
use std::fmt;
use thiserror::Error;

/// Result type for HAL client operations.
pub type Result<T> = std::result::Result<T, HalError>;

/// Boxed cause of a transport or body-read failure.
pub type BoxError = Box<dyn StdError + Send + Sync>;

/// Errors returned by the client, links and resources.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum HalError {
    /// The transport failed.
    #[error(transparent)]
    HttpClient(Box<HttpClientError>),

    /// A response arrived but was an error status or had an unusable body.
    #[error(transparent)]
    BadResponse(Box<BadResponseError>),

    /// The relation is not declared.
    #[error(transparent)]
    InvalidRelation(#[from] InvalidRelationError),

    /// A templated link could not be expanded.
    #[error("URI template error: {0}")]
    Template(#[from] TemplateError),

    /// The root URL or a resolved URI is not a valid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A header name or value is not valid HTTP.
    #[error("Invalid header: {0}")]
    InvalidHeader(String),

    /// The JSON request body could not be serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A resource-returning call was made with `return_raw_response` set.
    ///
    /// The response is attached unread. Use `request` to receive it as a
    /// [`Reply::Raw`](crate::Reply::Raw) instead.
    #[error("Raw response requested from a call returning a resource (status {}).", .0.status.as_u16())]
    RawResponse(Box<HttpResponse>),
}

impl From<HttpClientError> for HalError {
    fn from(err: HttpClientError) -> Self {
        HalError::HttpClient(Box::new(err))
    }
}

impl From<BadResponseError> for HalError {
    fn from(err: BadResponseError) -> Self {
        HalError::BadResponse(Box::new(err))
    }
}

impl HalError {
    /// The request that was being executed, if the error involved one.
    pub fn request(&self) -> Option<&HttpRequest> {
        match self {
            HalError::HttpClient(err) => Some(err.request()),
            HalError::BadResponse(err) => Some(err.request()),
            _ => None,
        }
    }

    /// The bad response details, if this is one.
    pub fn as_bad_response(&self) -> Option<&BadResponseError> {
        match self {
            HalError::BadResponse(err) => Some(err),
            _ => None,
        }
    }
}

/// The transport failed before a response was available.
#[derive(Error, Debug)]
#[error("Exception thrown by the http client while sending request: {source}.")]
pub struct HttpClientError {
    request: HttpRequest,
    #[source]
    source: BoxError,
}

impl HttpClientError {
    /// Wrap the transport failure `source` of `request`.
    pub fn new(request: HttpRequest, source: BoxError) -> Self {
        HttpClientError { request, source }
    }

    /// The request that failed.
    pub fn request(&self) -> &HttpRequest {
        &self.request
    }
}

/// Classification of a non-2xx status.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResponseClass {
    /// 4xx status.
    ClientError,
    /// 5xx status.
    ServerError,
    /// Any other non-2xx status (1xx, 3xx).
    Unsuccessful,
}

impl ResponseClass {
    /// Classify `status`.
    pub fn of(status: StatusCode) -> Self {
        if status.is_client_error() {
            ResponseClass::ClientError
        } else if status.is_server_error() {
            ResponseClass::ServerError
        } else {
            ResponseClass::Unsuccessful
        }
    }
}

impl fmt::Display for ResponseClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ResponseClass::ClientError => "Client error",
            ResponseClass::ServerError => "Server error",
            ResponseClass::Unsuccessful => "Unsuccessful response",
        })
    }
}

/// The exchange completed but did not yield a usable resource.
///
/// The attached [`resource`](Self::resource) is materialized from the error
/// body on a best-effort basis and is empty when that was not possible.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct BadResponseError {
    message: String,
    request: HttpRequest,
    response: Option<HttpResponse>,
    resource: HalResource,
    #[source]
    source: Option<BoxError>,
}

impl BadResponseError {
    /// A bad response with a custom `message`.
    pub fn new(
        message: impl Into<String>,
        request: HttpRequest,
        response: Option<HttpResponse>,
        resource: HalResource,
    ) -> Self {
        BadResponseError {
            message: message.into(),
            request,
            response,
            resource,
            source: None,
        }
    }

    /// Summary error for a non-2xx status.
    pub fn from_status(request: HttpRequest, response: HttpResponse, resource: HalResource) -> Self {
        let message = format!(
            "{} [url] {} [http method] {} [status code] {} [reason phrase] {}.",
            ResponseClass::of(response.status),
            request.request_target(),
            request.method,
            response.status.as_u16(),
            response.reason,
        );
        Self::new(message, request, Some(response), resource)
    }

    /// Attach the underlying cause.
    pub fn with_source(mut self, source: BoxError) -> Self {
        self.source = Some(source);
        self
    }

    /// The human-readable message, also used for `Display`.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The request that produced the response.
    pub fn request(&self) -> &HttpRequest {
        &self.request
    }

    /// The response, when one was received.
    pub fn response(&self) -> Option<&HttpResponse> {
        self.response.as_ref()
    }

    /// Resource read from the error body, possibly empty.
    pub fn resource(&self) -> &HalResource {
        &self.resource
    }

    /// Take the error body resource.
    pub fn into_resource(self) -> HalResource {
        self.resource
    }

    /// Status code of the response.
    pub fn status(&self) -> Option<StatusCode> {
        self.response.as_ref().map(|r| r.status)
    }

    /// Classification of the status.
    pub fn class(&self) -> Option<ResponseClass> {
        self.status().map(ResponseClass::of)
    }

    /// Whether the status was 4xx.
    pub fn is_client_error(&self) -> bool {
        self.class() == Some(ResponseClass::ClientError)
    }

    /// Whether the status was 5xx.
    pub fn is_server_error(&self) -> bool {
        self.class() == Some(ResponseClass::ServerError)
    }
}

/// Kind of relation looked up on a resource.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RelationKind {
    /// A `_links` relation.
    Link,
    /// An `_embedded` relation.
    Embedded,
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RelationKind::Link => "link",
            RelationKind::Embedded => "embedded",
        })
    }
}

/// A link or embedded relation that the resource does not declare.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown {kind} \"{rel}\".")]
pub struct InvalidRelationError {
    /// Which map the relation was looked up in.
    pub kind: RelationKind,
    /// The relation name as requested.
    pub rel: String,
}

impl InvalidRelationError {
    /// Unknown link relation `rel`.
    pub fn link(rel: impl Into<String>) -> Self {
        InvalidRelationError {
            kind: RelationKind::Link,
            rel: rel.into(),
        }
    }

    /// Unknown embedded relation `rel`.
    pub fn embedded(rel: impl Into<String>) -> Self {
        InvalidRelationError {
            kind: RelationKind::Embedded,
            rel: rel.into(),
        }
    }
}
