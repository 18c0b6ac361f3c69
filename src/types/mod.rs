//! Request, response and option types shared by the client and resources.

mod options;
mod request;
mod response;

pub use options::{Query, RequestBody, RequestOptions};
pub use request::HttpRequest;
pub use response::{HttpResponse, ResponseBody};

use crate::error::{HalError, Result};
use crate::resource::HalResource;

/// Result of [`HalClient::request`](crate::HalClient::request).
///
/// `Raw` is only produced when `return_raw_response` was requested and the
/// status was 2xx.
#[derive(Clone, Debug)]
pub enum Reply {
    /// A materialized resource.
    Resource(HalResource),
    /// The response, unread.
    Raw(HttpResponse),
}

impl Reply {
    /// The resource, unless raw.
    pub fn resource(&self) -> Option<&HalResource> {
        match self {
            Reply::Resource(resource) => Some(resource),
            Reply::Raw(_) => None,
        }
    }

    /// Take the resource, unless raw.
    pub fn into_resource(self) -> Option<HalResource> {
        match self {
            Reply::Resource(resource) => Some(resource),
            Reply::Raw(_) => None,
        }
    }

    /// The raw response, if one was requested.
    pub fn raw(&self) -> Option<&HttpResponse> {
        match self {
            Reply::Raw(response) => Some(response),
            Reply::Resource(_) => None,
        }
    }

    /// Take the raw response, if one was requested.
    pub fn into_raw(self) -> Option<HttpResponse> {
        match self {
            Reply::Raw(response) => Some(response),
            Reply::Resource(_) => None,
        }
    }

    /// The resource, or [`HalError::RawResponse`] for a raw reply.
    pub fn into_result(self) -> Result<HalResource> {
        match self {
            Reply::Resource(resource) => Ok(resource),
            Reply::Raw(response) => Err(HalError::RawResponse(Box::new(response))),
        }
    }
}
