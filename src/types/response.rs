//! Incoming HTTP response description.

use bytes::Bytes;
use http::header::{HeaderMap, HeaderName, HeaderValue};
use http::{StatusCode, Version};
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

/// Response payload as delivered by a transport.
///
/// Transports read the body eagerly. When reading fails after the status
/// line and headers already arrived, the failure is kept here instead of
/// failing the whole exchange, so that it surfaces as a bad response.
#[derive(Clone)]
pub enum ResponseBody {
    /// The complete body.
    Bytes(Bytes),
    /// Reading the body failed.
    Unreadable(Arc<dyn StdError + Send + Sync>),
}

impl ResponseBody {
    /// An empty, readable body.
    pub fn empty() -> Self {
        ResponseBody::Bytes(Bytes::new())
    }

    /// The body bytes, or the error that prevented reading them.
    pub fn bytes(&self) -> Result<&Bytes, Arc<dyn StdError + Send + Sync>> {
        match self {
            ResponseBody::Bytes(bytes) => Ok(bytes),
            ResponseBody::Unreadable(err) => Err(Arc::clone(err)),
        }
    }
}

impl fmt::Debug for ResponseBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseBody::Bytes(bytes) => f.debug_tuple("Bytes").field(bytes).finish(),
            ResponseBody::Unreadable(err) => {
                f.debug_tuple("Unreadable").field(&err.to_string()).finish()
            }
        }
    }
}

impl From<Bytes> for ResponseBody {
    fn from(bytes: Bytes) -> Self {
        ResponseBody::Bytes(bytes)
    }
}

/// HTTP response handed back by a [`Transport`](crate::client::Transport).
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// Status code.
    pub status: StatusCode,
    /// HTTP version.
    pub version: Version,
    /// Response headers.
    pub headers: HeaderMap,
    /// Response body.
    pub body: ResponseBody,
    /// Reason phrase.
    pub reason: String,
}

impl HttpResponse {
    /// Create a response with the canonical reason phrase for `status`.
    pub fn new(status: StatusCode, body: impl Into<Bytes>) -> Self {
        HttpResponse {
            status,
            version: Version::HTTP_11,
            headers: HeaderMap::new(),
            body: ResponseBody::Bytes(body.into()),
            reason: status.canonical_reason().unwrap_or_default().to_string(),
        }
    }

    /// Appends a header value. Invalid names or values are skipped.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        if let (Ok(name), Ok(value)) = (
            HeaderName::try_from(name),
            HeaderValue::try_from(value),
        ) {
            self.headers.append(name, value);
        }
        self
    }

    /// Replace the body.
    pub fn with_body(mut self, body: ResponseBody) -> Self {
        self.body = body;
        self
    }

    /// Replace the reason phrase.
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = reason.into();
        self
    }

    /// All values of a header, in insertion order.
    pub fn header(&self, name: &str) -> Vec<&str> {
        self.headers
            .get_all(name)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .collect()
    }

    /// Whether `name` is present.
    pub fn has_header(&self, name: &str) -> bool {
        self.headers.contains_key(name)
    }

    /// All values of a header joined with `", "`.
    pub fn header_line(&self, name: &str) -> String {
        self.header(name).join(", ")
    }

    /// The body as UTF-8, if readable and valid.
    pub fn body_str(&self) -> Option<&str> {
        match &self.body {
            ResponseBody::Bytes(bytes) => std::str::from_utf8(bytes).ok(),
            ResponseBody::Unreadable(_) => None,
        }
    }

    /// Whether the status is 2xx.
    #[inline]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_new_sets_reason() {
        let response = HttpResponse::new(StatusCode::NOT_FOUND, "");
        assert_eq!(response.reason, "Not Found");
        assert!(!response.is_success());
    }

    #[test]
    fn test_header_line_joins_values() {
        let response = HttpResponse::new(StatusCode::OK, "")
            .with_header("Content-Type", "application/json")
            .with_header("content-type", "text/plain");
        assert_eq!(response.header_line("CONTENT-TYPE"), "application/json, text/plain");
    }

    #[test]
    fn test_unreadable_body() {
        let err: Arc<dyn StdError + Send + Sync> =
            Arc::new(std::io::Error::new(std::io::ErrorKind::Other, "stream reset"));
        let response = HttpResponse::new(StatusCode::OK, "").with_body(ResponseBody::Unreadable(err));

        assert!(response.body_str().is_none());
        let read = response.body.bytes();
        assert_eq!(read.unwrap_err().to_string(), "stream reset");
    }
}
