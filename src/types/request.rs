//! Outgoing HTTP request description.

use bytes::Bytes;
use http::header::{HeaderMap, HeaderName, HeaderValue};
use http::{Method, Version};
use url::Url;

/// A fully-formed request handed to a [`Transport`](crate::client::Transport).
///
/// Header lookup is case-insensitive and every name keeps an ordered list of
/// values, which is what [`HeaderMap`] provides.
#[derive(Clone, Debug)]
pub struct HttpRequest {
    /// HTTP method.
    pub method: Method,
    /// Absolute target URL.
    pub uri: Url,
    /// HTTP version.
    pub version: Version,
    /// Headers; names are case-insensitive.
    pub headers: HeaderMap,
    /// Body, if any.
    pub body: Option<Bytes>,
}

impl HttpRequest {
    /// Create a body-less HTTP/1.1 request.
    pub fn new(method: Method, uri: Url) -> Self {
        HttpRequest {
            method,
            uri,
            version: Version::HTTP_11,
            headers: HeaderMap::new(),
            body: None,
        }
    }

    /// Append a header value.
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Set the body.
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
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

    /// Path plus query, as it appears on the request line.
    pub fn request_target(&self) -> String {
        let path = match self.uri.path() {
            "" => "/",
            path => path,
        };
        match self.uri.query() {
            Some(query) => format!("{}?{}", path, query),
            None => path.to_string(),
        }
    }

    /// The body as UTF-8, if it is.
    pub fn body_str(&self) -> Option<&str> {
        self.body.as_ref().and_then(|b| std::str::from_utf8(b).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_target_with_query() {
        let request = HttpRequest::new(
            Method::GET,
            Url::parse("http://example.com/documents?page=2").unwrap(),
        );
        assert_eq!(request.request_target(), "/documents?page=2");
    }

    #[test]
    fn test_request_target_root() {
        let request = HttpRequest::new(Method::GET, Url::parse("http://example.com").unwrap());
        assert_eq!(request.request_target(), "/");
    }

    #[test]
    fn test_header_values_are_ordered() {
        let mut request = HttpRequest::new(Method::GET, Url::parse("http://example.com").unwrap());
        request
            .headers
            .append("x-trace", HeaderValue::from_static("one"));
        request
            .headers
            .append("X-Trace", HeaderValue::from_static("two"));

        assert_eq!(request.header("X-TRACE"), vec!["one", "two"]);
        assert!(request.has_header("x-trace"));
    }
}
