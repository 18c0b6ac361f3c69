//! Per-request options.
//!
//! Every option is independently optional. The builder methods mirror the
//! option names understood by the request pipeline:
//!
//! | Option | Effect |
//! |--------|--------|
//! | `version` | Overrides the protocol version |
//! | `query` | Merged into the query string of the resolved URI |
//! | `headers` | Appended to the default headers |
//! | `body` | Raw bytes sent verbatim, or a JSON value serialized on send |
//! | `return_raw_response` | Skip resource materialization on success. Only `request` returns the raw reply; the verbs fail with `HalError::RawResponse` |
//!
//! # Examples
//!
//! ```
//! use hal_client::RequestOptions;
//! use serde_json::json;
//!
//! let options = RequestOptions::new()
//!     .with_query_param("page", "2")
//!     .with_header("X-Request-Id", "abc")
//!     .with_json(json!({"title": "Test"}));
//! assert!(options.body.is_some());
//! ```

use bytes::Bytes;
use http::Version;
use indexmap::IndexMap;
use serde_json::Value;

/// Query string option: either pre-encoded or key/value pairs.
#[derive(Clone, Debug, PartialEq)]
pub enum Query {
    /// Already form-encoded, e.g. `a=1&b=2`.
    Encoded(String),
    /// Key/value pairs, encoded when merged.
    Pairs(IndexMap<String, String>),
}

impl Query {
    /// Decode into ordered pairs. A repeated key keeps its last value.
    pub fn to_pairs(&self) -> IndexMap<String, String> {
        match self {
            Query::Encoded(raw) => url::form_urlencoded::parse(raw.as_bytes())
                .into_owned()
                .collect(),
            Query::Pairs(pairs) => pairs.clone(),
        }
    }
}

impl From<&str> for Query {
    fn from(raw: &str) -> Self {
        Query::Encoded(raw.to_string())
    }
}

impl From<String> for Query {
    fn from(raw: String) -> Self {
        Query::Encoded(raw)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Query {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Query::Pairs(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// Request body option.
#[derive(Clone, Debug, PartialEq)]
pub enum RequestBody {
    /// Sent verbatim.
    Raw(Bytes),
    /// Serialized as JSON; adds `Content-Type: application/json` when absent.
    Json(Value),
}

/// Options recognized by [`HalClient::request`](crate::HalClient::request).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RequestOptions {
    /// HTTP version override.
    pub version: Option<Version>,
    /// Query merged over the URI's own query.
    pub query: Option<Query>,
    /// Headers appended to the client defaults.
    pub headers: Vec<(String, String)>,
    /// Request body.
    pub body: Option<RequestBody>,
    /// Return the 2xx response unread instead of a resource.
    pub return_raw_response: bool,
}

impl RequestOptions {
    /// No options set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the HTTP version.
    pub fn with_version(mut self, version: Version) -> Self {
        self.version = Some(version);
        self
    }

    /// Replace the query option.
    pub fn with_query(mut self, query: impl Into<Query>) -> Self {
        self.query = Some(query.into());
        self
    }

    /// Add one pair to the query option, converting a pre-encoded query to pairs.
    pub fn with_query_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut pairs = self.query.as_ref().map(Query::to_pairs).unwrap_or_default();
        pairs.insert(key.into(), value.into());
        self.query = Some(Query::Pairs(pairs));
        self
    }

    /// Append a header value.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Add several values for the same header name.
    pub fn with_header_values<I, V>(mut self, name: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.headers
            .extend(values.into_iter().map(|v| (name.to_string(), v.into())));
        self
    }

    /// Raw body, sent as-is.
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(RequestBody::Raw(body.into()));
        self
    }

    /// Structured body, serialized as JSON.
    pub fn with_json(mut self, body: Value) -> Self {
        self.body = Some(RequestBody::Json(body));
        self
    }

    /// Ask [`HalClient::request`](crate::HalClient::request) for the raw response.
    pub fn raw_response(mut self) -> Self {
        self.return_raw_response = true;
        self
    }
}
