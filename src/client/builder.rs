//! Request composition.
//!
//! Turns the client's default request plus a URI reference and a
//! [`RequestOptions`] bag into a complete [`HttpRequest`]. Nothing is sent
//! from here.

use crate::error::{HalError, Result};
use crate::protocol::media_types;
use crate::types::{HttpRequest, RequestBody, RequestOptions};
use bytes::Bytes;
use http::header::{HeaderName, HeaderValue, CONTENT_TYPE};
use http::Method;
use indexmap::IndexMap;
use url::Url;

/// Builds requests from a default request template.
#[derive(Clone, Copy, Debug)]
pub struct RequestBuilder<'a> {
    defaults: &'a HttpRequest,
}

impl<'a> RequestBuilder<'a> {
    /// Builder deriving every request from `defaults`.
    pub fn new(defaults: &'a HttpRequest) -> Self {
        RequestBuilder { defaults }
    }

    /// Compose a request for `method` against `uri`, resolved relative to
    /// the default request's URI.
    ///
    /// # Examples
    ///
    /// ```
    /// use hal_client::client::RequestBuilder;
    /// use hal_client::{HttpRequest, RequestOptions};
    /// use http::Method;
    /// use url::Url;
    ///
    /// let defaults = HttpRequest::new(Method::GET, Url::parse("http://h/test/").unwrap());
    /// let request = RequestBuilder::new(&defaults)
    ///     .build(Method::GET, "test", &RequestOptions::new().with_query("page=2"))
    ///     .unwrap();
    /// assert_eq!(request.uri.as_str(), "http://h/test/test?page=2");
    /// ```
    pub fn build(&self, method: Method, uri: &str, options: &RequestOptions) -> Result<HttpRequest> {
        let mut request = self.defaults.clone();
        request.method = method;
        request.uri = self.defaults.uri.join(uri)?;

        if let Some(version) = options.version {
            request.version = version;
        }

        if let Some(query) = &options.query {
            merge_query(&mut request.uri, query.to_pairs());
        }

        for (name, value) in &options.headers {
            let name = HeaderName::try_from(name.as_str())
                .map_err(|e| HalError::InvalidHeader(format!("{}: {}", name, e)))?;
            let value = HeaderValue::try_from(value.as_str())
                .map_err(|e| HalError::InvalidHeader(format!("{}: {}", name, e)))?;
            request.headers.append(name, value);
        }

        match &options.body {
            Some(RequestBody::Raw(bytes)) => request.body = Some(bytes.clone()),
            Some(RequestBody::Json(value)) => {
                request.body = Some(Bytes::from(serde_json::to_vec(value)?));
                if !request.headers.contains_key(CONTENT_TYPE) {
                    request
                        .headers
                        .insert(CONTENT_TYPE, HeaderValue::from_static(media_types::JSON));
                }
            }
            None => {}
        }

        Ok(request)
    }
}

/// Overlay `pairs` onto the query already present in `uri`.
///
/// Existing pairs keep their order and repetitions unless `pairs` names the
/// same key, in which case every occurrence of that key is replaced. The
/// result is re-encoded as `application/x-www-form-urlencoded`.
fn merge_query(uri: &mut Url, pairs: IndexMap<String, String>) {
    let mut merged: Vec<(String, String)> = uri
        .query_pairs()
        .into_owned()
        .filter(|(key, _)| !pairs.contains_key(key))
        .collect();
    merged.extend(pairs);

    if merged.is_empty() {
        uri.set_query(None);
        return;
    }

    uri.query_pairs_mut().clear().extend_pairs(merged.iter());
}
