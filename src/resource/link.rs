//! A single addressable relation.

use super::relation::Entry;
use crate::client::HalClient;
use crate::error::Result;
use crate::resource::HalResource;
use crate::template::{TemplateError, Variables};
use crate::types::{Reply, RequestOptions};
use http::Method;
use serde_json::Value;

/// A HAL link object.
///
/// A link is a deferred, parameterized request: nothing is fetched until
/// one of the request methods is called, and nothing is cached afterwards.
///
/// # Examples
///
/// ```
/// use hal_client::{HalClient, HalLink};
/// use serde_json::json;
///
/// let client = HalClient::new("http://example.com").unwrap();
/// let data = json!({"href": "/documents{?page}", "templated": true});
/// let link = HalLink::from_json(client, data.as_object().unwrap());
///
/// let variables = json!({"page": 2});
/// assert_eq!(link.uri(variables.as_object().unwrap()).unwrap(), "/documents?page=2");
/// ```
#[derive(Clone, Debug)]
pub struct HalLink {
    client: HalClient,
    href: String,
    templated: Option<bool>,
    link_type: Option<String>,
    deprecation: Option<String>,
    name: Option<String>,
    profile: Option<String>,
    title: Option<String>,
    hreflang: Option<String>,
}

fn string_field(entry: &Entry, key: &str) -> Option<String> {
    entry.get(key).and_then(Value::as_str).map(str::to_string)
}

impl HalLink {
    /// A plain, non-templated link.
    pub fn new(client: HalClient, href: impl Into<String>) -> Self {
        HalLink {
            client,
            href: href.into(),
            templated: None,
            link_type: None,
            deprecation: None,
            name: None,
            profile: None,
            title: None,
            hreflang: None,
        }
    }

    /// Build a link from its JSON object. Unknown keys are ignored and a
    /// missing `href` reads as an empty string.
    pub fn from_json(client: HalClient, entry: &Entry) -> Self {
        let href = match entry.get("href") {
            Some(Value::String(href)) => href.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        };

        HalLink {
            client,
            href,
            templated: entry.get("templated").and_then(Value::as_bool),
            link_type: string_field(entry, "type"),
            deprecation: string_field(entry, "deprecation"),
            name: string_field(entry, "name"),
            profile: string_field(entry, "profile"),
            title: string_field(entry, "title"),
            hreflang: string_field(entry, "hreflang"),
        }
    }

    /// The link target, possibly a URI template.
    pub fn href(&self) -> &str {
        &self.href
    }

    /// Whether `href` is a URI template. `None` when the attribute is absent.
    pub fn templated(&self) -> Option<bool> {
        self.templated
    }

    /// The `type` hint for the target media type.
    pub fn link_type(&self) -> Option<&str> {
        self.link_type.as_deref()
    }

    /// URL describing why the link is deprecated.
    pub fn deprecation(&self) -> Option<&str> {
        self.deprecation.as_deref()
    }

    /// Also serves as the prefix of a curie.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Profile URI hinting at the target's semantics.
    pub fn profile(&self) -> Option<&str> {
        self.profile.as_deref()
    }

    /// Human-readable label.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Language of the target.
    pub fn hreflang(&self) -> Option<&str> {
        self.hreflang.as_deref()
    }

    /// The concrete URI. Templated links are expanded with `variables`;
    /// other links return `href` unchanged.
    pub fn uri(&self, variables: &Variables) -> std::result::Result<String, TemplateError> {
        if self.templated == Some(true) {
            self.client.expander().expand(&self.href, variables)
        } else {
            Ok(self.href.clone())
        }
    }

    /// The link object, omitting unset attributes.
    pub fn to_json(&self) -> Value {
        let mut entry = Entry::new();
        entry.insert("href".to_string(), Value::String(self.href.clone()));
        if let Some(templated) = self.templated {
            entry.insert("templated".to_string(), Value::Bool(templated));
        }
        let attributes = [
            ("type", &self.link_type),
            ("deprecation", &self.deprecation),
            ("name", &self.name),
            ("profile", &self.profile),
            ("title", &self.title),
            ("hreflang", &self.hreflang),
        ];
        for (key, value) in attributes {
            if let Some(value) = value {
                entry.insert(key.to_string(), Value::String(value.clone()));
            }
        }
        Value::Object(entry)
    }

    /// GET the expanded URI. See [`HalClient::get`].
    pub async fn get(&self, variables: &Variables, options: RequestOptions) -> Result<HalResource> {
        self.request(Method::GET, variables, options).await?.into_result()
    }

    /// POST to the expanded URI.
    pub async fn post(&self, variables: &Variables, options: RequestOptions) -> Result<HalResource> {
        self.request(Method::POST, variables, options).await?.into_result()
    }

    /// PUT to the expanded URI.
    pub async fn put(&self, variables: &Variables, options: RequestOptions) -> Result<HalResource> {
        self.request(Method::PUT, variables, options).await?.into_result()
    }

    /// DELETE the expanded URI.
    pub async fn delete(&self, variables: &Variables, options: RequestOptions) -> Result<HalResource> {
        self.request(Method::DELETE, variables, options).await?.into_result()
    }

    /// Expand the URI and issue `method` against it through the owning client.
    pub async fn request(
        &self,
        method: Method,
        variables: &Variables,
        options: RequestOptions,
    ) -> Result<Reply> {
        let uri = self.uri(variables)?;
        self.client.request(method, &uri, options).await
    }
}
