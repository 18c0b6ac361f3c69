//! The navigable HAL resource.

use super::relation::{self, Entry};
use super::HalLink;
use crate::client::HalClient;
use crate::error::{InvalidRelationError, Result};
use crate::protocol::{keys, rels};
use crate::template::Variables;
use crate::types::{Reply, RequestOptions};
use http::Method;
use indexmap::IndexMap;
use serde_json::{Map, Value};

/// A resource materialized from a HAL document.
///
/// Holds the document's properties (everything except `_links` and
/// `_embedded`) plus its normalized link and embedded relations. Links are
/// resolved directly by relation name and, failing that, through the
/// document's curies.
///
/// # Invariants
///
/// - `properties` never contains the `_links` or `_embedded` keys
/// - every relation value is a list of JSON objects, in document order
///
/// # Examples
///
/// ```
/// use hal_client::{HalClient, HalResource};
/// use serde_json::json;
///
/// let client = HalClient::new("http://example.com").unwrap();
/// let resource = HalResource::from_json(client, json!({
///     "total": 3,
///     "_links": {
///         "curies": [{"name": "doc", "href": "http://example.com/rels/{rel}", "templated": true}],
///         "doc:documents": {"href": "/documents"}
///     }
/// }));
///
/// assert_eq!(resource.property("total"), Some(&json!(3)));
/// assert!(resource.has_link("documents"));
/// assert_eq!(resource.first_link("documents").unwrap().unwrap().href(), "/documents");
/// ```
#[derive(Clone, Debug)]
pub struct HalResource {
    client: HalClient,
    properties: Map<String, Value>,
    links: IndexMap<String, Vec<Entry>>,
    embedded: IndexMap<String, Vec<Entry>>,
}

impl HalResource {
    /// An empty resource bound to `client`.
    pub fn new(client: HalClient) -> Self {
        HalResource {
            client,
            properties: Map::new(),
            links: IndexMap::new(),
            embedded: IndexMap::new(),
        }
    }

    /// Materialize a decoded JSON body.
    ///
    /// Objects are split into properties and relations. Any other value is
    /// treated like an embedded scalar: its elements become properties keyed
    /// by index.
    pub fn from_json(client: HalClient, data: Value) -> Self {
        match data {
            Value::Object(map) => Self::from_map(client, map),
            Value::Null => Self::new(client),
            other => Self::from_map(client, relation::embedded_entry(other)),
        }
    }

    /// Build from an already decoded JSON object.
    pub fn from_map(client: HalClient, mut data: Map<String, Value>) -> Self {
        let links = data
            .remove(keys::LINKS)
            .map(|raw| relations(raw, relation::normalize_links))
            .unwrap_or_default();
        let embedded = data
            .remove(keys::EMBEDDED)
            .map(|raw| relations(raw, relation::normalize_embedded))
            .unwrap_or_default();

        HalResource {
            client,
            properties: data,
            links,
            embedded,
        }
    }

    /// The client shared with links and embedded resources.
    pub fn client(&self) -> &HalClient {
        &self.client
    }

    // ========== Properties ==========

    /// All properties, `_links` and `_embedded` excluded.
    pub fn properties(&self) -> &Map<String, Value> {
        &self.properties
    }

    /// Whether the property exists and is not `null`.
    pub fn has_property(&self, name: &str) -> bool {
        self.property(name).is_some()
    }

    /// A single property. `null` reads as absent.
    pub fn property(&self, name: &str) -> Option<&Value> {
        self.properties.get(name).filter(|value| !value.is_null())
    }

    // ========== Embedded resources ==========

    /// Whether any embedded relation is declared.
    pub fn has_resources(&self) -> bool {
        !self.embedded.is_empty()
    }

    /// Whether `rel` is a declared embedded relation.
    pub fn has_resource(&self, rel: &str) -> bool {
        self.embedded.contains_key(rel)
    }

    /// Every embedded relation with its resources, in document order.
    pub fn resources(&self) -> IndexMap<String, Vec<HalResource>> {
        self.embedded
            .iter()
            .map(|(rel, entries)| (rel.clone(), self.to_resources(entries)))
            .collect()
    }

    /// Embedded resources under `rel`.
    ///
    /// Fails with [`InvalidRelationError`] when `rel` is not declared.
    pub fn resource(&self, rel: &str) -> Result<Vec<HalResource>> {
        Ok(self.to_resources(self.embedded_entries(rel)?))
    }

    /// The first embedded resource, or `None` when the relation is empty.
    pub fn first_resource(&self, rel: &str) -> Result<Option<HalResource>> {
        Ok(self
            .embedded_entries(rel)?
            .first()
            .map(|entry| HalResource::from_map(self.client.clone(), entry.clone())))
    }

    fn embedded_entries(&self, rel: &str) -> Result<&[Entry]> {
        self.embedded
            .get(rel)
            .map(Vec::as_slice)
            .ok_or_else(|| InvalidRelationError::embedded(rel).into())
    }

    fn to_resources(&self, entries: &[Entry]) -> Vec<HalResource> {
        entries
            .iter()
            .map(|entry| HalResource::from_map(self.client.clone(), entry.clone()))
            .collect()
    }

    // ========== Links ==========

    /// Whether any link relation is declared.
    pub fn has_links(&self) -> bool {
        !self.links.is_empty()
    }

    /// Whether `rel` resolves, directly or through a curie.
    pub fn has_link(&self, rel: &str) -> bool {
        self.resolve_link(rel).is_some()
    }

    /// Every link relation with its links, in document order.
    pub fn links(&self) -> IndexMap<String, Vec<HalLink>> {
        self.links
            .iter()
            .map(|(rel, entries)| (rel.clone(), self.to_links(entries)))
            .collect()
    }

    /// Links under `rel`, looked up directly and then through curies.
    ///
    /// Fails with [`InvalidRelationError`] when neither matches.
    pub fn link(&self, rel: &str) -> Result<Vec<HalLink>> {
        Ok(self.to_links(self.link_entries(rel)?))
    }

    /// The first link, or `None` when the relation is empty.
    pub fn first_link(&self, rel: &str) -> Result<Option<HalLink>> {
        Ok(self
            .link_entries(rel)?
            .first()
            .map(|entry| HalLink::from_json(self.client.clone(), entry)))
    }

    fn link_entries(&self, rel: &str) -> Result<&[Entry]> {
        self.resolve_link(rel)
            .ok_or_else(|| InvalidRelationError::link(rel).into())
    }

    /// Look `rel` up directly, then as `"{name}:{rel}"` for each named curie
    /// in document order.
    fn resolve_link(&self, rel: &str) -> Option<&[Entry]> {
        if let Some(entries) = self.links.get(rel) {
            return Some(entries);
        }

        self.links
            .get(rels::CURIES)?
            .iter()
            .filter_map(|curie| curie.get("name").and_then(Value::as_str))
            .filter(|name| !name.is_empty())
            .find_map(|name| self.links.get(&format!("{}:{}", name, rel)))
            .map(Vec::as_slice)
    }

    fn to_links(&self, entries: &[Entry]) -> Vec<HalLink> {
        entries
            .iter()
            .map(|entry| HalLink::from_json(self.client.clone(), entry))
            .collect()
    }

    // ========== Serialization ==========

    /// The document in normalized form: every relation is a list of objects
    /// and embedded resources are normalized recursively.
    pub fn to_json(&self) -> Value {
        let mut data = self.properties.clone();

        if !self.links.is_empty() {
            let links: Map<String, Value> = self
                .links
                .iter()
                .map(|(rel, entries)| {
                    let list = entries.iter().cloned().map(Value::Object).collect();
                    (rel.clone(), Value::Array(list))
                })
                .collect();
            data.insert(keys::LINKS.to_string(), Value::Object(links));
        }

        if !self.embedded.is_empty() {
            let embedded: Map<String, Value> = self
                .resources()
                .into_iter()
                .map(|(rel, resources)| {
                    let list = resources.iter().map(HalResource::to_json).collect();
                    (rel, Value::Array(list))
                })
                .collect();
            data.insert(keys::EMBEDDED.to_string(), Value::Object(embedded));
        }

        Value::Object(data)
    }

    // ========== Self requests ==========

    /// GET the first `self` link.
    pub async fn get(&self, options: RequestOptions) -> Result<HalResource> {
        self.self_link()?.get(&Variables::new(), options).await
    }

    /// POST to the first `self` link.
    pub async fn post(&self, options: RequestOptions) -> Result<HalResource> {
        self.self_link()?.post(&Variables::new(), options).await
    }

    /// PUT to the first `self` link.
    pub async fn put(&self, options: RequestOptions) -> Result<HalResource> {
        self.self_link()?.put(&Variables::new(), options).await
    }

    /// DELETE the first `self` link.
    pub async fn delete(&self, options: RequestOptions) -> Result<HalResource> {
        self.self_link()?.delete(&Variables::new(), options).await
    }

    /// Issue `method` against the first `self` link.
    pub async fn request(&self, method: Method, options: RequestOptions) -> Result<Reply> {
        self.self_link()?
            .request(method, &Variables::new(), options)
            .await
    }

    fn self_link(&self) -> Result<HalLink> {
        self.first_link(rels::SELF)?
            .ok_or_else(|| InvalidRelationError::link(rels::SELF).into())
    }
}

fn relations(raw: Value, normalize: fn(Value) -> Vec<Entry>) -> IndexMap<String, Vec<Entry>> {
    match raw {
        Value::Object(map) => map
            .into_iter()
            .map(|(rel, value)| (rel, normalize(value)))
            .collect(),
        _ => IndexMap::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HalError;
    use serde_json::json;

    fn client() -> HalClient {
        HalClient::new("http://propilex.herokuapp.com").unwrap()
    }

    fn documents() -> Value {
        json!({
            "page": 1,
            "limit": 10,
            "pages": 1,
            "total": 3,
            "_links": {
                "self": {"href": "/documents?page=1"},
                "first": {"href": "/documents?page=1"},
                "last": {"href": "/documents?page=1"}
            },
            "_embedded": {
                "documents": [
                    {"id": 1, "title": "Test 1", "body": "Lorem ipsum", "_links": {"self": {"href": "/documents/1"}}},
                    {"id": 2, "title": "Test 2", "body": "Lorem ipsum", "_links": {"self": {"href": "/documents/2"}}},
                    {"id": 3, "title": "Test 3", "body": "Lorem ipsum", "_links": {"self": {"href": "/documents/3"}}}
                ]
            }
        })
    }

    #[test]
    fn test_extracts_properties() {
        let resource = HalResource::from_json(client(), documents());

        assert_eq!(
            resource.properties(),
            json!({"page": 1, "limit": 10, "pages": 1, "total": 3})
                .as_object()
                .unwrap()
        );
        assert!(resource.has_property("page"));
        assert!(resource.has_property("total"));
        assert!(!resource.has_property("foo"));
        assert!(!resource.properties().contains_key("_links"));
        assert!(!resource.properties().contains_key("_embedded"));
    }

    #[test]
    fn test_null_property_is_absent() {
        let resource = HalResource::from_json(client(), json!({"gone": null}));
        assert!(!resource.has_property("gone"));
        assert_eq!(resource.property("gone"), None);
    }

    #[test]
    fn test_extracts_resources() {
        let mut data = documents();
        data["_embedded"]["empty_array"] = json!([]);
        data["_embedded"]["string_array"] = json!(["StringArray"]);
        data["_embedded"]["string"] = json!("String");
        let resource = HalResource::from_json(client(), data);

        assert!(resource.has_resources());
        assert!(resource.resources().contains_key("documents"));
        assert!(resource.has_resource("documents"));
        assert_eq!(resource.resource("documents").unwrap().len(), 3);
        assert!(resource.first_resource("documents").unwrap().is_some());

        assert!(resource.first_resource("empty_array").unwrap().is_none());

        assert_eq!(resource.resource("string_array").unwrap().len(), 1);
        let first = resource.first_resource("string_array").unwrap().unwrap();
        assert_eq!(first.property("0"), Some(&json!("StringArray")));

        assert_eq!(resource.resource("string").unwrap().len(), 1);
        let first = resource.first_resource("string").unwrap().unwrap();
        assert_eq!(first.property("0"), Some(&json!("String")));
    }

    #[test]
    fn test_extracts_links() {
        let mut data = documents();
        data["_links"]["empty_array"] = json!([]);
        data["_links"]["string_array"] = json!(["StringArray"]);
        data["_links"]["string"] = json!("String");
        let resource = HalResource::from_json(client(), data);

        assert!(resource.has_links());
        assert!(resource.links().contains_key("self"));
        assert!(resource.has_link("self"));
        assert_eq!(resource.link("self").unwrap().len(), 1);

        assert!(resource.first_link("empty_array").unwrap().is_none());

        assert_eq!(resource.link("string_array").unwrap().len(), 1);
        let link = resource.first_link("string_array").unwrap().unwrap();
        assert_eq!(link.href(), "StringArray");

        let link = resource.first_link("string").unwrap().unwrap();
        assert_eq!(link.href(), "String");

        assert!(!resource.has_link("non_existing"));
    }

    #[test]
    fn test_unknown_relations_raise() {
        let resource = HalResource::from_json(client(), documents());

        assert!(matches!(
            resource.link("missing"),
            Err(HalError::InvalidRelation(err)) if err.rel == "missing"
        ));
        assert!(resource.first_link("missing").is_err());
        assert!(resource.resource("missing").is_err());
        assert!(resource.first_resource("missing").is_err());
        assert!(!resource.has_resource("missing"));
    }

    #[test]
    fn test_extracts_curies() {
        let resource = HalResource::from_json(
            client(),
            json!({
                "_links": {
                    "curies": [
                        {"href": "http://example.com/docs/rels/{rel}", "templated": true},
                        {"name": "p", "href": "http://example.com/docs/rels/{rel}", "templated": true}
                    ],
                    "p:documents": {"href": "/documents"}
                }
            }),
        );

        assert!(resource.has_link("documents"));
        assert_eq!(resource.link("documents").unwrap().len(), 1);
        assert_eq!(
            resource.first_link("documents").unwrap().unwrap().href(),
            "/documents"
        );
        assert!(resource.has_link("p:documents"));
        assert_eq!(resource.link("p:documents").unwrap().len(), 1);
        assert!(!resource.has_link("other"));
    }

    #[test]
    fn test_first_curie_wins() {
        let resource = HalResource::from_json(
            client(),
            json!({
                "_links": {
                    "curies": [
                        {"name": "b", "href": "/b/{rel}", "templated": true},
                        {"name": "a", "href": "/a/{rel}", "templated": true}
                    ],
                    "a:item": "/from-a",
                    "b:item": "/from-b"
                }
            }),
        );

        assert_eq!(resource.first_link("item").unwrap().unwrap().href(), "/from-b");
    }

    #[test]
    fn test_round_trip_normalized_json() {
        let mut data = documents();
        data["_links"]["string"] = json!("String");
        data["_embedded"]["string"] = json!("String");
        let resource = HalResource::from_json(client(), data);

        let normalized = resource.to_json();
        let rebuilt = HalResource::from_json(client(), normalized.clone());

        assert_eq!(rebuilt.properties(), resource.properties());
        assert_eq!(
            rebuilt.links().keys().collect::<Vec<_>>(),
            resource.links().keys().collect::<Vec<_>>()
        );
        for (rel, links) in resource.links() {
            assert_eq!(rebuilt.link(&rel).unwrap().len(), links.len());
        }
        for (rel, resources) in resource.resources() {
            assert_eq!(rebuilt.resource(&rel).unwrap().len(), resources.len());
        }
        assert_eq!(rebuilt.to_json(), normalized);
    }

    #[tokio::test]
    async fn test_self_request_without_self_link() {
        let resource = HalResource::new(client());
        let err = resource.get(RequestOptions::new()).await.unwrap_err();
        assert!(matches!(err, HalError::InvalidRelation(err) if err.rel == "self"));
    }
}
