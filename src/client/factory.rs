//! Response materialization.

use crate::client::HalClient;
use crate::error::{BadResponseError, Result};
use crate::protocol::is_accepted_content_type;
use crate::resource::HalResource;
use crate::types::{HttpRequest, HttpResponse};
use http::header::{CONTENT_TYPE, LOCATION};
use http::StatusCode;
use serde_json::Value;
use std::sync::Arc;

/// Outcome of [`ResourceFactory::create`].
#[derive(Debug)]
pub(crate) enum Materialized {
    Resource(HalResource),
    /// A 201 with an empty body and a `Location`. The caller issues one GET
    /// against the location and uses its result instead.
    FollowLocation(String),
}

/// Turns a response into a [`HalResource`].
///
/// The checks run in a fixed order and each one may end the process:
///
/// 1. `204 No Content` yields an empty resource, whatever the body.
/// 2. The body is read and trimmed. A read failure is a bad response.
/// 3. `201 Created` with an empty body and a `Location` asks for a follow-up.
/// 4. The content type must be one of the accepted media types.
/// 5. An empty body yields an empty resource.
/// 6. The body must decode as JSON.
#[derive(Clone, Debug)]
pub(crate) struct ResourceFactory {
    content_types: Arc<[String]>,
}

impl ResourceFactory {
    pub(crate) fn new<S: AsRef<str>>(content_types: &[S]) -> Self {
        ResourceFactory {
            content_types: content_types.iter().map(|t| t.as_ref().to_string()).collect(),
        }
    }

    pub(crate) fn content_types(&self) -> &[String] {
        &self.content_types
    }

    /// With `ignore_invalid_content_type` set, a rejected content type yields
    /// an empty resource instead of an error. With `follow_location` unset,
    /// step 3 is skipped.
    pub(crate) fn create(
        &self,
        client: &HalClient,
        request: &HttpRequest,
        response: &HttpResponse,
        ignore_invalid_content_type: bool,
        follow_location: bool,
    ) -> Result<Materialized> {
        let empty = || Ok(Materialized::Resource(HalResource::new(client.clone())));

        if response.status == StatusCode::NO_CONTENT {
            return empty();
        }

        let body = match response.body.bytes() {
            Ok(bytes) => bytes.as_ref().trim_ascii(),
            Err(e) => {
                return Err(BadResponseError::new(
                    format!("Error getting response body: {}.", e),
                    request.clone(),
                    Some(response.clone()),
                    HalResource::new(client.clone()),
                )
                .with_source(Box::new(e))
                .into());
            }
        };

        if follow_location && response.status == StatusCode::CREATED && body.is_empty() {
            if let Some(location) = response.header(LOCATION.as_str()).first() {
                return Ok(Materialized::FollowLocation(location.to_string()));
            }
        }

        let declared = response.header_line(CONTENT_TYPE.as_str());
        if !is_accepted_content_type(&declared, &self.content_types[..]) {
            if ignore_invalid_content_type {
                return empty();
            }
            let declared = if declared.is_empty() { "none".to_string() } else { declared };
            return Err(BadResponseError::new(
                format!(
                    "Request did not return a valid content type. Returned content type: {}.",
                    declared
                ),
                request.clone(),
                Some(response.clone()),
                HalResource::new(client.clone()),
            )
            .into());
        }

        if body.is_empty() {
            return empty();
        }

        match serde_json::from_slice::<Value>(body) {
            Ok(data) => Ok(Materialized::Resource(HalResource::from_json(client.clone(), data))),
            Err(e) => Err(BadResponseError::new(
                format!("JSON parse error: {}.", e),
                request.clone(),
                Some(response.clone()),
                HalResource::new(client.clone()),
            )
            .with_source(Box::new(e))
            .into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HalError;
    use crate::protocol::media_types::ACCEPTED;
    use crate::types::ResponseBody;
    use http::Method;
    use url::Url;

    fn client() -> HalClient {
        HalClient::new("http://propilex.herokuapp.com").unwrap()
    }

    fn request() -> HttpRequest {
        HttpRequest::new(Method::GET, Url::parse("http://propilex.herokuapp.com/").unwrap())
    }

    fn create(response: HttpResponse, ignore: bool) -> Result<Materialized> {
        ResourceFactory::new(&ACCEPTED[..]).create(&client(), &request(), &response, ignore, true)
    }

    fn resource(result: Result<Materialized>) -> HalResource {
        match result.unwrap() {
            Materialized::Resource(resource) => resource,
            other => panic!("expected a resource, got {:?}", other),
        }
    }

    fn message(result: Result<Materialized>) -> String {
        match result {
            Err(HalError::BadResponse(err)) => err.message().to_string(),
            other => panic!("expected a bad response, got {:?}", other),
        }
    }

    #[test]
    fn test_no_content_ignores_body() {
        let response = HttpResponse::new(StatusCode::NO_CONTENT, "not json at all");
        let resource = resource(create(response, false));
        assert!(resource.properties().is_empty());
        assert!(!resource.has_links());
        assert!(!resource.has_resources());
    }

    #[test]
    fn test_unreadable_body() {
        let cause: Arc<dyn std::error::Error + Send + Sync> =
            Arc::new(std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "stream closed"));
        let response = HttpResponse::new(StatusCode::OK, "")
            .with_header("Content-Type", "application/hal+json")
            .with_body(ResponseBody::Unreadable(cause));
        assert_eq!(message(create(response, false)), "Error getting response body: stream closed.");
    }

    #[test]
    fn test_created_with_location() {
        let response = HttpResponse::new(StatusCode::CREATED, "  \n").with_header("Location", "/x");
        assert!(matches!(
            create(response, false).unwrap(),
            Materialized::FollowLocation(location) if location == "/x"
        ));
    }

    #[test]
    fn test_created_with_body_does_not_follow() {
        let response = HttpResponse::new(StatusCode::CREATED, r#"{"id": 7}"#)
            .with_header("Location", "/x")
            .with_header("Content-Type", "application/hal+json");
        assert_eq!(resource(create(response, false)).property("id"), Some(&serde_json::json!(7)));
    }

    #[test]
    fn test_created_without_following() {
        let response = HttpResponse::new(StatusCode::CREATED, "")
            .with_header("Location", "/x")
            .with_header("Content-Type", "application/json");
        let result =
            ResourceFactory::new(&ACCEPTED[..]).create(&client(), &request(), &response, false, false);
        assert!(resource(result).properties().is_empty());
    }

    #[test]
    fn test_empty_hal_document() {
        let response = HttpResponse::new(StatusCode::OK, "{}").with_header("Content-Type", "application/hal+json");
        let resource = resource(create(response, false));
        assert!(resource.properties().is_empty());
        assert!(!resource.has_links());
        assert!(!resource.has_resources());
    }

    #[test]
    fn test_invalid_content_type() {
        let response = HttpResponse::new(StatusCode::OK, "{}").with_header("Content-Type", "text/plain");
        assert_eq!(
            message(create(response, false)),
            "Request did not return a valid content type. Returned content type: text/plain."
        );
    }

    #[test]
    fn test_missing_content_type() {
        let response = HttpResponse::new(StatusCode::OK, "{}");
        assert!(message(create(response, false)).ends_with("Returned content type: none."));
    }

    #[test]
    fn test_multiple_content_types_rejected() {
        let response = HttpResponse::new(StatusCode::OK, "{}")
            .with_header("Content-Type", "application/json")
            .with_header("Content-Type", "application/hal+json");
        assert!(message(create(response, false)).contains("application/json, application/hal+json"));
    }

    #[test]
    fn test_ignored_invalid_content_type() {
        let response = HttpResponse::new(StatusCode::OK, r#"{"a": 1}"#).with_header("Content-Type", "text/html");
        assert!(resource(create(response, true)).properties().is_empty());
    }

    #[test]
    fn test_charset_suffix_accepted() {
        let response = HttpResponse::new(StatusCode::OK, r#"{"a": 1}"#)
            .with_header("Content-Type", "application/hal+json; charset=utf-8");
        assert!(resource(create(response, false)).has_property("a"));
    }

    #[test]
    fn test_empty_body() {
        let response = HttpResponse::new(StatusCode::OK, " ").with_header("Content-Type", "application/json");
        assert!(resource(create(response, false)).properties().is_empty());
    }

    #[test]
    fn test_invalid_json() {
        let response = HttpResponse::new(StatusCode::OK, "{not json")
            .with_header("Content-Type", "application/json");
        assert!(message(create(response, false)).starts_with("JSON parse error: "));
    }

    #[test]
    fn test_configured_content_types() {
        let response = HttpResponse::new(StatusCode::OK, "{}").with_header("Content-Type", "application/hal+json");
        let factory = ResourceFactory::new(&["application/json"][..]);
        let result = factory.create(&client(), &request(), &response, false, true);
        assert!(message(result).contains("application/hal+json"));
    }
}
