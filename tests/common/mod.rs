//! Common test utilities: in-memory transports.

#![allow(dead_code)]

use async_trait::async_trait;
use hal_client::error::BoxError;
use hal_client::{ClientConfig, HalClient, HttpRequest, HttpResponse, Transport};
use http::StatusCode;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

pub const ROOT: &str = "http://propilex.herokuapp.com";

/// Records every request and replays queued responses in order.
///
/// With nothing queued it answers `200` with an empty HAL body.
#[derive(Default)]
pub struct RecordingTransport {
    requests: Mutex<Vec<HttpRequest>>,
    responses: Mutex<VecDeque<Result<HttpResponse, BoxError>>>,
}

impl RecordingTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Queue responses to replay.
    pub fn with_responses(responses: Vec<HttpResponse>) -> Arc<Self> {
        let transport = Self::default();
        transport
            .responses
            .lock()
            .unwrap()
            .extend(responses.into_iter().map(Ok));
        Arc::new(transport)
    }

    /// Fail the next send with `error`.
    pub fn failing(error: BoxError) -> Arc<Self> {
        let transport = Self::default();
        transport.responses.lock().unwrap().push_back(Err(error));
        Arc::new(transport)
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> HttpRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request was sent")
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, BoxError> {
        self.requests.lock().unwrap().push(request.clone());

        match self.responses.lock().unwrap().pop_front() {
            Some(response) => response,
            None => Ok(HttpResponse::new(StatusCode::OK, "")
                .with_header("Content-Type", "application/hal+json")),
        }
    }
}

/// Serves the JSON fixtures under `tests/fixtures` by path and method.
pub struct FixtureTransport;

fn hal(body: &'static str) -> HttpResponse {
    HttpResponse::new(StatusCode::OK, body).with_header("Content-Type", "application/hal+json")
}

#[async_trait]
impl Transport for FixtureTransport {
    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, BoxError> {
        let body = request.body_str().unwrap_or_default();

        let response = match (request.uri.path(), request.method.as_str()) {
            ("/", "GET") => hal(include_str!("../fixtures/root.json")),
            ("/documents", "GET") => hal(include_str!("../fixtures/documents.json")),
            ("/documents", "POST")
                if body == r#"{"title":"Test 4","body":"Lorem ipsum"}"# =>
            {
                HttpResponse::new(StatusCode::CREATED, "").with_header("Location", "/documents/4")
            }
            ("/documents/1", "GET") => hal(include_str!("../fixtures/documents_1.json")),
            ("/documents/2", "GET") => hal(include_str!("../fixtures/documents_2.json")),
            ("/documents/3", "GET") => hal(include_str!("../fixtures/documents_3.json")),
            ("/documents/4", "GET") => hal(include_str!("../fixtures/documents_4.json")),
            ("/documents/4", "PUT")
                if body == r#"{"title":"Test 4 changed","body":"Lorem ipsum"}"# =>
            {
                hal(include_str!("../fixtures/documents_4_changed.json"))
            }
            ("/documents/4", "DELETE") => {
                HttpResponse::new(StatusCode::NO_CONTENT, "").with_header("Content-Type", "text/html")
            }
            (path, _) if !is_route(path) => HttpResponse::new(StatusCode::NOT_FOUND, ""),
            (path, method) => HttpResponse::new(
                StatusCode::METHOD_NOT_ALLOWED,
                format!("No route found for \"{} {}\": Method Not Allowed", path, method),
            )
            .with_header("Content-Type", "text/plain"),
        };

        Ok(response)
    }
}

fn is_route(path: &str) -> bool {
    matches!(
        path,
        "/" | "/documents" | "/documents/1" | "/documents/2" | "/documents/3" | "/documents/4"
    )
}

pub fn client_with(transport: Arc<dyn Transport>) -> HalClient {
    HalClient::with_transport(ROOT, ClientConfig::default(), transport).unwrap()
}

pub fn fixture_client() -> HalClient {
    client_with(Arc::new(FixtureTransport))
}
