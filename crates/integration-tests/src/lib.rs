//! Integration tests for the Relic Arcade client.
//!
//! Tests run the real client against [`MockBackend`], an in-process HTTP
//! server on an ephemeral port. The backend answers from a table of canned
//! responses keyed by method and path, and records every request it sees so
//! tests can assert on exactly what went over the wire.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p relic-arcade-integration-tests
//! ```
//!
//! No external services are needed.

use std::collections::HashMap;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, HeaderValue, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use parking_lot::Mutex;
use relic_arcade_client::{ApiError, ClientConfig, RelicArcade, TokenStore};
use serde_json::Value;
use tokio::net::TcpListener;
use url::Url;

pub mod fixtures;

/// One request as received by the mock backend.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl RecordedRequest {
    /// Header value as text.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Decoded query parameters, in wire order.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        self.query
            .as_deref()
            .map(|q| {
                url::form_urlencoded::parse(q.as_bytes())
                    .into_owned()
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Value of one query parameter.
    #[must_use]
    pub fn query_param(&self, key: &str) -> Option<String> {
        self.query_pairs()
            .into_iter()
            .find_map(|(k, v)| (k == key).then_some(v))
    }

    /// Body parsed as JSON, `Value::Null` if it is not JSON.
    #[must_use]
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap_or(Value::Null)
    }

    /// Body as lossy UTF-8, for inspecting multipart payloads.
    #[must_use]
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Canned response for one route.
#[derive(Debug, Clone)]
pub struct MockResponse {
    status: StatusCode,
    content_type: Option<&'static str>,
    body: Vec<u8>,
}

impl MockResponse {
    /// JSON body with the given status.
    #[must_use]
    pub fn json(status: StatusCode, body: &Value) -> Self {
        Self {
            status,
            content_type: Some("application/json"),
            body: body.to_string().into_bytes(),
        }
    }

    /// `200 OK` with a JSON body.
    #[must_use]
    pub fn ok(body: &Value) -> Self {
        Self::json(StatusCode::OK, body)
    }

    /// Plain-text body with the given status.
    #[must_use]
    pub fn text(status: StatusCode, body: &str) -> Self {
        Self {
            status,
            content_type: Some("text/plain; charset=utf-8"),
            body: body.as_bytes().to_vec(),
        }
    }

    /// No body at all.
    #[must_use]
    pub const fn empty(status: StatusCode) -> Self {
        Self {
            status,
            content_type: None,
            body: Vec::new(),
        }
    }
}

impl IntoResponse for MockResponse {
    fn into_response(self) -> Response {
        let mut response = (self.status, self.body).into_response();
        match self.content_type {
            Some(content_type) => {
                response
                    .headers_mut()
                    .insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
            }
            None => {
                response.headers_mut().remove(CONTENT_TYPE);
            }
        }
        response
    }
}

#[derive(Default)]
struct MockState {
    routes: Mutex<HashMap<(Method, String), MockResponse>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

/// In-process storefront backend.
///
/// Unknown routes answer `404` with a plain-text body, like the real
/// backend's framework default.
#[derive(Clone)]
pub struct MockBackend {
    base_url: Url,
    state: Arc<MockState>,
}

impl MockBackend {
    /// Bind to an ephemeral localhost port and start serving.
    ///
    /// # Errors
    ///
    /// Returns an error if the listener cannot be bound.
    pub async fn start() -> std::io::Result<Self> {
        let state = Arc::new(MockState::default());
        let app = Router::new().fallback(handle).with_state(Arc::clone(&state));

        let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await?;
        let addr: SocketAddr = listener.local_addr()?;

        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        let base_url = Url::parse(&format!("http://{addr}"))
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;

        Ok(Self { base_url, state })
    }

    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Answer `method path` with `response` from now on.
    pub fn respond(&self, method: Method, path: &str, response: MockResponse) -> &Self {
        self.state
            .routes
            .lock()
            .insert((method, path.to_string()), response);
        self
    }

    /// Every request received so far.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().clone()
    }

    /// The most recent request.
    ///
    /// # Panics
    ///
    /// Panics if no request has been received.
    #[must_use]
    pub fn last_request(&self) -> RecordedRequest {
        self.state
            .requests
            .lock()
            .last()
            .cloned()
            .unwrap_or_else(|| panic!("mock backend received no requests"))
    }

    /// Services pointed at this backend, sharing `store`.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn arcade<S>(&self, store: Arc<S>) -> Result<RelicArcade, ApiError>
    where
        S: TokenStore + 'static,
    {
        RelicArcade::new(&ClientConfig::new(self.base_url.clone()), store)
    }
}

async fn handle(
    State(state): State<Arc<MockState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri.path().to_string();

    state.requests.lock().push(RecordedRequest {
        method: method.clone(),
        path: path.clone(),
        query: uri.query().map(str::to_string),
        headers,
        body,
    });

    let canned = state.routes.lock().get(&(method.clone(), path.clone())).cloned();
    canned.unwrap_or_else(|| {
        MockResponse::text(StatusCode::NOT_FOUND, &format!("Cannot {method} {path}"))
    })
    .into_response()
}

/// Base URL of a port nothing is listening on.
///
/// # Errors
///
/// Returns an error if a probe listener cannot be bound.
pub async fn closed_port_url() -> std::io::Result<Url> {
    let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await?;
    let addr = listener.local_addr()?;
    drop(listener);

    Url::parse(&format!("http://{addr}"))
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))
}
