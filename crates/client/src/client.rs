//! Transport client for the storefront REST API.
//!
//! [`ApiClient`] is the single point of outbound HTTP communication. Every
//! call builds `base_url + path`, sends JSON with the current bearer token
//! (if any), and normalizes the response:
//!
//! - non-success status: the server's `message` when the body is a JSON
//!   error envelope, otherwise `HTTP <status>: <reason>`
//! - success with an empty or non-JSON body: decoded from an empty record
//!   `{}`, so operations like DELETE with no content do not fail
//!
//! No retries, no timeouts, no backoff. Each call is a single attempt.

use std::sync::Arc;

use reqwest::header::{CONTENT_TYPE, HeaderValue};
use reqwest::multipart::Form;
use reqwest::{Method, RequestBuilder, Response};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};
use tracing::{debug, error, instrument, warn};
use url::Url;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::session::CredentialProvider;

/// Response type for endpoints that return no payload.
///
/// Decodes from any JSON value and discards it. A bodiless response decodes
/// from the empty record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Empty {}

impl<'de> Deserialize<'de> for Empty {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        IgnoredAny::deserialize(deserializer).map(|_| Self {})
    }
}

/// Storefront API transport client.
///
/// Cheap to clone; clones share the HTTP connection pool and the credential
/// provider.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    http: reqwest::Client,
    /// Base URL without a trailing slash.
    base_url: String,
    credentials: Arc<dyn CredentialProvider>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.base_url)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(
        config: &ClientConfig,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self::with_http_client(http, &config.api_url, credentials))
    }

    /// Create a client around an existing `reqwest::Client`.
    #[must_use]
    pub fn with_http_client(
        http: reqwest::Client,
        base_url: &Url,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Self {
        Self {
            inner: Arc::new(ApiClientInner {
                http,
                base_url: base_url.as_str().trim_end_matches('/').to_string(),
                credentials,
            }),
        }
    }

    /// Base URL every path is appended to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Whether a credential is currently available.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.inner.credentials.access_token().is_some()
    }

    // =========================================================================
    // JSON verbs
    // =========================================================================

    /// `GET path`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure, a non-success status, or a
    /// body that does not decode into `T`.
    #[instrument(skip(self), fields(method = "GET"))]
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path)?;
        self.execute(self.json_request(Method::GET, url)).await
    }

    /// `GET path?query`.
    ///
    /// `query` must serialize to a JSON object. Null fields are omitted;
    /// everything else is stringified.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure, a non-success status, or a
    /// body that does not decode into `T`.
    #[instrument(skip(self, query), fields(method = "GET"))]
    pub async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let mut url = self.url(path)?;
        append_query(&mut url, query)?;
        self.execute(self.json_request(Method::GET, url)).await
    }

    /// `POST path` with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on encoding or transport failure, a non-success
    /// status, or a body that does not decode into `T`.
    #[instrument(skip(self, body), fields(method = "POST"))]
    pub async fn post<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send_json(Method::POST, path, body).await
    }

    /// `PUT path` with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on encoding or transport failure, a non-success
    /// status, or a body that does not decode into `T`.
    #[instrument(skip(self, body), fields(method = "PUT"))]
    pub async fn put<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send_json(Method::PUT, path, body).await
    }

    /// `PATCH path` with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on encoding or transport failure, a non-success
    /// status, or a body that does not decode into `T`.
    #[instrument(skip(self, body), fields(method = "PATCH"))]
    pub async fn patch<T, B>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send_json(Method::PATCH, path, body).await
    }

    /// `DELETE path`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure, a non-success status, or a
    /// body that does not decode into `T`.
    #[instrument(skip(self), fields(method = "DELETE"))]
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path)?;
        self.execute(self.json_request(Method::DELETE, url)).await
    }

    // =========================================================================
    // Multipart
    // =========================================================================

    /// `POST path` with a multipart form.
    ///
    /// Carries the bearer token but not the JSON content type; `reqwest`
    /// sets the multipart boundary header itself.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure, a non-success status, or a
    /// body that does not decode into `T`.
    #[instrument(skip(self, form), fields(method = "POST", multipart = true))]
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
    ) -> Result<T, ApiError> {
        let url = self.url(path)?;
        let request = self.authorize(self.inner.http.post(url)).multipart(form);
        self.execute(request).await
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn url(&self, path: &str) -> Result<Url, ApiError> {
        let raw = format!("{}{path}", self.inner.base_url);
        Url::parse(&raw).map_err(|source| ApiError::Url { url: raw, source })
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.inner.credentials.access_token() {
            Some(token) => builder.bearer_auth(token.expose()),
            None => builder,
        }
    }

    fn json_request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self
            .inner
            .http
            .request(method, url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        self.authorize(builder)
    }

    async fn send_json<T, B>(&self, method: Method, path: &str, body: &B) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.url(path)?;
        let bytes = serde_json::to_vec(body).map_err(ApiError::Encode)?;
        let request = self.json_request(method, url).body(bytes);

        self.execute(request).await
    }

    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = request.send().await.map_err(|e| {
            error!(error = %e, "Request did not complete");
            ApiError::Transport(e)
        })?;

        handle_response(response).await
    }
}

/// Normalize a response into a decoded payload or an `ApiError`.
async fn handle_response<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let status = response.status();
    let body = response.bytes().await?;

    if !status.is_success() {
        let err = ApiError::from_response(status, &body);
        warn!(status = status.as_u16(), error = %err, "API returned an error");
        return Err(err);
    }

    debug!(status = status.as_u16(), bytes = body.len(), "API call succeeded");
    decode_body(&body)
}

/// Decode a success body, treating empty or non-JSON bodies as `{}`.
pub(crate) fn decode_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, ApiError> {
    let value = serde_json::from_slice::<Value>(body).unwrap_or_else(|_| Value::Object(Map::new()));
    serde_json::from_value(value).map_err(ApiError::Decode)
}

/// Append the fields of `query` to `url` as query parameters.
fn append_query<Q: Serialize + ?Sized>(url: &mut Url, query: &Q) -> Result<(), ApiError> {
    let value = serde_json::to_value(query).map_err(ApiError::Encode)?;
    let pairs = query_pairs(&value);

    if !pairs.is_empty() {
        let mut serializer = url.query_pairs_mut();
        for (key, value) in &pairs {
            serializer.append_pair(key, value);
        }
    }

    Ok(())
}

/// Flatten a JSON object into query pairs, dropping nulls.
pub(crate) fn query_pairs(value: &Value) -> Vec<(String, String)> {
    match value {
        Value::Object(map) => map
            .iter()
            .filter_map(|(key, value)| stringify(value).map(|s| (key.clone(), s)))
            .collect(),
        _ => Vec::new(),
    }
}

fn stringify(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(stringify_number(n)),
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(stringify)
                .collect::<Vec<_>>()
                .join(","),
        ),
        Value::Object(_) => Some(value.to_string()),
    }
}

/// Integral floats print without a fraction (`50`, not `50.0`).
fn stringify_number(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() => f.to_string(),
        _ => n.to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::session::Anonymous;

    #[test]
    fn test_query_pairs_skip_nulls() {
        let mut pairs = query_pairs(&json!({
            "platform": "NES",
            "genre": null,
            "page": 2,
        }));
        pairs.sort();
        assert_eq!(
            pairs,
            vec![
                ("page".to_string(), "2".to_string()),
                ("platform".to_string(), "NES".to_string()),
            ]
        );
    }

    #[test]
    fn test_query_pairs_stringify_scalars() {
        let pairs = query_pairs(&json!({
            "featured": true,
            "priceMax": 50.0,
            "priceMin": 12.5,
            "tags": ["rpg", "jrpg"],
        }));
        assert!(pairs.contains(&("featured".to_string(), "true".to_string())));
        assert!(pairs.contains(&("priceMax".to_string(), "50".to_string())));
        assert!(pairs.contains(&("priceMin".to_string(), "12.5".to_string())));
        assert!(pairs.contains(&("tags".to_string(), "rpg,jrpg".to_string())));
    }

    #[test]
    fn test_query_pairs_non_object_is_empty() {
        assert!(query_pairs(&Value::Null).is_empty());
        assert!(query_pairs(&json!([1, 2])).is_empty());
    }

    #[test]
    fn test_append_query_without_pairs_leaves_url_untouched() {
        let mut url = Url::parse("http://localhost:3001/product").unwrap();
        append_query(&mut url, &json!({ "search": null })).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3001/product");
    }

    #[test]
    fn test_append_query_encodes_values() {
        let mut url = Url::parse("http://localhost:3001/product/search").unwrap();
        append_query(&mut url, &json!({ "search": "mega man" })).unwrap();
        assert_eq!(url.query(), Some("search=mega+man"));
    }

    #[test]
    fn test_decode_empty_body_as_empty_record() {
        let empty: Empty = decode_body(b"").unwrap();
        assert_eq!(empty, Empty {});

        let map: Map<String, Value> = decode_body(b"not json").unwrap();
        assert!(map.is_empty());
    }

    #[test]
    fn test_empty_accepts_any_json_value() {
        let bodies: [&[u8]; 6] = [b"true", b"null", b"1", b"\"ok\"", b"[1,2]", br#"{"a":1}"#];
        for body in bodies {
            let empty: Empty = decode_body(body).unwrap();
            assert_eq!(empty, Empty {});
        }
    }

    #[test]
    fn test_decode_mismatched_json_is_error() {
        #[derive(Debug, Deserialize)]
        struct Count {
            #[allow(dead_code)]
            count: u32,
        }

        let result = decode_body::<Count>(br#"{"count":"many"}"#);
        assert!(matches!(result, Err(ApiError::Decode(_))));
    }

    #[test]
    fn test_url_joins_base_and_path() {
        let base = Url::parse("https://api.relic-arcade.test/v1/").unwrap();
        let client =
            ApiClient::with_http_client(reqwest::Client::new(), &base, Arc::new(Anonymous));

        assert_eq!(client.base_url(), "https://api.relic-arcade.test/v1");
        assert_eq!(
            client.url("/product/featured").unwrap().as_str(),
            "https://api.relic-arcade.test/v1/product/featured"
        );
    }

    #[test]
    fn test_client_is_clone_send_sync() {
        fn assert_traits<T: Clone + Send + Sync>() {}
        assert_traits::<ApiClient>();
    }
}
