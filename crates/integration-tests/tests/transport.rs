//! Transport behavior: headers, query encoding and response normalization.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use axum::http::{Method, StatusCode};
use relic_arcade_client::{
    Anonymous, ApiClient, ApiError, ClientConfig, Empty, MemoryTokenStore, StaticToken, TokenStore,
};
use relic_arcade_core::{AccessToken, PaginatedResponse, PaginationParams, SortOrder};
use relic_arcade_integration_tests::{MockBackend, MockResponse, closed_port_url, fixtures};
use serde_json::{Value, json};

fn anonymous_client(backend: &MockBackend) -> ApiClient {
    ApiClient::new(&ClientConfig::new(backend.base_url().clone()), Arc::new(Anonymous)).unwrap()
}

// ============================================================================
// Headers
// ============================================================================

#[tokio::test]
async fn test_bearer_token_attached_when_present() {
    let backend = MockBackend::start().await.unwrap();
    backend.respond(Method::GET, "/user/profile", MockResponse::ok(&fixtures::user("u1", "a@b.c")));

    let client = ApiClient::new(
        &ClientConfig::new(backend.base_url().clone()),
        Arc::new(StaticToken::new(AccessToken::new("abc123"))),
    )
    .unwrap();
    let _: Value = client.get("/user/profile").await.unwrap();

    let request = backend.last_request();
    assert_eq!(request.header("authorization"), Some("Bearer abc123"));
    assert_eq!(request.header("content-type"), Some("application/json"));
}

#[tokio::test]
async fn test_no_authorization_header_when_anonymous() {
    let backend = MockBackend::start().await.unwrap();
    backend.respond(Method::GET, "/product", MockResponse::ok(&fixtures::page(vec![], 1, 10, 0)));

    let client = anonymous_client(&backend);
    let _: Value = client.get("/product").await.unwrap();

    assert!(backend.last_request().header("authorization").is_none());
}

#[tokio::test]
async fn test_token_read_on_every_request() {
    let backend = MockBackend::start().await.unwrap();
    backend.respond(Method::GET, "/cart/count", MockResponse::ok(&json!({ "count": 0 })));

    let store = Arc::new(MemoryTokenStore::new());
    let config = ClientConfig::new(backend.base_url().clone());
    let client = ApiClient::new(&config, store.clone()).unwrap();

    let _: Value = client.get("/cart/count").await.unwrap();
    assert!(backend.last_request().header("authorization").is_none());

    store.save(&AccessToken::new("later")).unwrap();
    let _: Value = client.get("/cart/count").await.unwrap();
    assert_eq!(backend.last_request().header("authorization"), Some("Bearer later"));
}

#[tokio::test]
async fn test_user_agent_from_config() {
    let backend = MockBackend::start().await.unwrap();
    backend.respond(Method::GET, "/product/featured", MockResponse::ok(&json!([])));

    let mut config = ClientConfig::new(backend.base_url().clone());
    config.user_agent = "relic-arcade-tests/1.0".to_string();
    let client = ApiClient::new(&config, Arc::new(Anonymous)).unwrap();
    let _: Value = client.get("/product/featured").await.unwrap();

    assert_eq!(backend.last_request().header("user-agent"), Some("relic-arcade-tests/1.0"));
}

// ============================================================================
// Query encoding
// ============================================================================

#[tokio::test]
async fn test_unset_query_fields_omitted() {
    let backend = MockBackend::start().await.unwrap();
    backend.respond(Method::GET, "/product", MockResponse::ok(&fixtures::page(vec![], 2, 10, 0)));

    let client = anonymous_client(&backend);
    let params = PaginationParams::page(2).with_limit(10);
    let _: PaginatedResponse<Value> = client.get_with_query("/product", &params).await.unwrap();

    let mut pairs = backend.last_request().query_pairs();
    pairs.sort();
    assert_eq!(
        pairs,
        vec![
            ("limit".to_string(), "10".to_string()),
            ("page".to_string(), "2".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_null_query_values_omitted() {
    let backend = MockBackend::start().await.unwrap();
    let page = fixtures::page(vec![], 1, 10, 0);
    backend.respond(Method::GET, "/product/filter", MockResponse::ok(&page));

    let client = anonymous_client(&backend);
    let query = json!({ "platform": "NES", "genre": null, "priceMax": 50 });
    let _: Value = client.get_with_query("/product/filter", &query).await.unwrap();

    let request = backend.last_request();
    assert_eq!(request.query_param("platform").as_deref(), Some("NES"));
    assert_eq!(request.query_param("priceMax").as_deref(), Some("50"));
    assert!(request.query_param("genre").is_none());
}

#[tokio::test]
async fn test_sort_fields_are_camel_case() {
    let backend = MockBackend::start().await.unwrap();
    backend.respond(Method::GET, "/product", MockResponse::ok(&fixtures::page(vec![], 1, 10, 0)));

    let client = anonymous_client(&backend);
    let params = PaginationParams::default().sorted_by("price", SortOrder::Desc);
    let _: Value = client.get_with_query("/product", &params).await.unwrap();

    let request = backend.last_request();
    assert_eq!(request.query_param("sortBy").as_deref(), Some("price"));
    assert_eq!(request.query_param("sortOrder").as_deref(), Some("desc"));
}

// ============================================================================
// Error normalization
// ============================================================================

#[tokio::test]
async fn test_server_message_surfaced_verbatim() {
    let backend = MockBackend::start().await.unwrap();
    backend.respond(
        Method::POST,
        "/cart/items",
        MockResponse::json(StatusCode::BAD_REQUEST, &json!({ "message": "Invalid quantity" })),
    );

    let client = anonymous_client(&backend);
    let err = client
        .post::<Value, _>("/cart/items", &json!({ "productId": "p1", "quantity": 99 }))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Invalid quantity");
    assert_eq!(err.status(), Some(400));
}

#[tokio::test]
async fn test_validation_messages_joined() {
    let backend = MockBackend::start().await.unwrap();
    backend.respond(
        Method::POST,
        "/auth/register",
        MockResponse::json(
            StatusCode::BAD_REQUEST,
            &json!({
                "message": ["email must be an email", "cpf should not be empty"],
                "statusCode": 400
            }),
        ),
    );

    let client = anonymous_client(&backend);
    let err = client
        .post::<Value, _>("/auth/register", &json!({}))
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "email must be an email, cpf should not be empty");
}

#[tokio::test]
async fn test_json_error_without_message_uses_generic_text() {
    let backend = MockBackend::start().await.unwrap();
    backend.respond(
        Method::GET,
        "/cart",
        MockResponse::json(StatusCode::INTERNAL_SERVER_ERROR, &json!({ "error": "boom" })),
    );

    let client = anonymous_client(&backend);
    let err = client.get::<Value>("/cart").await.unwrap_err();

    assert_eq!(err.to_string(), "Request failed");
    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn test_non_object_json_error_uses_generic_text() {
    let backend = MockBackend::start().await.unwrap();
    backend.respond(
        Method::GET,
        "/cart",
        MockResponse::json(StatusCode::SERVICE_UNAVAILABLE, &json!("maintenance")),
    );

    let client = anonymous_client(&backend);
    let err = client.get::<Value>("/cart").await.unwrap_err();

    assert_eq!(err.to_string(), "Request failed");
    assert_eq!(err.status(), Some(503));
}

#[tokio::test]
async fn test_unparsable_error_body_uses_status_line() {
    let backend = MockBackend::start().await.unwrap();

    let client = anonymous_client(&backend);
    let err = client.get::<Value>("/does-not-exist").await.unwrap_err();

    assert_eq!(err.to_string(), "HTTP 404: Not Found");
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_unauthorized_is_detectable() {
    let backend = MockBackend::start().await.unwrap();
    backend.respond(
        Method::GET,
        "/user/profile",
        MockResponse::json(StatusCode::UNAUTHORIZED, &json!({ "message": "Unauthorized" })),
    );

    let client = anonymous_client(&backend);
    let err = client.get::<Value>("/user/profile").await.unwrap_err();

    assert!(err.is_unauthorized());
}

// ============================================================================
// Success decoding
// ============================================================================

#[tokio::test]
async fn test_no_content_decodes_as_empty_record() {
    let backend = MockBackend::start().await.unwrap();
    backend.respond(Method::DELETE, "/product/p1", MockResponse::empty(StatusCode::NO_CONTENT));

    let client = anonymous_client(&backend);
    let result: Empty = client.delete("/product/p1").await.unwrap();

    assert_eq!(result, Empty {});
}

#[tokio::test]
async fn test_non_json_success_decodes_as_empty_record() {
    let backend = MockBackend::start().await.unwrap();
    backend.respond(Method::DELETE, "/cart/clear", MockResponse::text(StatusCode::OK, "OK"));

    let client = anonymous_client(&backend);
    let result: Value = client.delete("/cart/clear").await.unwrap();

    assert_eq!(result, json!({}));
}

#[tokio::test]
async fn test_mismatched_success_body_is_decode_error() {
    let backend = MockBackend::start().await.unwrap();
    backend.respond(Method::GET, "/cart/count", MockResponse::ok(&json!({ "count": "lots" })));

    let arcade = backend.arcade(Arc::new(MemoryTokenStore::new())).unwrap();
    let err = arcade.cart().item_count().await.unwrap_err();

    assert!(matches!(err, ApiError::Decode(_)));
}

#[tokio::test]
async fn test_unreachable_server_is_transport_error() {
    let url = closed_port_url().await.unwrap();
    let client = ApiClient::new(&ClientConfig::new(url), Arc::new(Anonymous)).unwrap();

    let err = client.get::<Value>("/product").await.unwrap_err();

    assert!(matches!(err, ApiError::Transport(_)));
    assert_eq!(err.status(), None);
}
