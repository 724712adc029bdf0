//! User service against the mock backend.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use axum::http::{Method, StatusCode};
use relic_arcade_client::models::{UpdatePasswordRequest, UpdateUserRequest};
use relic_arcade_client::{MemoryTokenStore, RelicArcade, UploadFile};
use relic_arcade_core::{AccessToken, UserId};
use relic_arcade_integration_tests::{MockBackend, MockResponse, fixtures};
use serde_json::json;

async fn setup() -> (MockBackend, RelicArcade) {
    let backend = MockBackend::start().await.unwrap();
    let store = Arc::new(MemoryTokenStore::with_token(AccessToken::new("player-token")));
    let arcade = backend.arcade(store).unwrap();
    (backend, arcade)
}

#[tokio::test]
async fn test_get_profile() {
    let (backend, arcade) = setup().await;
    backend.respond(
        Method::GET,
        "/user/profile",
        MockResponse::ok(&fixtures::user("u1", "player1@example.com")),
    );

    let user = arcade.users().get_profile().await.unwrap();

    assert_eq!(user.id, UserId::new("u1"));
    assert!(user.phone.is_none());
}

#[tokio::test]
async fn test_update_profile_patches_only_set_fields() {
    let (backend, arcade) = setup().await;
    backend.respond(
        Method::PATCH,
        "/user/profile",
        MockResponse::ok(&fixtures::user("u1", "new@example.com")),
    );

    let changes = UpdateUserRequest {
        email: Some("new@example.com".to_string()),
        ..UpdateUserRequest::default()
    };
    let user = arcade.users().update_profile(&changes).await.unwrap();

    assert_eq!(user.email, "new@example.com");
    assert_eq!(
        backend.last_request().json(),
        json!({ "email": "new@example.com" })
    );
}

#[tokio::test]
async fn test_change_password() {
    let (backend, arcade) = setup().await;
    backend.respond(
        Method::PATCH,
        "/user/password",
        MockResponse::empty(StatusCode::NO_CONTENT),
    );

    arcade
        .users()
        .change_password(&UpdatePasswordRequest {
            current_password: "Hunter2!".into(),
            new_password: "Hunter3!".into(),
        })
        .await
        .unwrap();

    assert_eq!(
        backend.last_request().json(),
        json!({ "currentPassword": "Hunter2!", "newPassword": "Hunter3!" })
    );
}

#[tokio::test]
async fn test_change_password_with_boolean_body() {
    let (backend, arcade) = setup().await;
    backend.respond(Method::PATCH, "/user/password", MockResponse::ok(&json!(true)));

    arcade
        .users()
        .change_password(&UpdatePasswordRequest {
            current_password: "Hunter2!".into(),
            new_password: "Hunter3!".into(),
        })
        .await
        .unwrap();

    assert_eq!(backend.last_request().path, "/user/password");
}

#[tokio::test]
async fn test_change_password_wrong_current() {
    let (backend, arcade) = setup().await;
    backend.respond(
        Method::PATCH,
        "/user/password",
        MockResponse::json(
            StatusCode::BAD_REQUEST,
            &json!({ "message": "Current password is incorrect" }),
        ),
    );

    let err = arcade
        .users()
        .change_password(&UpdatePasswordRequest {
            current_password: "wrong".into(),
            new_password: "Hunter3!".into(),
        })
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Current password is incorrect");
}

#[tokio::test]
async fn test_upload_avatar() {
    let (backend, arcade) = setup().await;
    backend.respond(
        Method::POST,
        "/user/avatar",
        MockResponse::ok(&json!({ "avatarUrl": "/uploads/avatars/u1.png" })),
    );

    let response = arcade
        .users()
        .upload_avatar(UploadFile::new("me.png", "image/png", b"png-bytes".to_vec()))
        .await
        .unwrap();

    assert_eq!(response.avatar_url, "/uploads/avatars/u1.png");

    let request = backend.last_request();
    assert_eq!(request.header("authorization"), Some("Bearer player-token"));
    let body = request.body_text();
    assert!(body.contains("name=\"avatar\""));
    assert!(body.contains("filename=\"me.png\""));
    assert!(body.contains("Content-Type: image/png") || body.contains("content-type: image/png"));
}

#[tokio::test]
async fn test_generic_resource_delete() {
    let (backend, arcade) = setup().await;
    backend.respond(Method::DELETE, "/user/u1", MockResponse::ok(&json!({ "deleted": true })));

    arcade.users().resource().delete(&UserId::new("u1")).await.unwrap();

    assert_eq!(backend.last_request().path, "/user/u1");
}
