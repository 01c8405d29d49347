//! Session lifecycle through the auth store.

mod common;

use common::{auth_store, mock_login_ok, mock_me_ok, mock_me_unauthorized, storage_with_token, url, TOKEN};
use prophet::adapters::mock::{InMemoryStorage, MockHttpClient, MockResponse};
use prophet::error::AuthError;
use prophet::models::{LoginRequest, RegisterRequest};
use prophet::state::AuthPhase;
use prophet::traits::HttpError;
use serde_json::json;

fn login_request() -> LoginRequest {
    LoginRequest {
        username: "admin".to_string(),
        password: "admin123".to_string(),
        captcha_id: "cap-1".to_string(),
        captcha_code: "X7KQ".to_string(),
    }
}

#[tokio::test]
async fn test_login_then_logout_round_trip() {
    let mock = MockHttpClient::new();
    mock_login_ok(&mock);
    mock.set_method_response(
        "POST",
        &url("/auth/logout"),
        MockResponse::json(200, json!({"code": 200, "message": "bye"})),
    );
    let storage = InMemoryStorage::new();
    let store = auth_store(&mock, &storage);

    store.login(&login_request()).await.unwrap();
    assert_eq!(store.phase(), AuthPhase::Authenticated);
    assert_eq!(storage.peek("access_token").as_deref(), Some(TOKEN));

    store.logout().await;
    assert_eq!(store.phase(), AuthPhase::Anonymous);
    assert!(storage.peek("access_token").is_none());
    assert_eq!(store.history().current().as_deref(), Some("/login"));

    let logout = &mock.get_requests()[1];
    assert_eq!(
        logout.headers.get("Authorization").map(String::as_str),
        Some("Bearer test-access-token")
    );
}

#[tokio::test]
async fn test_rejected_login_keeps_anonymous() {
    let mock = MockHttpClient::new();
    mock.set_method_response(
        "POST",
        &url("/auth/login"),
        MockResponse::json(200, json!({"code": 400, "message": "验证码错误"})),
    );
    let storage = InMemoryStorage::new();
    let store = auth_store(&mock, &storage);

    let err = store.login(&login_request()).await.unwrap_err();

    assert_eq!(err.message(), "验证码错误");
    assert_eq!(store.phase(), AuthPhase::Anonymous);
    assert!(storage.peek("access_token").is_none());
    assert!(store.history().is_empty());
}

#[tokio::test]
async fn test_login_with_401_status_keeps_anonymous() {
    let mock = MockHttpClient::new();
    mock.set_method_response(
        "POST",
        &url("/auth/login"),
        MockResponse::json(401, json!({"code": 401, "message": "bad credentials"})),
    );
    let storage = InMemoryStorage::new();
    let store = auth_store(&mock, &storage);

    let err = store.login(&login_request()).await.unwrap_err();

    assert!(matches!(err, AuthError::Api { operation: "login", .. }));
    assert_eq!(err.message(), "bad credentials");
    assert_eq!(store.phase(), AuthPhase::Anonymous);
    assert!(storage.peek("access_token").is_none());
    assert!(store.history().is_empty());
}

#[tokio::test]
async fn test_login_transport_failure_keeps_anonymous() {
    let mock = MockHttpClient::new();
    mock.set_method_response(
        "POST",
        &url("/auth/login"),
        MockResponse::Error(HttpError::ConnectionFailed("refused".to_string())),
    );
    let storage = InMemoryStorage::new();
    let store = auth_store(&mock, &storage);

    let err = store.login(&login_request()).await.unwrap_err();

    assert!(matches!(err, AuthError::Api { operation: "login", .. }));
    assert_eq!(
        err.message(),
        format!("Connection failed to '{}': refused", url("/auth/login"))
    );
    assert_eq!(store.phase(), AuthPhase::Anonymous);
    assert!(storage.peek("access_token").is_none());
    assert_eq!(mock.get_requests().len(), 1);
}

#[tokio::test]
async fn test_logout_clears_even_when_backend_fails() {
    let mock = MockHttpClient::new();
    mock_me_ok(&mock);
    mock.set_method_response(
        "POST",
        &url("/auth/logout"),
        MockResponse::json(500, json!({"message": "boom"})),
    );
    let storage = storage_with_token();
    let store = auth_store(&mock, &storage);
    store.initialize().await;
    assert_eq!(store.phase(), AuthPhase::Authenticated);

    store.logout().await;

    assert_eq!(store.phase(), AuthPhase::Anonymous);
    assert!(storage.peek("access_token").is_none());
}

#[tokio::test]
async fn test_stale_token_is_dropped_on_fetch() {
    let mock = MockHttpClient::new();
    mock_me_unauthorized(&mock);
    let storage = storage_with_token();
    let store = auth_store(&mock, &storage);
    assert_eq!(store.phase(), AuthPhase::TokenOnly);

    let err = store.fetch_current_user().await.unwrap_err();

    assert!(err.requires_reauth());
    assert_eq!(store.phase(), AuthPhase::Anonymous);
    assert!(storage.peek("access_token").is_none());
    assert!(!store.is_loading());
}

#[tokio::test]
async fn test_register_leaves_session_alone() {
    let mock = MockHttpClient::new();
    mock.set_method_response(
        "POST",
        &url("/auth/register"),
        MockResponse::ok(json!({"id": 2, "username": "ops", "email": "ops@example.com"})),
    );
    let storage = InMemoryStorage::new();
    let store = auth_store(&mock, &storage);

    let user = store
        .register(&RegisterRequest {
            username: "ops".to_string(),
            email: "ops@example.com".to_string(),
            password: "pw123456".to_string(),
            captcha_id: "cap-2".to_string(),
            captcha_code: "ABCD".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(user.id, 2);
    assert_eq!(store.phase(), AuthPhase::Anonymous);
    assert!(storage.peek("access_token").is_none());
}

#[tokio::test]
async fn test_network_failure_on_fetch_is_api_error() {
    let mock = MockHttpClient::new();
    mock.set_method_response(
        "GET",
        &url("/auth/me"),
        MockResponse::Error(HttpError::ConnectionFailed("refused".to_string())),
    );
    let store = auth_store(&mock, &storage_with_token());

    let err = store.fetch_current_user().await.unwrap_err();

    assert!(matches!(err, AuthError::Api { .. }));
    assert_eq!(store.phase(), AuthPhase::Anonymous);
}
