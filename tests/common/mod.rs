//! Shared fixtures for the integration tests.
//!
//! Everything runs against [`MockHttpClient`] and [`InMemoryStorage`], so
//! no test needs a live backend or touches the user's data directory.

#![allow(dead_code)]

use std::sync::Arc;

use prophet::adapters::mock::{InMemoryStorage, MockHttpClient, MockResponse};
use prophet::api::ApiClient;
use prophet::state::{AuthStore, History, SessionToken};
use serde_json::{json, Value};

pub const BASE: &str = "http://cmdb.test/api";
pub const TOKEN: &str = "test-access-token";

/// Absolute URL of an API path on the test backend.
pub fn url(path: &str) -> String {
    format!("{}{}", BASE, path)
}

pub fn api(mock: &MockHttpClient, token: Option<&str>) -> ApiClient {
    ApiClient::new(
        BASE,
        Arc::new(mock.clone()),
        SessionToken::new(token.map(str::to_string)),
    )
}

pub fn auth_store(mock: &MockHttpClient, storage: &InMemoryStorage) -> AuthStore {
    let api = ApiClient::new(BASE, Arc::new(mock.clone()), SessionToken::default());
    AuthStore::new(api, Arc::new(storage.clone()), History::new())
}

/// Storage that already holds a session token.
pub fn storage_with_token() -> InMemoryStorage {
    InMemoryStorage::with_entries([("access_token", TOKEN)])
}

pub fn user_json() -> Value {
    json!({
        "id": 1,
        "username": "admin",
        "email": "admin@example.com",
        "role": "admin",
        "is_active": true,
        "created_at": "2024-01-01T00:00:00"
    })
}

pub fn mock_me_ok(mock: &MockHttpClient) {
    mock.set_method_response("GET", &url("/auth/me"), MockResponse::ok(user_json()));
}

pub fn mock_me_unauthorized(mock: &MockHttpClient) {
    mock.set_method_response(
        "GET",
        &url("/auth/me"),
        MockResponse::json(401, json!({"code": 401, "message": "Token expired"})),
    );
}

pub fn mock_login_ok(mock: &MockHttpClient) {
    mock.set_method_response(
        "POST",
        &url("/auth/login"),
        MockResponse::ok(json!({"access_token": TOKEN, "user": user_json()})),
    );
}

pub fn host_json(id: i64, ip: &str) -> Value {
    json!({
        "id": id,
        "ip": ip,
        "hostname": format!("host-{}", id),
        "os_type": "Linux",
        "source": "manual",
        "collection_status": "completed",
        "tags": []
    })
}

/// A two-node graph with one edge; node `n1` is bound to host 7.
pub fn graph_json() -> Value {
    json!({
        "nodes": [
            {"id": "n1", "type": "host", "x": 100.0, "y": 80.0, "label": "web-01", "bindingHostId": 7},
            {"id": "n2", "type": "database", "x": 300.0, "y": 80.0, "label": "pg"}
        ],
        "edges": [
            {"source": "n1", "target": "n2", "relationshipType": "depends_on"}
        ],
        "resourceNodes": [],
        "metadata": {"version": "1.0"}
    })
}
