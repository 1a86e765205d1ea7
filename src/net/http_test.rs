use std::cell::Cell;

use serde_json::json;

use super::*;
use crate::net::test_support::ScriptedTransport;
use crate::net::tokens::TokenPair;
use crate::storage::MemoryStore;

fn client(transport: &ScriptedTransport, store: &MemoryStore) -> ApiClient<ScriptedTransport, MemoryStore> {
    ApiClient::new(
        transport.clone(),
        ApiConfig::new("http://api.test/api"),
        TokenStore::new(store.clone()),
    )
}

fn store_tokens(store: &MemoryStore, access: &str) {
    TokenStore::new(store.clone()).set(&TokenPair { access: access.to_owned(), refresh: "r".to_owned() });
}

// =============================================================
// normalize_response
// =============================================================

#[test]
fn normalize_2xx_json_is_success() {
    let resp = normalize_response(RawResponse { status: 200, body: r#"{"ok":true}"#.to_owned() });
    assert!(resp.success);
    assert_eq!(resp.status, Some(200));
    assert_eq!(resp.data, json!({"ok": true}));
    assert_eq!(resp.error, None);
}

#[test]
fn normalize_empty_body_is_null_data() {
    let resp = normalize_response(RawResponse { status: 204, body: String::new() });
    assert!(resp.success);
    assert_eq!(resp.data, Value::Null);
}

#[test]
fn normalize_4xx_keeps_error_body_as_data() {
    let resp = normalize_response(RawResponse { status: 400, body: r#"{"error":"bad"}"#.to_owned() });
    assert!(!resp.success);
    assert_eq!(resp.status, Some(400));
    assert_eq!(resp.data, json!({"error": "bad"}));
}

#[test]
fn normalize_invalid_json_is_failure_with_message() {
    let resp = normalize_response(RawResponse { status: 200, body: "<html>".to_owned() });
    assert!(!resp.success);
    assert_eq!(resp.status, Some(200));
    assert!(resp.error.unwrap().starts_with("invalid JSON response"));
}

// =============================================================
// ApiClient::request
// =============================================================

#[tokio::test]
async fn request_resolves_url_and_sets_json_content_type() {
    let transport = ScriptedTransport::new();
    transport.push_json(200, &json!({"success": true}));
    let store = MemoryStore::new();
    let api = client(&transport, &store);

    let resp = api
        .request("/auth/login/", HttpMethod::Post, RequestBody::Json(json!({"email": "a@b.c"})))
        .await;

    assert!(resp.success);
    let sent = transport.last_request().unwrap();
    assert_eq!(sent.method, HttpMethod::Post);
    assert_eq!(sent.url, "http://api.test/api/auth/login/");
    assert_eq!(sent.header("content-type"), Some("application/json"));
    assert_eq!(sent.header("authorization"), None);
}

#[tokio::test]
async fn request_attaches_bearer_when_token_stored() {
    let transport = ScriptedTransport::new();
    transport.push_json(200, &json!({}));
    let store = MemoryStore::new();
    store_tokens(&store, "tok-1");
    let api = client(&transport, &store);

    api.request("/settings/profile/", HttpMethod::Get, RequestBody::Empty).await;

    let sent = transport.last_request().unwrap();
    assert_eq!(sent.header("Authorization"), Some("Bearer tok-1"));
    assert_eq!(sent.header("Content-Type"), None);
}

#[tokio::test]
async fn request_never_fails_on_transport_error() {
    let transport = ScriptedTransport::new();
    transport.push_failure("connection refused");
    let store = MemoryStore::new();
    let api = client(&transport, &store);

    let resp = api.request("/auth/login/", HttpMethod::Post, RequestBody::Empty).await;

    assert!(!resp.success);
    assert_eq!(resp.status, None);
    assert_eq!(resp.error.as_deref(), Some("request failed: connection refused"));
}

#[tokio::test]
async fn unauthorized_clears_tokens_and_fires_hook() {
    let transport = ScriptedTransport::new();
    transport.push_json(401, &json!({"detail": "token expired"}));
    let store = MemoryStore::new();
    store_tokens(&store, "stale");
    let fired = Rc::new(Cell::new(0));
    let fired_hook = fired.clone();
    let api = client(&transport, &store).with_unauthorized_hook(move || fired_hook.set(fired_hook.get() + 1));

    let resp = api.request("/settings/profile/", HttpMethod::Get, RequestBody::Empty).await;

    assert!(resp.is_unauthorized());
    assert_eq!(fired.get(), 1);
    assert_eq!(api.tokens().get(), None);
}

#[tokio::test]
async fn non_401_failure_keeps_tokens() {
    let transport = ScriptedTransport::new();
    transport.push_json(400, &json!({"error": "bad"}));
    let store = MemoryStore::new();
    store_tokens(&store, "keep");
    let fired = Rc::new(Cell::new(false));
    let fired_hook = fired.clone();
    let api = client(&transport, &store).with_unauthorized_hook(move || fired_hook.set(true));

    api.request("/settings/profile/", HttpMethod::Put, RequestBody::Json(json!({}))).await;

    assert!(!fired.get());
    assert_eq!(api.tokens().access_token().as_deref(), Some("keep"));
}
