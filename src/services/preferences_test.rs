use serde_json::json;

use super::*;
use crate::config::ApiConfig;
use crate::net::test_support::ScriptedTransport;
use crate::net::tokens::{TokenPair, TokenStore};
use crate::state::preferences::{FontFamily, ThemeMode};
use crate::storage::MemoryStore;

fn api(transport: &ScriptedTransport, local: &MemoryStore) -> Rc<ApiClient<ScriptedTransport, MemoryStore>> {
    let tokens = TokenStore::new(local.clone());
    tokens.set(&TokenPair { access: "tok".to_owned(), refresh: "ref".to_owned() });
    Rc::new(ApiClient::new(transport.clone(), ApiConfig::new("http://api.test/api"), tokens))
}

fn notifications(
    transport: &ScriptedTransport,
    local: &MemoryStore,
) -> PreferenceService<ScriptedTransport, MemoryStore, NotificationPreferences> {
    PreferenceService::new(api(transport, local), local.clone())
}

#[tokio::test]
async fn save_then_load_round_trips_for_user() {
    let transport = ScriptedTransport::new();
    let local = MemoryStore::new();
    let service = notifications(&transport, &local);
    let prefs = NotificationPreferences { post_updates: true, frequency: "daily".to_owned(), ..Default::default() };
    transport.push_json(200, &json!({"success": true}));
    transport.push_failure("offline");

    service.save(Some("7"), &prefs).await.unwrap();
    let loaded = service.load(Some("7")).await;

    assert_eq!(loaded, Loaded { blob: prefs, source: Source::Local });
}

#[tokio::test]
async fn save_pushes_blob_to_endpoint() {
    let transport = ScriptedTransport::new();
    let local = MemoryStore::new();
    let service = notifications(&transport, &local);
    transport.push_json(200, &json!({}));

    service.save(Some("7"), &NotificationPreferences::default()).await.unwrap();

    let sent = transport.last_request().unwrap();
    assert_eq!(sent.method, HttpMethod::Put);
    assert_eq!(sent.url, "http://api.test/api/settings/notifications/");
    let RequestBody::Json(body) = sent.body else {
        panic!("expected json body");
    };
    assert_eq!(body["frequency"], "instant");
    assert_eq!(body["volume"], 50);
}

#[tokio::test]
async fn save_failure_keeps_local_copy() {
    let transport = ScriptedTransport::new();
    let local = MemoryStore::new();
    let service = notifications(&transport, &local);
    let prefs = NotificationPreferences { volume: 10, ..Default::default() };
    transport.push_json(500, &json!({"detail": "boom"}));

    let err = service.save(Some("7"), &prefs).await.unwrap_err();

    assert_eq!(err.to_string(), "boom");
    assert_eq!(service.stored(Some("7")), Some(prefs));
}

#[tokio::test]
async fn guest_save_stays_local() {
    let transport = ScriptedTransport::new();
    let local = MemoryStore::new();
    let service = notifications(&transport, &local);

    service.save(None, &NotificationPreferences::default()).await.unwrap();

    assert!(transport.requests().is_empty());
    assert!(local.contains_key("settings:notifications:guest"));
}

#[tokio::test]
async fn load_prefers_remote_and_refreshes_local_copy() {
    let transport = ScriptedTransport::new();
    let local = MemoryStore::new();
    let service: PreferenceService<_, _, PrivacySettings> = PreferenceService::new(api(&transport, &local), local.clone());
    transport.push_json(200, &json!({"success": true, "preferences": {"account_privacy": "private", "two_factor": 1}}));

    let loaded = service.load(Some("7")).await;

    assert_eq!(loaded.source, Source::Remote);
    assert_eq!(loaded.blob.account_privacy, "private");
    assert!(loaded.blob.two_factor);
    assert!(loaded.blob.show_activity);
    assert_eq!(service.stored(Some("7")), Some(loaded.blob));
    assert_eq!(transport.last_request().unwrap().method, HttpMethod::Get);
}

#[tokio::test]
async fn load_falls_back_to_defaults() {
    let transport = ScriptedTransport::new();
    let local = MemoryStore::new();
    let service = notifications(&transport, &local);
    transport.push_json(404, &json!({"detail": "Not found."}));

    let loaded = service.load(Some("7")).await;

    assert_eq!(loaded, Loaded { blob: NotificationPreferences::default(), source: Source::Default });
}

#[tokio::test]
async fn theme_is_local_only() {
    let transport = ScriptedTransport::new();
    let local = MemoryStore::new();
    let service: PreferenceService<_, _, ThemePreferences> = PreferenceService::new(api(&transport, &local), local.clone());
    let theme = ThemePreferences {
        theme_mode: ThemeMode::Dark,
        font_size: 18,
        font_family: FontFamily::Serif,
        ..Default::default()
    };

    service.save(Some("7"), &theme).await.unwrap();
    let loaded = service.load(Some("7")).await;

    assert!(transport.requests().is_empty());
    assert_eq!(loaded, Loaded { blob: theme, source: Source::Local });
    assert!(local.contains_key("settings:theme:7"));
}

#[test]
fn reset_removes_local_copy_and_returns_defaults() {
    let transport = ScriptedTransport::new();
    let local = MemoryStore::new();
    let service: PreferenceService<_, _, ThemePreferences> = PreferenceService::new(api(&transport, &local), local.clone());
    save_json(&local, "settings:theme:7", &ThemePreferences { high_contrast: true, ..Default::default() });

    let blob = service.reset(Some("7"));

    assert_eq!(blob, ThemePreferences::default());
    assert_eq!(service.stored(Some("7")), None);
}

#[test]
fn payload_may_be_bare_or_wrapped() {
    let bare = json!({"volume": 3});
    assert_eq!(blob_payload(&bare), &bare);
    let wrapped = json!({"success": true, "settings": {"volume": 3}});
    assert_eq!(blob_payload(&wrapped), &json!({"volume": 3}));
}
