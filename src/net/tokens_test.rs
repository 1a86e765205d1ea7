use super::*;
use crate::storage::MemoryStore;

fn pair(access: &str, refresh: &str) -> TokenPair {
    TokenPair { access: access.to_owned(), refresh: refresh.to_owned() }
}

#[test]
fn get_is_none_when_nothing_stored() {
    let tokens = TokenStore::new(MemoryStore::new());
    assert_eq!(tokens.get(), None);
    assert_eq!(tokens.access_token(), None);
}

#[test]
fn set_then_get_returns_pair() {
    let tokens = TokenStore::new(MemoryStore::new());
    tokens.set(&pair("a1", "r1"));
    assert_eq!(tokens.get(), Some(pair("a1", "r1")));
    assert_eq!(tokens.access_token().as_deref(), Some("a1"));
    assert_eq!(tokens.refresh_token().as_deref(), Some("r1"));
}

#[test]
fn set_overwrites_previous_pair() {
    let tokens = TokenStore::new(MemoryStore::new());
    tokens.set(&pair("a1", "r1"));
    tokens.set(&pair("a2", "r2"));
    assert_eq!(tokens.get(), Some(pair("a2", "r2")));
}

#[test]
fn clear_removes_pair() {
    let store = MemoryStore::new();
    let tokens = TokenStore::new(store.clone());
    tokens.set(&pair("a1", "r1"));
    tokens.clear();
    assert_eq!(tokens.get(), None);
    assert!(!store.contains_key(AUTH_TOKENS_KEY));
}

#[test]
fn empty_access_is_not_an_access_token() {
    let tokens = TokenStore::new(MemoryStore::new());
    tokens.set(&pair("", "r1"));
    assert!(tokens.get().is_some());
    assert_eq!(tokens.access_token(), None);
}

#[test]
fn pair_without_refresh_deserializes() {
    let store = MemoryStore::new();
    store.set_item(AUTH_TOKENS_KEY, r#"{"access":"only"}"#);
    let tokens = TokenStore::new(store);
    assert_eq!(tokens.get(), Some(pair("only", "")));
    assert_eq!(tokens.refresh_token(), None);
}

#[test]
fn corrupt_value_reads_as_absent() {
    let store = MemoryStore::new();
    store.set_item(AUTH_TOKENS_KEY, "garbage");
    let tokens = TokenStore::new(store);
    assert_eq!(tokens.get(), None);
}
