//! Persisted access/refresh token pair.

#[cfg(test)]
#[path = "tokens_test.rs"]
mod tokens_test;

use serde::{Deserialize, Serialize};

use crate::storage::keys::AUTH_TOKENS_KEY;
use crate::storage::{KeyValueStore, load_json, save_json};

/// Bearer credentials issued at login/registration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access: String,
    #[serde(default)]
    pub refresh: String,
}

/// Reads and writes the [`TokenPair`] under a single storage key.
#[derive(Clone, Debug)]
pub struct TokenStore<S> {
    store: S,
}

impl<S: KeyValueStore> TokenStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn get(&self) -> Option<TokenPair> {
        load_json(&self.store, AUTH_TOKENS_KEY)
    }

    pub fn set(&self, pair: &TokenPair) {
        save_json(&self.store, AUTH_TOKENS_KEY, pair);
    }

    pub fn clear(&self) {
        self.store.remove_item(AUTH_TOKENS_KEY);
    }

    /// The stored access token, if present and non-empty.
    pub fn access_token(&self) -> Option<String> {
        self.get().map(|pair| pair.access).filter(|access| !access.is_empty())
    }

    /// The stored refresh token, if present and non-empty.
    pub fn refresh_token(&self) -> Option<String> {
        self.get().map(|pair| pair.refresh).filter(|refresh| !refresh.is_empty())
    }
}
