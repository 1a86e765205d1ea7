//! Key/value persistence for tokens, the session user, and preference blobs.
//!
//! SYSTEM CONTEXT
//! ==============
//! Services never touch browser storage directly. They hold a
//! [`KeyValueStore`]: [`BrowserStore`] (local or session storage) in the WASM
//! build, [`MemoryStore`] natively and in tests. Reads and writes are
//! best-effort, matching browser storage semantics: a failed write is logged
//! and dropped, an unreadable value reads as absent.


#[cfg(feature = "hydrate")]
mod browser;
pub mod keys;

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use serde::Serialize;
use serde::de::DeserializeOwned;

#[cfg(feature = "hydrate")]
pub use browser::{BrowserArea, BrowserStore};

/// Synchronous string key/value store with browser-storage semantics.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str);
    fn remove_item(&self, key: &str);
}

/// In-process store. Clones share the same underlying map, so a clone models
/// the same browser storage area seen from another component.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    items: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.items.borrow().contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) {
        self.items.borrow_mut().insert(key.to_owned(), value.to_owned());
    }

    fn remove_item(&self, key: &str) {
        self.items.borrow_mut().remove(key);
    }
}

/// Load a JSON value stored under `key`.
///
/// A missing key and an unparseable value both yield `None`; the latter is
/// logged since it usually means a schema change between releases.
pub fn load_json<S, T>(store: &S, key: &str) -> Option<T>
where
    S: KeyValueStore + ?Sized,
    T: DeserializeOwned,
{
    let raw = store.get_item(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::warn!(key, error = %err, "discarding unreadable stored value");
            None
        }
    }
}

/// Save a JSON value under `key`.
pub fn save_json<S, T>(store: &S, key: &str, value: &T)
where
    S: KeyValueStore + ?Sized,
    T: Serialize + ?Sized,
{
    match serde_json::to_string(value) {
        Ok(raw) => store.set_item(key, &raw),
        Err(err) => tracing::warn!(key, error = %err, "failed to serialize value for storage"),
    }
}
