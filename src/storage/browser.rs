//! `localStorage` / `sessionStorage` backed store (hydrate only).

use super::KeyValueStore;

/// Which browser storage area a [`BrowserStore`] addresses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BrowserArea {
    Local,
    Session,
}

/// Handle to a browser storage area. Resolves the `Storage` object on every
/// call, so it is cheap to copy and never holds a stale reference.
#[derive(Clone, Copy, Debug)]
pub struct BrowserStore {
    area: BrowserArea,
}

impl BrowserStore {
    pub fn local() -> Self {
        Self { area: BrowserArea::Local }
    }

    pub fn session() -> Self {
        Self { area: BrowserArea::Session }
    }

    pub fn area(&self) -> BrowserArea {
        self.area
    }

    fn storage(&self) -> Option<web_sys::Storage> {
        let window = web_sys::window()?;
        let storage = match self.area {
            BrowserArea::Local => window.local_storage(),
            BrowserArea::Session => window.session_storage(),
        };
        storage.ok().flatten()
    }
}

impl KeyValueStore for BrowserStore {
    fn get_item(&self, key: &str) -> Option<String> {
        self.storage()?.get_item(key).ok().flatten()
    }

    fn set_item(&self, key: &str, value: &str) {
        let Some(storage) = self.storage() else {
            tracing::warn!(key, area = ?self.area, "browser storage unavailable; value not saved");
            return;
        };
        if let Err(err) = storage.set_item(key, value) {
            tracing::warn!(key, area = ?self.area, error = ?err, "browser storage write failed");
        }
    }

    fn remove_item(&self, key: &str) {
        if let Some(storage) = self.storage() {
            if let Err(err) = storage.remove_item(key) {
                tracing::warn!(key, area = ?self.area, error = ?err, "browser storage remove failed");
            }
        }
    }
}
