//! Load and save preference blobs.
//!
//! SYSTEM CONTEXT
//! ==============
//! Each settings panel edits one blob. The local copy under
//! `settings:{kind}:{owner}` is written on every change so a reload keeps the
//! user's edits; notifications and privacy are also pushed to the backend.
//! Theme has no backend endpoint and lives only in local storage.
//!
//! TRADE-OFFS
//! ==========
//! `load` prefers the backend copy when one is reachable. A stale local copy
//! written while offline is therefore overwritten on the next successful
//! load; last write wins.

#[cfg(test)]
#[path = "preferences_test.rs"]
mod preferences_test;

use std::marker::PhantomData;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::{ServiceError, interpret};
use crate::config::Endpoints;
use crate::net::http::{ApiClient, HttpMethod, HttpTransport, RequestBody};
use crate::state::preferences::{NotificationPreferences, PrivacySettings, ThemePreferences};
use crate::storage::keys::{PreferenceKind, preference_key};
use crate::storage::{KeyValueStore, load_json, save_json};

/// A persisted preference blob.
pub trait PreferenceBlob: Serialize + DeserializeOwned + Default + Clone {
    const KIND: PreferenceKind;

    /// Backend endpoint for this blob, `None` when it is local-only.
    fn endpoint(endpoints: &Endpoints) -> Option<&str>;
}

impl PreferenceBlob for NotificationPreferences {
    const KIND: PreferenceKind = PreferenceKind::Notifications;

    fn endpoint(endpoints: &Endpoints) -> Option<&str> {
        Some(&endpoints.notifications)
    }
}

impl PreferenceBlob for PrivacySettings {
    const KIND: PreferenceKind = PreferenceKind::Privacy;

    fn endpoint(endpoints: &Endpoints) -> Option<&str> {
        Some(&endpoints.privacy)
    }
}

impl PreferenceBlob for ThemePreferences {
    const KIND: PreferenceKind = PreferenceKind::Theme;

    fn endpoint(_: &Endpoints) -> Option<&str> {
        None
    }
}

/// Where a loaded blob came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Source {
    Remote,
    Local,
    Default,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Loaded<B> {
    pub blob: B,
    pub source: Source,
}

pub struct PreferenceService<T, S, B> {
    api: Rc<ApiClient<T, S>>,
    local: S,
    _blob: PhantomData<B>,
}

impl<T, S, B> PreferenceService<T, S, B>
where
    T: HttpTransport,
    S: KeyValueStore,
    B: PreferenceBlob,
{
    pub fn new(api: Rc<ApiClient<T, S>>, local: S) -> Self {
        Self { api, local, _blob: PhantomData }
    }

    /// Backend copy, else the local copy, else defaults. A remote hit refreshes
    /// the local copy.
    pub async fn load(&self, user_id: Option<&str>) -> Loaded<B> {
        let key = preference_key(B::KIND, user_id);
        if let Some(blob) = self.fetch_remote(user_id).await {
            save_json(&self.local, &key, &blob);
            return Loaded { blob, source: Source::Remote };
        }
        match load_json::<_, B>(&self.local, &key) {
            Some(blob) => Loaded { blob, source: Source::Local },
            None => Loaded { blob: B::default(), source: Source::Default },
        }
    }

    /// Local copy only; never touches the network.
    pub fn stored(&self, user_id: Option<&str>) -> Option<B> {
        load_json(&self.local, &preference_key(B::KIND, user_id))
    }

    /// Write the local copy, then push to the backend when the blob has an
    /// endpoint and a user is signed in. The local copy survives a push failure.
    pub async fn save(&self, user_id: Option<&str>, blob: &B) -> Result<(), ServiceError> {
        save_json(&self.local, &preference_key(B::KIND, user_id), blob);

        let Some(endpoint) = self.remote_endpoint(user_id) else {
            return Ok(());
        };
        let body = serde_json::to_value(blob)
            .map_err(|e| ServiceError::Network(format!("could not encode preferences: {e}")))?;
        let response = self.api.request(&endpoint, HttpMethod::Put, RequestBody::Json(body)).await;
        interpret(&response, "Could not save settings")
            .inspect_err(|err| {
                tracing::warn!(kind = B::KIND.as_str(), error = %err, "preference push failed; kept local copy");
            })
            .map(|_| ())
    }

    /// Drop the local copy and return defaults.
    pub fn reset(&self, user_id: Option<&str>) -> B {
        self.local.remove_item(&preference_key(B::KIND, user_id));
        tracing::debug!(kind = B::KIND.as_str(), "preferences reset");
        B::default()
    }

    fn remote_endpoint(&self, user_id: Option<&str>) -> Option<String> {
        user_id?;
        B::endpoint(&self.api.config().endpoints).map(str::to_owned)
    }

    async fn fetch_remote(&self, user_id: Option<&str>) -> Option<B> {
        let endpoint = self.remote_endpoint(user_id)?;
        let response = self.api.request(&endpoint, HttpMethod::Get, RequestBody::Empty).await;
        if let Err(err) = interpret(&response, "Could not load settings") {
            tracing::debug!(kind = B::KIND.as_str(), error = %err, "remote preferences unavailable");
            return None;
        }
        let payload = blob_payload(&response.data);
        match B::deserialize(payload) {
            Ok(blob) => Some(blob),
            Err(err) => {
                tracing::warn!(kind = B::KIND.as_str(), error = %err, "unreadable remote preferences");
                None
            }
        }
    }
}

/// Backends answer either with the bare blob or wrapped in `preferences`/`settings`.
fn blob_payload(data: &Value) -> &Value {
    ["preferences", "settings"]
        .into_iter()
        .find_map(|field| data.get(field).filter(|v| v.is_object()))
        .unwrap_or(data)
}
