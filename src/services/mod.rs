//! Account services used by the settings pages.
//!
//! ARCHITECTURE
//! ============
//! Service modules own backend calls and client-side persistence so page
//! components stay focused on form state and rendering. `AccountClient`
//! bundles one of each service around a shared `ApiClient`; the browser
//! shell keeps a single instance for the lifetime of the page.

pub mod auth;
pub mod error;
pub mod preferences;

use std::rc::Rc;

use crate::net::http::{ApiClient, HttpTransport};
use crate::state::preferences::{NotificationPreferences, PrivacySettings, ThemePreferences};
use crate::storage::KeyValueStore;
use auth::AuthService;
use preferences::PreferenceService;

pub struct AccountClient<T, S> {
    pub auth: AuthService<T, S>,
    pub notifications: PreferenceService<T, S, NotificationPreferences>,
    pub privacy: PreferenceService<T, S, PrivacySettings>,
    pub theme: PreferenceService<T, S, ThemePreferences>,
}

impl<T, S> AccountClient<T, S>
where
    T: HttpTransport,
    S: KeyValueStore + Clone,
{
    /// `local` backs tokens and preference blobs, `session` the cached user.
    pub fn new(api: ApiClient<T, S>, local: S, session: S) -> Self {
        let api = Rc::new(api);
        Self {
            notifications: PreferenceService::new(Rc::clone(&api), local.clone()),
            privacy: PreferenceService::new(Rc::clone(&api), local.clone()),
            theme: PreferenceService::new(Rc::clone(&api), local.clone()),
            auth: AuthService::new(api, local, session),
        }
    }

    /// Signed-in user id, if any; preference blobs are namespaced by it.
    pub fn user_id(&self) -> Option<String> {
        self.auth.get_current_user().map(|user| user.id)
    }
}
