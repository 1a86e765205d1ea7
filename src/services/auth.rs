//! Authentication and account management.
//!
//! ARCHITECTURE
//! ============
//! The service owns the client-side session: the token pair (via the API
//! client's token store), the current user cached in memory, and its mirror
//! in session storage so a page reload keeps the user without a round trip.
//!
//! ERROR HANDLING
//! ==============
//! No operation propagates a raw transport or parse error. Every outcome is a
//! `Result<_, ServiceError>` whose `Display` is ready for the view layer.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::cell::RefCell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::error::{ServiceError, interpret};
use crate::net::http::{ApiClient, ApiResponse, FilePart, HttpMethod, HttpTransport, RequestBody};
use crate::net::types::{BackendUser, Envelope, ProfileUpdate, User, transform_user};
use crate::state::preferences::{NotificationPreferences, PrivacySettings};
use crate::storage::keys::{PreferenceKind, SESSION_USER_KEY, preference_key};
use crate::storage::{KeyValueStore, load_json, save_json};

/// Multipart field the avatar endpoint reads the file from.
pub const AVATAR_FIELD: &str = "upload";

pub struct AuthService<T, S> {
    api: Rc<ApiClient<T, S>>,
    local: S,
    session: S,
    current_user: RefCell<Option<User>>,
}

impl<T, S> AuthService<T, S>
where
    T: HttpTransport,
    S: KeyValueStore,
{
    /// `local` holds per-user preference blobs, `session` the cached user.
    pub fn new(api: Rc<ApiClient<T, S>>, local: S, session: S) -> Self {
        Self { api, local, session, current_user: RefCell::new(None) }
    }

    pub fn api(&self) -> &Rc<ApiClient<T, S>> {
        &self.api
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<User, ServiceError> {
        let endpoint = self.api.config().endpoints.login.clone();
        let body = json!({ "email": email, "password": password });
        let response = self.api.request(&endpoint, HttpMethod::Post, RequestBody::Json(body)).await;
        let envelope = interpret(&response, "Login failed").inspect_err(|err| {
            tracing::warn!(error = %err, "login failed");
        })?;
        self.establish_session(envelope, &response)
    }

    pub async fn register(&self, full_name: &str, email: &str, password: &str) -> Result<User, ServiceError> {
        let endpoint = self.api.config().endpoints.register.clone();
        let body = json!({ "full_name": full_name, "email": email, "password": password });
        let response = self.api.request(&endpoint, HttpMethod::Post, RequestBody::Json(body)).await;
        let envelope = interpret(&response, "Registration failed").inspect_err(|err| {
            tracing::warn!(error = %err, "registration failed");
        })?;
        self.establish_session(envelope, &response)
    }

    /// Best-effort backend logout, then unconditional local cleanup.
    pub async fn logout(&self) {
        if let Some(refresh) = self.api.tokens().refresh_token() {
            let endpoint = self.api.config().endpoints.logout.clone();
            let body = json!({ "refresh": refresh });
            let response = self.api.request(&endpoint, HttpMethod::Post, RequestBody::Json(body)).await;
            if !response.success {
                tracing::warn!(status = ?response.status, "backend logout failed; clearing local session anyway");
            }
        }
        self.clear_session();
        tracing::info!("logged out");
    }

    /// Cached user, hydrated from session storage after a reload. Never calls the backend.
    pub fn get_current_user(&self) -> Option<User> {
        let cached = self.current_user.borrow().clone();
        if cached.is_some() {
            return cached;
        }
        let user: User = load_json(&self.session, SESSION_USER_KEY)?;
        *self.current_user.borrow_mut() = Some(user.clone());
        Some(user)
    }

    pub fn is_authenticated(&self) -> bool {
        self.api.tokens().access_token().is_some()
    }

    /// Reload the profile from the backend and refresh the cache.
    pub async fn fetch_profile(&self) -> Result<User, ServiceError> {
        let endpoint = self.api.config().endpoints.profile.clone();
        let response = self.api.request(&endpoint, HttpMethod::Get, RequestBody::Empty).await;
        let envelope = interpret(&response, "Could not load profile")?;
        let user = user_from(&envelope, &response)
            .ok_or_else(|| ServiceError::InvalidResponse("profile response has no user".to_owned()))?;
        self.cache_user(Some(user.clone()));
        Ok(user)
    }

    pub async fn update_profile(&self, updates: &ProfileUpdate) -> Result<User, ServiceError> {
        let endpoint = self.api.config().endpoints.profile.clone();
        let body = to_json(updates)?;
        let response = self.api.request(&endpoint, HttpMethod::Put, RequestBody::Json(body)).await;
        let envelope = interpret(&response, "Update profile failed")?;
        let user = user_from(&envelope, &response)
            .ok_or_else(|| ServiceError::InvalidResponse("profile response has no user".to_owned()))?;
        self.cache_user(Some(user.clone()));
        tracing::info!(user_id = %user.id, "profile updated");
        Ok(user)
    }

    /// Returns the backend confirmation message, if it sent one.
    pub async fn change_password(
        &self,
        current_password: &str,
        new_password: &str,
        confirm_password: &str,
    ) -> Result<Option<String>, ServiceError> {
        let endpoint = self.api.config().endpoints.change_password.clone();
        let body = json!({
            "current_password": current_password,
            "new_password": new_password,
            "confirm_password": confirm_password,
        });
        let response = self.api.request(&endpoint, HttpMethod::Put, RequestBody::Json(body)).await;
        match interpret(&response, "Change password failed") {
            Ok(envelope) => Ok(envelope.success_message()),
            Err(ServiceError::Rejected { message, field_errors }) => {
                let message = field_errors
                    .get("current_password")
                    .filter(|messages| !messages.is_empty())
                    .map_or(message, |messages| messages.join(" "));
                Err(ServiceError::Rejected { message, field_errors })
            }
            Err(err) => Err(err),
        }
    }

    /// Delete the account; on success every trace of the session is removed locally.
    pub async fn delete_account(&self, password: &str, confirmation: &str) -> Result<Option<String>, ServiceError> {
        const FALLBACK: &str = "Delete account failed";
        let endpoint = self.api.config().endpoints.delete_account.clone();
        let body = json!({ "password": password, "confirmation": confirmation });
        let response = self.api.request(&endpoint, HttpMethod::Delete, RequestBody::Json(body)).await;
        let envelope = match interpret(&response, FALLBACK) {
            Ok(envelope) => envelope,
            Err(ServiceError::Rejected { message, field_errors }) if message == FALLBACK => {
                let message = field_errors
                    .get("password")
                    .and_then(|messages| messages.first())
                    .cloned()
                    .unwrap_or(message);
                return Err(ServiceError::Rejected { message, field_errors });
            }
            Err(err) => return Err(err),
        };

        let user_id = self.get_current_user().map(|u| u.id);
        if let Some(id) = user_id.as_deref() {
            for kind in PreferenceKind::ALL {
                self.local.remove_item(&preference_key(kind, Some(id)));
            }
        }
        self.clear_session();
        tracing::info!(user_id = ?user_id, "account deleted");
        Ok(envelope.success_message())
    }

    /// Upload a new avatar image as the `upload` form field; returns the URL
    /// the backend now serves and mirrors it onto the cached user.
    pub async fn upload_avatar(&self, file_name: &str, bytes: Vec<u8>) -> Result<Option<String>, ServiceError> {
        let endpoint = self.api.config().endpoints.avatar_upload.clone();
        let part = FilePart { field: AVATAR_FIELD.to_owned(), file_name: file_name.to_owned(), bytes };
        let response = self.api.request(&endpoint, HttpMethod::Post, RequestBody::Multipart(part)).await;
        let envelope = interpret(&response, "Avatar upload failed")?;
        let url = envelope.uploaded_url().map(str::to_owned);
        if let Some(user) = transform_user(envelope.user.as_ref()) {
            self.cache_user(Some(user));
        } else if let (Some(url), Some(mut user)) = (&url, self.get_current_user()) {
            user.avatar_url = Some(url.clone());
            self.cache_user(Some(user));
        }
        tracing::info!(url = ?url, "avatar uploaded");
        Ok(url)
    }

    /// Persist notification preferences for the signed-in user and echo them back.
    pub fn update_notification_preferences(
        &self,
        prefs: &NotificationPreferences,
    ) -> Result<NotificationPreferences, ServiceError> {
        self.store_for_current_user(PreferenceKind::Notifications, prefs)
    }

    /// Persist privacy settings for the signed-in user and echo them back.
    pub fn update_privacy_settings(&self, settings: &PrivacySettings) -> Result<PrivacySettings, ServiceError> {
        self.store_for_current_user(PreferenceKind::Privacy, settings)
    }

    fn store_for_current_user<B>(&self, kind: PreferenceKind, blob: &B) -> Result<B, ServiceError>
    where
        B: Serialize + Clone,
    {
        let user = self.get_current_user().ok_or(ServiceError::NotAuthenticated)?;
        save_json(&self.local, &preference_key(kind, Some(&user.id)), blob);
        Ok(blob.clone())
    }

    fn establish_session(&self, envelope: Envelope, response: &ApiResponse) -> Result<User, ServiceError> {
        let user = user_from(&envelope, response)
            .ok_or_else(|| ServiceError::InvalidResponse("response has no user record".to_owned()))?;
        if let Some(tokens) = &envelope.tokens {
            self.api.tokens().set(tokens);
        }
        self.cache_user(Some(user.clone()));
        tracing::info!(user_id = %user.id, "session established");
        Ok(user)
    }

    fn cache_user(&self, user: Option<User>) {
        match &user {
            Some(user) => save_json(&self.session, SESSION_USER_KEY, user),
            None => self.session.remove_item(SESSION_USER_KEY),
        }
        *self.current_user.borrow_mut() = user;
    }

    fn clear_session(&self) {
        self.api.tokens().clear();
        self.cache_user(None);
    }
}

/// The user in an envelope, or the whole body when the backend returns a bare record.
fn user_from(envelope: &Envelope, response: &ApiResponse) -> Option<User> {
    if envelope.user.is_some() {
        return transform_user(envelope.user.as_ref());
    }
    let bare = bare_user(&response.data)?;
    transform_user(Some(&bare))
}

fn to_json<B: Serialize>(body: &B) -> Result<Value, ServiceError> {
    serde_json::to_value(body).map_err(|e| ServiceError::Network(format!("could not encode request: {e}")))
}

fn bare_user(data: &Value) -> Option<BackendUser> {
    data.get("id")?;
    match BackendUser::deserialize(data) {
        Ok(user) => Some(user),
        Err(err) => {
            tracing::warn!(error = %err, "unreadable user record");
            None
        }
    }
}
