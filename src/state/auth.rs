//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! Provided as a Leptos context by the app shell. Pages read it for
//! identity-dependent rendering; login/logout handlers write it after the
//! auth service has updated the persisted session.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::net::types::User;

/// Authentication state tracking the current user and loading status.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub user: Option<User>,
    pub loading: bool,
}

impl AuthState {
    pub fn signed_in(user: User) -> Self {
        Self { user: Some(user), loading: false }
    }

    pub fn signed_out() -> Self {
        Self { user: None, loading: false }
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.id.as_str())
    }

    /// Header greeting for the settings shell.
    pub fn greeting(&self) -> String {
        match &self.user {
            Some(user) => format!("Signed in as {}", user.display_name()),
            None if self.loading => "Loading...".to_owned(),
            None => "Not signed in".to_owned(),
        }
    }
}
