//! Persisted storage key names.
//!
//! Every key the client writes is built here. Preference blobs are namespaced
//! per user (`settings:{kind}:{user_id}`) so two accounts on the same browser
//! never read each other's settings; before login the `guest` owner is used.

#[cfg(test)]
#[path = "keys_test.rs"]
mod keys_test;

/// Local storage key holding the serialized access/refresh token pair.
pub const AUTH_TOKENS_KEY: &str = "authTokens";

/// Session storage key holding the cached current user.
pub const SESSION_USER_KEY: &str = "currentUser";

const GUEST_OWNER: &str = "guest";

/// Kinds of per-user preference blobs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PreferenceKind {
    Theme,
    Notifications,
    Privacy,
}

impl PreferenceKind {
    pub const ALL: [Self; 3] = [Self::Theme, Self::Notifications, Self::Privacy];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Theme => "theme",
            Self::Notifications => "notifications",
            Self::Privacy => "privacy",
        }
    }
}

/// Storage key for a preference blob owned by `user_id` (guest when absent).
pub fn preference_key(kind: PreferenceKind, user_id: Option<&str>) -> String {
    let owner = user_id.map(str::trim).filter(|id| !id.is_empty()).unwrap_or(GUEST_OWNER);
    format!("settings:{}:{owner}", kind.as_str())
}
