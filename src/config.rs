//! REST API configuration: base URL, endpoint map, and request timeout.
//!
//! Natively the values come from environment variables; in the browser the
//! base URL is baked in at build time.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8000/api";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Errors produced while building an [`ApiConfig`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The base URL is not an absolute `http(s)` URL.
    #[error("invalid SETTINGS_API_BASE_URL '{0}': expected an http:// or https:// URL")]
    InvalidBaseUrl(String),
}

/// Endpoint paths relative to [`ApiConfig::base_url`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub login: String,
    pub register: String,
    pub logout: String,
    pub profile: String,
    pub change_password: String,
    pub delete_account: String,
    pub avatar_upload: String,
    pub notifications: String,
    pub privacy: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            login: "/auth/login/".to_owned(),
            register: "/auth/register/".to_owned(),
            logout: "/auth/logout/".to_owned(),
            profile: "/settings/profile/".to_owned(),
            change_password: "/settings/change-password/".to_owned(),
            delete_account: "/settings/delete-account/".to_owned(),
            avatar_upload: "/settings/avatar/".to_owned(),
            notifications: "/settings/notifications/".to_owned(),
            privacy: "/settings/privacy/".to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub endpoints: Endpoints,
    pub request_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}

impl ApiConfig {
    /// Config with default endpoints rooted at `base_url` (trailing `/` trimmed).
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
            endpoints: Endpoints::default(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }

    /// Build config from process environment variables.
    ///
    /// Optional:
    /// - `SETTINGS_API_BASE_URL`: default `http://127.0.0.1:8000/api`
    /// - `SETTINGS_API_TIMEOUT_SECS`: default 30
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] when the base URL is not `http(s)`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] when the base URL is not `http(s)`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup("SETTINGS_API_BASE_URL").unwrap_or_else(|| DEFAULT_API_BASE_URL.to_owned());
        let base_url = base_url.trim();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidBaseUrl(base_url.to_owned()));
        }
        let mut config = Self::new(base_url);
        config.request_timeout_secs = lookup("SETTINGS_API_TIMEOUT_SECS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);
        Ok(config)
    }

    /// Config for the browser bundle, using the base URL set at build time.
    pub fn from_build_env() -> Self {
        option_env!("SETTINGS_API_BASE_URL").map_or_else(Self::default, Self::new)
    }

    /// Resolve an endpoint against the base URL. Absolute URLs pass through.
    pub fn url(&self, endpoint: &str) -> String {
        if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
            return endpoint.to_owned();
        }
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }
}
