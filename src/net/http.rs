//! JSON request wrapper around a pluggable HTTP transport.
//!
//! ERROR HANDLING
//! ==============
//! [`ApiClient::request`] always resolves. Transport failures, unreadable
//! bodies and malformed JSON become an [`ApiResponse`] with `success: false`
//! and an `error` message, so callers render a message instead of unwinding.
//!
//! A 401 from any endpoint runs the app-wide unauthorized hook: the stored
//! token pair is cleared and the registered callback (the browser build
//! navigates to `/login`) fires. The call still resolves with the 401.

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use std::rc::Rc;

use async_trait::async_trait;
use serde_json::Value;

use super::tokens::TokenStore;
use crate::config::ApiConfig;
use crate::storage::KeyValueStore;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

/// A single file sent as a multipart form field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilePart {
    pub field: String,
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(Value),
    Multipart(FilePart),
}

/// Fully resolved request handed to a transport.
#[derive(Clone, Debug, PartialEq)]
pub struct OutgoingRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
}

impl OutgoingRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Status and body text as received from the network.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// Errors raised by a transport before a status line is available.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    /// The HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    Build(String),

    /// The request could not be sent or no response arrived.
    #[error("request failed: {0}")]
    Request(String),

    /// The response body could not be read.
    #[error("response read failed: {0}")]
    Body(String),
}

/// Sends one request. Futures are `?Send`: the client runs on the browser
/// event loop or a current-thread runtime.
#[async_trait(?Send)]
pub trait HttpTransport {
    async fn send(&self, request: OutgoingRequest) -> Result<RawResponse, TransportError>;
}

/// Uniform result of every API call.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiResponse {
    /// True for a 2xx status with a readable body.
    pub success: bool,
    /// HTTP status, `None` when the request never completed.
    pub status: Option<u16>,
    /// Parsed JSON body, `Null` when empty or unreadable.
    pub data: Value,
    /// Transport or parse failure description.
    pub error: Option<String>,
}

impl ApiResponse {
    fn network_failure(message: String) -> Self {
        Self { success: false, status: None, data: Value::Null, error: Some(message) }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status == Some(401)
    }
}

pub(crate) fn normalize_response(raw: RawResponse) -> ApiResponse {
    let ok = (200..300).contains(&raw.status);
    let body = raw.body.trim();
    if body.is_empty() {
        return ApiResponse { success: ok, status: Some(raw.status), data: Value::Null, error: None };
    }
    match serde_json::from_str::<Value>(body) {
        Ok(data) => ApiResponse { success: ok, status: Some(raw.status), data, error: None },
        Err(err) => ApiResponse {
            success: false,
            status: Some(raw.status),
            data: Value::Null,
            error: Some(format!("invalid JSON response: {err}")),
        },
    }
}

/// Callback fired after a 401 has cleared the stored tokens.
pub type UnauthorizedHook = Rc<dyn Fn()>;

/// Issues JSON requests against the configured base URL with bearer auth.
pub struct ApiClient<T, S> {
    transport: T,
    config: ApiConfig,
    tokens: TokenStore<S>,
    on_unauthorized: Option<UnauthorizedHook>,
}

impl<T, S> ApiClient<T, S>
where
    T: HttpTransport,
    S: KeyValueStore,
{
    pub fn new(transport: T, config: ApiConfig, tokens: TokenStore<S>) -> Self {
        Self { transport, config, tokens, on_unauthorized: None }
    }

    /// Register the app-wide reaction to a 401 (typically "go to login").
    #[must_use]
    pub fn with_unauthorized_hook<F>(mut self, hook: F) -> Self
    where
        F: Fn() + 'static,
    {
        self.on_unauthorized = Some(Rc::new(hook));
        self
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn tokens(&self) -> &TokenStore<S> {
        &self.tokens
    }

    /// Send a request to `endpoint` (relative to the base URL).
    pub async fn request(&self, endpoint: &str, method: HttpMethod, body: RequestBody) -> ApiResponse {
        let url = self.config.url(endpoint);
        let mut headers = Vec::new();
        if let Some(access) = self.tokens.access_token() {
            headers.push(("Authorization".to_owned(), format!("Bearer {access}")));
        }
        if matches!(body, RequestBody::Json(_)) {
            headers.push(("Content-Type".to_owned(), "application/json".to_owned()));
        }

        tracing::debug!(method = method.as_str(), %url, "api request");
        let request = OutgoingRequest { method, url, headers, body };
        let url = request.url.clone();
        let raw = match self.transport.send(request).await {
            Ok(raw) => raw,
            Err(err) => {
                tracing::warn!(%url, error = %err, "api request failed");
                return ApiResponse::network_failure(err.to_string());
            }
        };

        if raw.status == 401 {
            self.handle_unauthorized(&url);
        }
        let response = normalize_response(raw);
        if !response.success {
            tracing::debug!(%url, status = ?response.status, "api request unsuccessful");
        }
        response
    }

    fn handle_unauthorized(&self, url: &str) {
        tracing::warn!(%url, "unauthorized response; clearing session tokens");
        self.tokens.clear();
        if let Some(hook) = &self.on_unauthorized {
            hook();
        }
    }
}
