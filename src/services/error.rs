//! Service-level error taxonomy and response interpretation.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use crate::net::http::ApiResponse;
use crate::net::types::{Envelope, FieldErrors};

/// Failure of an account operation, rendered to the user via `Display`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    /// The request never completed (offline, DNS, refused, timeout).
    #[error("{0}")]
    Network(String),

    /// The backend answered with a body the client cannot use.
    #[error("Unexpected server response: {0}")]
    InvalidResponse(String),

    /// The backend rejected the request (validation or business rule).
    #[error("{message}")]
    Rejected { message: String, field_errors: FieldErrors },

    /// The backend answered 401; the global hook has already cleared the session.
    #[error("Your session has expired. Please log in again.")]
    SessionExpired,

    /// A local precondition failed: no user is signed in.
    #[error("Not authenticated")]
    NotAuthenticated,
}

impl ServiceError {
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Rejected { field_errors, .. } => Some(field_errors),
            _ => None,
        }
    }

    /// Whether retrying the same request may succeed.
    pub fn retryable(&self) -> bool {
        matches!(self, Self::Network(_))
    }
}

/// Classify a normalized response.
///
/// Success needs a 2xx status, a readable body, and an envelope that does not
/// say `success: false`. Failures carry the backend `error` (or `detail`),
/// falling back to `fallback`.
pub(crate) fn interpret(response: &ApiResponse, fallback: &str) -> Result<Envelope, ServiceError> {
    let Some(status) = response.status else {
        let message = response.error.clone().unwrap_or_else(|| "Network error".to_owned());
        return Err(ServiceError::Network(message));
    };
    let http_ok = (200..300).contains(&status);
    if let (true, Some(err)) = (http_ok, &response.error) {
        return Err(ServiceError::InvalidResponse(err.clone()));
    }

    let envelope = match Envelope::from_data(&response.data) {
        Ok(envelope) => envelope,
        Err(err) if http_ok => return Err(ServiceError::InvalidResponse(err.to_string())),
        Err(_) => Envelope::default(),
    };

    if response.success && envelope.success != Some(false) {
        return Ok(envelope);
    }
    if status == 401 && envelope.error.is_none() {
        return Err(ServiceError::SessionExpired);
    }
    let message = envelope
        .error
        .clone()
        .or_else(|| envelope.detail.clone())
        .unwrap_or_else(|| fallback.to_owned());
    Err(ServiceError::Rejected { message, field_errors: envelope.field_errors() })
}
