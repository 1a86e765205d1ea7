//! Backend wire schema and its mapping to client-side shapes.
//!
//! DESIGN
//! ======
//! The backend speaks snake_case user records and loosely shaped envelopes
//! (`success`/`error`/`errors`, or bare DRF-style field maps). Deserializers
//! here are deliberately lenient so a schema wobble degrades into a readable
//! message instead of a parse failure.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::collections::BTreeMap;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::tokens::TokenPair;

/// Field name to validation messages, as reported by the backend.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// User record as returned by the backend.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct BackendUser {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub country_code: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub date_joined: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// Client-side user shape, cached in memory and in session storage.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub full_name: String,
    pub email: String,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub country_code: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub date_joined: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

impl User {
    /// Name to greet the user with; falls back to the email address.
    pub fn display_name(&self) -> &str {
        if self.full_name.trim().is_empty() { &self.email } else { &self.full_name }
    }
}

/// Map a backend record to the client shape. No record, no user.
pub fn transform_user(backend: Option<&BackendUser>) -> Option<User> {
    let backend = backend?;
    Some(User {
        id: backend.id.clone(),
        full_name: backend.full_name.clone().unwrap_or_default(),
        email: backend.email.clone().unwrap_or_default(),
        country: backend.country.clone(),
        country_code: backend.country_code.clone(),
        phone: backend.phone.clone(),
        date_of_birth: backend.date_of_birth.clone(),
        gender: backend.gender.clone(),
        date_joined: backend.date_joined.clone(),
        avatar_url: backend.avatar_url.clone(),
    })
}

/// Response envelope shared by the auth and account endpoints.
///
/// Keys the envelope does not name are kept in `extra`; DRF serializers
/// report field errors at the top level (`{"password": ["..."]}`).
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Envelope {
    pub success: Option<bool>,
    pub user: Option<BackendUser>,
    pub tokens: Option<TokenPair>,
    pub error: Option<String>,
    pub message: Option<String>,
    pub detail: Option<String>,
    pub avatar_url: Option<String>,
    /// Upload endpoints answer `{"status", "name", "url"}`.
    pub url: Option<String>,
    #[serde(deserialize_with = "deserialize_field_errors")]
    pub errors: FieldErrors,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Envelope {
    /// Parse an envelope from response data. Non-object data (`null`, a bare
    /// string) yields an empty envelope.
    ///
    /// # Errors
    ///
    /// Returns the serde error when an object is present but malformed.
    pub fn from_data(data: &Value) -> Result<Self, serde_json::Error> {
        if data.is_object() { Self::deserialize(data) } else { Ok(Self::default()) }
    }

    /// Field errors from `errors` merged with top-level DRF-style field lists.
    pub fn field_errors(&self) -> FieldErrors {
        let mut merged = self.errors.clone();
        for (field, value) in &self.extra {
            let messages = messages_from(value);
            if matches!(value, Value::Array(_)) && !messages.is_empty() {
                merged.entry(field.clone()).or_insert(messages);
            }
        }
        merged
    }

    /// Success text reported by the backend, if any.
    pub fn success_message(&self) -> Option<String> {
        self.message.clone().or_else(|| self.detail.clone())
    }

    /// URL of a freshly uploaded file: `url`, else `avatar_url`.
    pub fn uploaded_url(&self) -> Option<&str> {
        self.url.as_deref().or(self.avatar_url.as_deref())
    }
}

/// Partial profile update; absent fields are left untouched server-side.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

fn messages_from(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect(),
        Value::String(s) => vec![s.clone()],
        Value::Null => Vec::new(),
        other => vec![other.to_string()],
    }
}

fn deserialize_field_errors<'de, D>(deserializer: D) -> Result<FieldErrors, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let Value::Object(map) = value else {
        return Ok(FieldErrors::new());
    };
    Ok(map
        .iter()
        .map(|(field, messages)| (field.clone(), messages_from(messages)))
        .filter(|(_, messages)| !messages.is_empty())
        .collect())
}

fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(D::Error::custom(format!("expected string or number id, got {other}"))),
    }
}
