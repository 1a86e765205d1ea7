//! In-process fake of the account backend for end-to-end session tests.

use std::cell::RefCell;
use std::rc::Rc;

use account_settings::net::http::{HttpMethod, HttpTransport, OutgoingRequest, RawResponse, RequestBody, TransportError};
use async_trait::async_trait;
use serde_json::{Map, Value, json};

pub const EMAIL: &str = "john@example.com";
pub const PASSWORD: &str = "Secret#123";
pub const ACCESS: &str = "access-1";

#[derive(Default)]
struct State {
    profile: Map<String, Value>,
    notifications: Option<Value>,
    signed_in: bool,
    deleted: bool,
    offline: bool,
    calls: Vec<(HttpMethod, String)>,
}

/// Routes requests by method and path like the real backend would.
#[derive(Clone)]
pub struct FakeBackend {
    state: Rc<RefCell<State>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        let profile = json!({"id": 42, "full_name": "John Doe", "email": EMAIL, "country": "Kenya"});
        let state = State { profile: profile.as_object().cloned().unwrap_or_default(), ..State::default() };
        Self { state: Rc::new(RefCell::new(state)) }
    }

    pub fn set_offline(&self, offline: bool) {
        self.state.borrow_mut().offline = offline;
    }

    pub fn is_deleted(&self) -> bool {
        self.state.borrow().deleted
    }

    pub fn calls(&self) -> Vec<(HttpMethod, String)> {
        self.state.borrow().calls.clone()
    }

    fn route(&self, request: &OutgoingRequest) -> (u16, Value) {
        let path = request.url.split_once("/api").map_or(request.url.as_str(), |(_, p)| p);
        let body = match &request.body {
            RequestBody::Json(v) => v.clone(),
            _ => Value::Null,
        };
        let authorized = request.header("Authorization") == Some(format!("Bearer {ACCESS}").as_str());
        let mut state = self.state.borrow_mut();
        state.calls.push((request.method, path.to_owned()));

        match (request.method, path) {
            (HttpMethod::Post, "/auth/login/") => {
                if state.deleted || body["email"] != EMAIL || body["password"] != PASSWORD {
                    return (400, json!({"success": false, "error": "Invalid credentials"}));
                }
                state.signed_in = true;
                (200, json!({
                    "success": true,
                    "user": Value::Object(state.profile.clone()),
                    "tokens": {"access": ACCESS, "refresh": "refresh-1"}
                }))
            }
            (HttpMethod::Post, "/auth/logout/") => {
                state.signed_in = false;
                (205, Value::Null)
            }
            (_, _) if !authorized || !state.signed_in => (401, json!({"detail": "Authentication credentials were not provided."})),
            (HttpMethod::Get, "/settings/profile/") => (200, Value::Object(state.profile.clone())),
            (HttpMethod::Put, "/settings/profile/") => {
                if let Value::Object(fields) = body {
                    state.profile.extend(fields);
                }
                (200, json!({"success": true, "user": Value::Object(state.profile.clone())}))
            }
            (HttpMethod::Get, "/settings/notifications/") => match &state.notifications {
                Some(blob) => (200, json!({"success": true, "preferences": blob})),
                None => (404, json!({"detail": "Not found."})),
            },
            (HttpMethod::Put, "/settings/notifications/") => {
                state.notifications = Some(body);
                (200, json!({"success": true}))
            }
            (HttpMethod::Delete, "/settings/delete-account/") => {
                if body["password"] != PASSWORD {
                    return (400, json!({"password": ["Incorrect password."]}));
                }
                state.deleted = true;
                state.signed_in = false;
                (200, json!({"success": true, "message": "Account deleted"}))
            }
            _ => (404, json!({"detail": "Not found."})),
        }
    }
}

#[async_trait(?Send)]
impl HttpTransport for FakeBackend {
    async fn send(&self, request: OutgoingRequest) -> Result<RawResponse, TransportError> {
        if self.state.borrow().offline {
            return Err(TransportError::Request("connection refused".to_owned()));
        }
        let (status, body) = self.route(&request);
        let body = if body.is_null() { String::new() } else { body.to_string() };
        Ok(RawResponse { status, body })
    }
}
