//! Scripted in-process transport for unit tests.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use async_trait::async_trait;
use serde_json::Value;

use super::http::{HttpTransport, OutgoingRequest, RawResponse, TransportError};

/// Replays queued responses in order and records every request it receives.
/// Clones share the queue and the request log.
#[derive(Clone, Default)]
pub(crate) struct ScriptedTransport {
    responses: Rc<RefCell<VecDeque<Result<RawResponse, TransportError>>>>,
    requests: Rc<RefCell<Vec<OutgoingRequest>>>,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push_json(&self, status: u16, body: &Value) -> &Self {
        self.push_raw(status, &body.to_string())
    }

    pub(crate) fn push_raw(&self, status: u16, body: &str) -> &Self {
        self.responses
            .borrow_mut()
            .push_back(Ok(RawResponse { status, body: body.to_owned() }));
        self
    }

    pub(crate) fn push_failure(&self, message: &str) -> &Self {
        self.responses
            .borrow_mut()
            .push_back(Err(TransportError::Request(message.to_owned())));
        self
    }

    pub(crate) fn requests(&self) -> Vec<OutgoingRequest> {
        self.requests.borrow().clone()
    }

    pub(crate) fn last_request(&self) -> Option<OutgoingRequest> {
        self.requests.borrow().last().cloned()
    }
}

#[async_trait(?Send)]
impl HttpTransport for ScriptedTransport {
    async fn send(&self, request: OutgoingRequest) -> Result<RawResponse, TransportError> {
        self.requests.borrow_mut().push(request);
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Request("no scripted response".to_owned())))
    }
}
