//! Fake transport for testing
//!
//! Uses fixture strings instead of real HTTP calls.

use std::sync::Mutex;

use crate::llm::adapters::transport_types::{AdapterError, SyncTransport};

/// Fake transport for testing (uses fixture strings)
#[derive(Debug)]
pub struct FakeTransport {
    /// Response body to return
    pub response_body: String,
    /// Error to return instead (status 0 means a network error)
    pub error: Option<(u16, String)>,
    /// Last request body seen
    last_request: Mutex<Option<String>>,
}

impl FakeTransport {
    /// Create fake transport with given response
    pub fn new(response: &str) -> Self {
        Self {
            response_body: response.to_string(),
            error: None,
            last_request: Mutex::new(None),
        }
    }

    /// Create fake transport that returns a network error
    pub fn with_error(msg: &str) -> Self {
        Self {
            response_body: String::new(),
            error: Some((0, msg.to_string())),
            last_request: Mutex::new(None),
        }
    }

    /// Create fake transport that answers with a non-2xx status
    pub fn with_status(status: u16, body: &str) -> Self {
        Self {
            response_body: String::new(),
            error: Some((status, body.to_string())),
            last_request: Mutex::new(None),
        }
    }

    /// Body of the most recent request
    pub fn last_request(&self) -> Option<String> {
        self.last_request
            .lock()
            .ok()
            .and_then(|guard| guard.clone())
    }
}

impl SyncTransport for FakeTransport {
    fn post_json(
        &self,
        _url: &str,
        _headers: &[(&str, &str)],
        body: &str,
    ) -> Result<String, AdapterError> {
        if let Ok(mut slot) = self.last_request.lock() {
            *slot = Some(body.to_string());
        }
        match &self.error {
            Some((0, msg)) => Err(AdapterError::Network(msg.clone())),
            Some((status, msg)) => Err(AdapterError::Http {
                status: *status,
                message: msg.clone(),
            }),
            None => Ok(self.response_body.clone()),
        }
    }
}
