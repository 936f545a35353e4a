//! Stub Adapter
//!
//! Returns a canned response without network calls. Selected with
//! `provider = "stub"` for offline runs of the server.

use crate::llm::adapters::{AdapterError, LlmAdapter, LlmMessage};

/// Stub adapter (returns a fixed response)
#[derive(Debug)]
pub struct StubAdapter {
    response: String,
}

impl StubAdapter {
    /// Create new stub adapter with default response
    pub fn new() -> Self {
        Self {
            response: Self::default_response(),
        }
    }

    /// Create stub adapter with custom response
    pub fn with_response(response: String) -> Self {
        Self { response }
    }

    fn default_response() -> String {
        r#"{"reason": "Stub analysis: no model was consulted.", "suggestion": "Configure an LLM provider to get a real critique."}"#
            .to_string()
    }
}

impl Default for StubAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl LlmAdapter for StubAdapter {
    fn complete(&self, _messages: &[LlmMessage]) -> Result<String, AdapterError> {
        Ok(self.response.clone())
    }

    fn provider_name(&self) -> &str {
        "stub"
    }
}
