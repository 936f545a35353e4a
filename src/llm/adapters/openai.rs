//! OpenAI Adapter
//!
//! OpenAI-compatible chat-completions adapter. Works against any server
//! exposing `POST {base_url}/chat/completions`.

use crate::llm::adapters::transport::{ReqwestTransport, SyncTransport, Transport};
use crate::llm::adapters::{AdapterError, LlmAdapter, LlmMessage};
use serde_json::Value as JsonValue;

/// OpenAI-compatible adapter
#[derive(Debug)]
pub struct OpenAiAdapter {
    /// Base URL (e.g., https://api.openai.com/v1)
    base_url: String,
    /// Model name (e.g., gpt-4o-mini)
    model: String,
    /// API key
    api_key: String,
    /// Sampling temperature (provider default when unset)
    temperature: Option<f32>,
    /// HTTP transport
    transport: Transport,
}

impl OpenAiAdapter {
    /// Create new OpenAI adapter
    pub fn new(base_url: String, model: String, api_key: String) -> Self {
        Self::with_transport(
            base_url,
            model,
            api_key,
            Transport::Real(ReqwestTransport::new()),
        )
    }

    /// Create adapter with custom transport (for testing)
    pub fn with_transport(
        base_url: String,
        model: String,
        api_key: String,
        transport: Transport,
    ) -> Self {
        Self {
            base_url,
            model,
            api_key,
            temperature: None,
            transport,
        }
    }

    /// Set sampling temperature
    pub fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    /// Chat-completions endpoint
    pub fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    /// Build chat request body from message array
    pub fn build_request(&self, messages: &[LlmMessage]) -> Result<String, AdapterError> {
        let openai_messages: Vec<JsonValue> = messages
            .iter()
            .map(|msg| {
                serde_json::json!({
                    "role": msg.role.as_str(),
                    "content": msg.content
                })
            })
            .collect();

        let mut request = serde_json::json!({
            "model": self.model,
            "messages": openai_messages,
            "stream": false
        });
        if let Some(t) = self.temperature {
            request["temperature"] = serde_json::json!(t);
        }

        Ok(request.to_string())
    }
}

/// Parse OpenAI chat completion JSON response
///
/// Empty content counts as an invalid response.
pub fn parse_chat_completion(response: &str) -> Result<String, AdapterError> {
    let json: JsonValue = serde_json::from_str(response)?;

    let content = json["choices"]
        .get(0)
        .and_then(|c| c.get("message"))
        .and_then(|m| m.get("content"))
        .and_then(|c| c.as_str())
        .ok_or_else(|| {
            AdapterError::InvalidResponse("Missing choices[0].message.content".to_string())
        })?;

    if content.trim().is_empty() {
        return Err(AdapterError::InvalidResponse(
            "Empty completion content".to_string(),
        ));
    }

    Ok(content.to_string())
}

impl LlmAdapter for OpenAiAdapter {
    fn complete(&self, messages: &[LlmMessage]) -> Result<String, AdapterError> {
        let body = self.build_request(messages)?;

        let auth_header = format!("Bearer {}", self.api_key);
        let mut headers = vec![("Content-Type", "application/json")];
        if !self.api_key.is_empty() {
            headers.push(("Authorization", auth_header.as_str()));
        }

        let response = self.transport.post_json(&self.endpoint(), &headers, &body)?;
        parse_chat_completion(&response)
    }

    fn provider_name(&self) -> &str {
        "openai"
    }
}
