//! LLM Adapters
//!
//! Provider-agnostic interface for chat-completion HTTP APIs.

pub mod factory;
pub mod openai;
pub mod stub;
pub mod transport;
pub mod transport_fake;
pub mod transport_reqwest;
pub mod transport_types;

// Re-export common types
pub use factory::create_adapter;
pub use transport::{AdapterError, SyncTransport};

/// LLM message role (universal subset across providers)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmRole {
    /// System message (sets behavior/context)
    System,
    /// User message (human input)
    User,
    /// Assistant message (LLM response)
    Assistant,
}

impl LlmRole {
    /// Wire name of the role
    pub fn as_str(&self) -> &'static str {
        match self {
            LlmRole::System => "system",
            LlmRole::User => "user",
            LlmRole::Assistant => "assistant",
        }
    }
}

/// Single LLM message (provider-agnostic)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmMessage {
    /// Message role
    pub role: LlmRole,
    /// Message content
    pub content: String,
}

impl LlmMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: LlmRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: LlmRole::User,
            content: content.into(),
        }
    }
}

/// LLM adapter trait
///
/// All providers implement this trait.
pub trait LlmAdapter: Send + Sync {
    /// Run one non-streaming completion and return the reply text
    fn complete(&self, messages: &[LlmMessage]) -> Result<String, AdapterError>;

    /// Get provider name for logging
    fn provider_name(&self) -> &str;
}

/// Adapter enum: concrete type for all providers
#[derive(Debug)]
pub enum Adapter {
    OpenAi(openai::OpenAiAdapter),
    Stub(stub::StubAdapter),
}

impl LlmAdapter for Adapter {
    fn complete(&self, messages: &[LlmMessage]) -> Result<String, AdapterError> {
        match self {
            Adapter::OpenAi(a) => a.complete(messages),
            Adapter::Stub(a) => a.complete(messages),
        }
    }

    fn provider_name(&self) -> &str {
        match self {
            Adapter::OpenAi(a) => a.provider_name(),
            Adapter::Stub(a) => a.provider_name(),
        }
    }
}
