//! Adapter Factory
//!
//! Creates LLM adapter instances from configuration.

use crate::config::{resolve_env_ref, LlmConfig};
use crate::llm::adapters::openai::OpenAiAdapter;
use crate::llm::adapters::stub::StubAdapter;
use crate::llm::adapters::transport::{ReqwestTransport, Transport};
use crate::llm::adapters::{Adapter, AdapterError};

/// Create adapter from the `[llm]` config section
///
/// `api_key` may be `env:VAR`; an OpenAI-compatible provider with no key
/// is allowed (local servers rarely need one).
pub fn create_adapter(config: &LlmConfig) -> Result<Adapter, AdapterError> {
    match config.provider.as_str() {
        "stub" => Ok(Adapter::Stub(StubAdapter::new())),
        "openai" => {
            if config.base_url.trim().is_empty() {
                return Err(AdapterError::Configuration(
                    "Missing 'base_url' in [llm] config".to_string(),
                ));
            }
            if config.model.trim().is_empty() {
                return Err(AdapterError::Configuration(
                    "Missing 'model' in [llm] config".to_string(),
                ));
            }
            let api_key = resolve_env_ref(&config.api_key);
            let adapter = OpenAiAdapter::with_transport(
                config.base_url.clone(),
                config.model.clone(),
                api_key,
                Transport::Real(ReqwestTransport::with_timeout(config.timeout_secs)),
            )
            .with_temperature(config.temperature);
            Ok(Adapter::OpenAi(adapter))
        }
        other => Err(AdapterError::Configuration(format!(
            "Unknown provider: {}",
            other
        ))),
    }
}
