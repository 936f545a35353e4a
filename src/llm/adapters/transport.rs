//! HTTP Transport for LLM Adapters
//!
//! Concrete transport selection: real reqwest client or test fixture.

pub use crate::llm::adapters::transport_fake::FakeTransport;
pub use crate::llm::adapters::transport_reqwest::ReqwestTransport;
pub use crate::llm::adapters::transport_types::{AdapterError, SyncTransport};

/// Concrete transport enum
#[derive(Debug)]
pub enum Transport {
    Real(ReqwestTransport),
    Fake(FakeTransport),
}

impl SyncTransport for Transport {
    fn post_json(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: &str,
    ) -> Result<String, AdapterError> {
        match self {
            Transport::Real(t) => t.post_json(url, headers, body),
            Transport::Fake(t) => t.post_json(url, headers, body),
        }
    }
}

impl Default for Transport {
    fn default() -> Self {
        Transport::Real(ReqwestTransport::new())
    }
}
