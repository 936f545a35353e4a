//! Real HTTP transport using reqwest
//!
//! Synchronous blocking HTTP client for LLM adapters. Callers on an async
//! runtime must run it on the blocking pool.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;
use tracing::debug;

use crate::llm::adapters::transport_types::{AdapterError, SyncTransport};

/// Longest error body echoed back in an error message
const MAX_ERROR_BODY: usize = 500;

/// Real HTTP transport using reqwest
#[derive(Debug)]
pub struct ReqwestTransport {
    /// Timeout in seconds for requests
    timeout: u64,
}

impl ReqwestTransport {
    /// Create new transport with default timeout (60s)
    pub fn new() -> Self {
        Self { timeout: 60 }
    }

    /// Create transport with custom timeout
    pub fn with_timeout(timeout_secs: u64) -> Self {
        Self {
            timeout: timeout_secs,
        }
    }

    pub fn timeout_secs(&self) -> u64 {
        self.timeout
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl SyncTransport for ReqwestTransport {
    fn post_json(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: &str,
    ) -> Result<String, AdapterError> {
        debug!("[HTTP] POST {} (timeout={}s, body_len={})", url, self.timeout, body.len());
        let client = Client::builder()
            .timeout(Duration::from_secs(self.timeout))
            .build()?;

        let mut request = client.post(url).body(body.to_string());
        for (key, value) in headers {
            request = request.header(*key, *value);
        }

        let response = request.send()?;
        let status = response.status();
        debug!("[HTTP] response: status={}", status);

        if status == StatusCode::UNAUTHORIZED {
            return Err(AdapterError::Authentication("Invalid API key".to_string()));
        }
        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .map(|v| format!(" (retry after {}s)", v))
                .unwrap_or_default();
            return Err(AdapterError::RateLimited { retry_after });
        }

        let text = response.text()?;
        if !status.is_success() {
            let message: String = text.chars().take(MAX_ERROR_BODY).collect();
            return Err(AdapterError::Http {
                status: status.as_u16(),
                message,
            });
        }

        Ok(text)
    }
}
