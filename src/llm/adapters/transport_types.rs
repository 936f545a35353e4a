//! Transport types
//!
//! Common types shared across transport implementations.

/// Adapter errors
#[derive(Debug, thiserror::Error)]
pub enum AdapterError {
    /// Network error (connection refused, timeout, etc.)
    #[error("Network error: {0}")]
    Network(String),

    /// HTTP error (non-2xx status)
    #[error("HTTP error {status}: {message}")]
    Http { status: u16, message: String },

    /// Authentication failed
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Rate limited
    #[error("Rate limited{retry_after}")]
    RateLimited { retry_after: String },

    /// Invalid response from provider
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(String),
}

impl From<serde_json::Error> for AdapterError {
    fn from(err: serde_json::Error) -> Self {
        AdapterError::Json(err.to_string())
    }
}

impl From<reqwest::Error> for AdapterError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => AdapterError::Http {
                status: status.as_u16(),
                message: err.to_string(),
            },
            None => AdapterError::Network(err.to_string()),
        }
    }
}

/// Synchronous HTTP transport
///
/// Abstraction over HTTP client to enable testing with FakeTransport.
pub trait SyncTransport: Send + Sync {
    /// POST JSON request and return response body
    fn post_json(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: &str,
    ) -> Result<String, AdapterError>;
}
