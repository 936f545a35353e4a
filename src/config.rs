//! `investigator.toml` configuration
//!
//! Every section is optional; a missing file means defaults throughout.
//!
//! ```toml
//! data_dir = "mock_data"
//!
//! [llm]
//! provider = "openai"
//! base_url = "https://api.openai.com/v1"
//! model = "gpt-4o-mini"
//! api_key = "env:OPENAI_API_KEY"
//!
//! [server]
//! host = "127.0.0.1"
//! port = 8787
//!
//! [costs]
//! policy = "failure_penalty"
//! failure_penalty = 10000.0
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::data_tools::ExpectedCostPolicy;

/// Default config file name, looked up in the working directory
pub const CONFIG_FILE: &str = "investigator.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvestigatorConfig {
    /// CSV root; overridden by `--data-dir` and `PHARMA_DATA_DIR`
    pub data_dir: Option<PathBuf>,
    pub llm: LlmConfig,
    pub server: ServerConfig,
    pub costs: CostConfig,
}

impl InvestigatorConfig {
    /// Parse a TOML document
    pub fn from_toml_str(content: &str, origin: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: origin.to_string(),
            source,
        })
    }

    /// Read and parse a config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content, &path.display().to_string())
    }

    /// Load `path` if given, else `investigator.toml` if it exists, else defaults
    ///
    /// An explicitly named file must exist.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::load(p),
            None => {
                let default = Path::new(CONFIG_FILE);
                if default.is_file() {
                    Self::load(default)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }
}

/// Chat-completion endpoint settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// "openai" (any OpenAI-compatible endpoint) or "stub"
    pub provider: String,
    pub base_url: String,
    pub model: String,
    /// Literal key or `env:VAR`
    pub api_key: String,
    pub timeout_secs: u64,
    pub temperature: Option<f32>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            api_key: "env:OPENAI_API_KEY".to_string(),
            timeout_secs: 60,
            temperature: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8787,
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostPolicyName {
    #[default]
    RetryAdjusted,
    FailurePenalty,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostConfig {
    pub policy: CostPolicyName,
    /// Penalty used by `failure_penalty`
    pub failure_penalty: f64,
}

impl Default for CostConfig {
    fn default() -> Self {
        Self {
            policy: CostPolicyName::RetryAdjusted,
            failure_penalty: 10_000.0,
        }
    }
}

impl CostConfig {
    pub fn policy(&self) -> ExpectedCostPolicy {
        match self.policy {
            CostPolicyName::RetryAdjusted => ExpectedCostPolicy::RetryAdjusted,
            CostPolicyName::FailurePenalty => ExpectedCostPolicy::FailurePenalty {
                penalty: self.failure_penalty,
            },
        }
    }
}

/// Resolve a value that may be an `env:VAR` reference
///
/// An unset variable resolves to the empty string.
pub fn resolve_env_ref(value: &str) -> String {
    match value.strip_prefix("env:") {
        Some(var) => std::env::var(var).unwrap_or_default(),
        None => value.to_string(),
    }
}
