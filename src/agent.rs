//! Investigation agent profile
//!
//! The host framework runs the conversation; this crate only supplies what
//! it needs to register the agent: a name, a routing description, a system
//! prompt and a workbench.

use std::path::PathBuf;

use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::execution_engine::Workbench;
use crate::llm::contracts::{agent_description, investigation_system_prompt};

pub const DEFAULT_AGENT_NAME: &str = "PharmaInvestigator";

pub struct InvestigationAgent {
    pub name: String,
    pub description: String,
    pub system_prompt: String,
    pub workbench: Workbench,
}

/// Serializable view handed to a host at registration
#[derive(Debug, Serialize)]
pub struct AgentProfile<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub system_prompt: &'a str,
    pub tools: Vec<JsonValue>,
}

impl InvestigationAgent {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        Self {
            name: DEFAULT_AGENT_NAME.to_string(),
            description: agent_description(&data_dir),
            system_prompt: investigation_system_prompt(),
            workbench: Workbench::new(data_dir).with_preparer(DEFAULT_AGENT_NAME),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Replace the built-in system prompt
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    pub fn with_workbench(mut self, workbench: Workbench) -> Self {
        self.workbench = workbench;
        self
    }

    pub fn profile(&self) -> AgentProfile<'_> {
        AgentProfile {
            name: &self.name,
            description: &self.description,
            system_prompt: &self.system_prompt,
            tools: self.workbench.list_tools(),
        }
    }
}
