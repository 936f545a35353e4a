//! pharma-investigator: tools for investigating cold-chain incidents
//!
//! A host agent framework lists the workbench tools, lets its model call
//! them, and gets back plain JSON. The same tools back the CLI and the HTTP
//! API, next to an LLM critique of finished agent transcripts.

pub mod agent;
pub mod api;
pub mod cli;
pub mod config;
pub mod data_tools;
pub mod execution_engine;
pub mod llm;

pub use agent::{AgentProfile, InvestigationAgent};
pub use config::InvestigatorConfig;
pub use data_tools::{DataError, DataStore, ErrorKind, ExpectedCostPolicy, Record, TimelineEvent};
pub use execution_engine::{ToolResult, Workbench};
