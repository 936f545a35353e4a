//! Host-facing tool surface
//!
//! A `Workbench` owns the data root and the tool registry. The host lists the
//! tool definitions, hands them to its model, and routes each tool call back
//! through [`Workbench::call_tool`]. Calls are independent; nothing is
//! remembered between them.

use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::Utc;
use serde_json::{Map, Value as JsonValue};
use tracing::{debug, info, warn};

use super::errors::ExecutionError;
use super::result::ToolResult;
use super::tool_mapper::{invoke_tool, ToolContext};
use super::tool_registry::{ToolMetadata, ToolRegistry};
use crate::data_tools::{report::DEFAULT_PREPARER, DataStore, ExpectedCostPolicy};

pub struct Workbench {
    store: DataStore,
    registry: ToolRegistry,
    policy: ExpectedCostPolicy,
    prepared_by: String,
}

impl Workbench {
    /// Workbench over the CSV tree at `data_dir`
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            store: DataStore::new(data_dir),
            registry: ToolRegistry::new(),
            policy: ExpectedCostPolicy::default(),
            prepared_by: DEFAULT_PREPARER.to_string(),
        }
    }

    /// Use a different expected-cost formula
    pub fn with_policy(mut self, policy: ExpectedCostPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Name recorded as report preparer
    pub fn with_preparer(mut self, name: impl Into<String>) -> Self {
        self.prepared_by = name.into();
        self
    }

    pub fn data_dir(&self) -> &Path {
        self.store.root()
    }

    pub fn store(&self) -> &DataStore {
        &self.store
    }

    pub fn policy(&self) -> ExpectedCostPolicy {
        self.policy
    }

    /// Tool metadata in presentation order
    pub fn tools(&self) -> impl Iterator<Item = &ToolMetadata> {
        self.registry.all()
    }

    /// Function-calling definitions for every tool
    pub fn list_tools(&self) -> Vec<JsonValue> {
        self.registry.schemas()
    }

    /// Execute one tool call
    ///
    /// `arguments` must be a JSON object or absent. Errors never escape as
    /// `Err`: they come back as a [`ToolResult`] with `is_error` set.
    pub fn call_tool(&self, name: &str, arguments: Option<&JsonValue>) -> ToolResult {
        let started = Instant::now();
        info!("Tool call: {}", name);

        let outcome = self.dispatch(name, arguments);
        let elapsed_ms = started.elapsed().as_millis();

        match outcome {
            Ok(content) => {
                debug!("Tool {} completed in {}ms", name, elapsed_ms);
                ToolResult::success(name, content)
            }
            Err(e) => {
                warn!("Tool {} failed after {}ms: {}", name, elapsed_ms, e);
                ToolResult::failure(name, &e)
            }
        }
    }

    fn dispatch(&self, name: &str, arguments: Option<&JsonValue>) -> Result<JsonValue, ExecutionError> {
        if !self.registry.contains(name) {
            return Err(ExecutionError::ToolNotFound(name.to_string()));
        }

        let empty = Map::new();
        let args = match arguments {
            None | Some(JsonValue::Null) => &empty,
            Some(JsonValue::Object(map)) => map,
            Some(_) => return Err(ExecutionError::ArgumentsNotObject(name.to_string())),
        };

        let ctx = ToolContext {
            store: &self.store,
            policy: self.policy,
            prepared_by: &self.prepared_by,
            now: Utc::now(),
        };
        invoke_tool(&ctx, name, args)
    }
}
