//! Tool call result types

use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};

use super::errors::ExecutionError;
use crate::data_tools::DataError;

/// Outcome of one workbench tool call
///
/// Failures are values too: `is_error` is set and `content` carries
/// `{"error": .., "kind": ..}` so the host can show them to the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResult {
    pub name: String,
    pub is_error: bool,
    pub content: JsonValue,
}

impl ToolResult {
    pub fn success(name: impl Into<String>, content: JsonValue) -> Self {
        Self {
            name: name.into(),
            is_error: false,
            content,
        }
    }

    pub fn failure(name: impl Into<String>, error: &ExecutionError) -> Self {
        let mut content = json!({
            "error": error.to_string(),
            "kind": error.kind(),
        });
        if let ExecutionError::Data(DataError::UnknownColumn { available, .. }) = error {
            content["available_columns"] = json!(available);
        }
        Self {
            name: name.into(),
            is_error: true,
            content,
        }
    }

    /// Error message, if this is a failure
    pub fn error_message(&self) -> Option<&str> {
        if !self.is_error {
            return None;
        }
        self.content.get("error").and_then(JsonValue::as_str)
    }

    /// Content rendered as pretty JSON text for a chat context
    pub fn to_text(&self) -> String {
        serde_json::to_string_pretty(&self.content).unwrap_or_else(|_| self.content.to_string())
    }
}
