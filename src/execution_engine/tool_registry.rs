//! Tool inventory and JSON-schema rendering
//!
//! Provides the metadata the host needs to offer the tools to a model:
//! - Name and description
//! - Argument specifications (rendered as a JSON-schema object)
//! - Usage and output examples

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value as JsonValue};

/// Argument type for tool parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArgumentType {
    /// String value
    String,
    /// Integer number
    Integer,
    /// JSON array
    Array,
    /// JSON object
    Object,
    /// Bare array, or an object wrapping one (a previous tool's output)
    ArrayOrObject,
}

impl ArgumentType {
    /// JSON-schema fragment constraining the value's type
    pub fn type_schema(&self) -> JsonValue {
        match self {
            ArgumentType::String => json!({ "type": "string" }),
            ArgumentType::Integer => json!({ "type": "integer" }),
            ArgumentType::Array => json!({ "type": "array" }),
            ArgumentType::Object => json!({ "type": "object", "additionalProperties": true }),
            ArgumentType::ArrayOrObject => json!({
                "oneOf": [{ "type": "array" }, { "type": "object" }]
            }),
        }
    }
}

/// Specification for a single tool argument
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolArgument {
    /// Argument name
    pub name: String,
    /// Argument type
    pub ty: ArgumentType,
    /// Whether argument is required
    pub required: bool,
    /// Brief description
    pub description: String,
    /// Default value (if optional)
    pub default: Option<String>,
}

impl ToolArgument {
    /// Create new argument specification
    pub fn new(
        name: impl Into<String>,
        ty: ArgumentType,
        required: bool,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            ty,
            required,
            description: description.into(),
            default: None,
        }
    }

    /// Add default value
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    fn schema(&self) -> JsonValue {
        let mut prop = self.ty.type_schema();
        prop["description"] = JsonValue::String(self.description.clone());
        if let Some(default) = &self.default {
            prop["default"] = default_value(self.ty, default);
        }
        prop
    }
}

fn default_value(ty: ArgumentType, raw: &str) -> JsonValue {
    match ty {
        ArgumentType::Integer => raw
            .parse::<f64>()
            .ok()
            .and_then(|n| serde_json::Number::from_f64(n).map(JsonValue::Number))
            .unwrap_or_else(|| JsonValue::String(raw.to_string())),
        _ => JsonValue::String(raw.to_string()),
    }
}

/// Usage and output examples for a tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolExamples {
    /// Example tool call(s)
    pub usage: Vec<String>,
    /// Example output (JSON string or description)
    pub output: String,
}

impl ToolExamples {
    /// Create new examples
    pub fn new(usage: impl IntoIterator<Item = impl Into<String>>, output: impl Into<String>) -> Self {
        Self {
            usage: usage.into_iter().map(|s| s.into()).collect(),
            output: output.into(),
        }
    }

    /// Single usage example
    pub fn single(usage: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            usage: vec![usage.into()],
            output: output.into(),
        }
    }
}

/// Complete metadata for a tool
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolMetadata {
    /// Unique tool identifier
    pub name: String,
    /// Description shown to the model
    pub description: String,
    /// Argument specifications
    pub arguments: Vec<ToolArgument>,
    /// Usage and output examples
    pub examples: ToolExamples,
}

impl ToolMetadata {
    /// Create new tool metadata
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            arguments: Vec::new(),
            examples: ToolExamples::single("", ""),
        }
    }

    /// Set argument specifications
    pub fn with_arguments(mut self, args: Vec<ToolArgument>) -> Self {
        self.arguments = args;
        self
    }

    /// Set examples
    pub fn with_examples(mut self, examples: ToolExamples) -> Self {
        self.examples = examples;
        self
    }

    /// Names of required arguments
    pub fn required_arguments(&self) -> impl Iterator<Item = &str> {
        self.arguments
            .iter()
            .filter(|a| a.required)
            .map(|a| a.name.as_str())
    }

    /// JSON-schema object describing the arguments
    pub fn parameters_schema(&self) -> JsonValue {
        let properties: Map<String, JsonValue> = self
            .arguments
            .iter()
            .map(|a| (a.name.clone(), a.schema()))
            .collect();
        let required: Vec<&str> = self.required_arguments().collect();
        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }

    /// Description followed by the usage and output examples
    pub fn full_description(&self) -> String {
        let mut text = self.description.clone();
        let usages: Vec<&str> = self
            .examples
            .usage
            .iter()
            .map(String::as_str)
            .filter(|u| !u.is_empty())
            .collect();
        if !usages.is_empty() {
            text.push('\n');
            for usage in usages {
                text.push_str("\nExample: ");
                text.push_str(usage);
            }
        }
        if !self.examples.output.is_empty() {
            text.push_str("\nReturns: ");
            text.push_str(&self.examples.output);
        }
        text
    }

    /// Function-calling tool definition (`{name, description, parameters}`)
    pub fn to_schema(&self) -> JsonValue {
        json!({
            "name": self.name,
            "description": self.full_description(),
            "parameters": self.parameters_schema(),
        })
    }
}

/// Tool registry with complete inventory, in presentation order
pub struct ToolRegistry {
    tools: Vec<ToolMetadata>,
}

impl ToolRegistry {
    /// Create new registry with default tools
    pub fn new() -> Self {
        Self {
            tools: super::tool_catalog::default_tools(),
        }
    }

    /// Create empty registry (for testing)
    #[cfg(test)]
    pub fn empty() -> Self {
        Self { tools: Vec::new() }
    }

    /// Get metadata for a tool
    pub fn get(&self, name: &str) -> Option<&ToolMetadata> {
        self.tools.iter().find(|t| t.name == name)
    }

    /// Check if a tool exists
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Get all tools
    pub fn all(&self) -> impl Iterator<Item = &ToolMetadata> {
        self.tools.iter()
    }

    /// Get tool count
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if registry is empty
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Get tool names list
    pub fn tool_names(&self) -> Vec<String> {
        self.tools.iter().map(|t| t.name.clone()).collect()
    }

    /// Tool definitions for every registered tool
    pub fn schemas(&self) -> Vec<JsonValue> {
        self.tools.iter().map(ToolMetadata::to_schema).collect()
    }

    /// Register a custom tool (for testing/extensions)
    #[cfg(test)]
    pub fn register(&mut self, tool: ToolMetadata) {
        self.tools.push(tool);
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_has_default_tools() {
        let registry = ToolRegistry::new();
        assert_eq!(
            registry.tool_names(),
            vec![
                "list_sources",
                "query",
                "build_timeline",
                "compare_costs",
                "cost_analysis",
                "compose_report"
            ]
        );
    }

    #[test]
    fn test_get_tool_metadata() {
        let registry = ToolRegistry::new();
        let meta = registry.get("query").unwrap();
        assert_eq!(meta.name, "query");
        let required: Vec<_> = meta.required_arguments().collect();
        assert_eq!(required, vec!["table"]);
        assert!(registry.get("bash_exec").is_none());
    }

    #[test]
    fn test_parameters_schema() {
        let registry = ToolRegistry::new();
        let schema = registry.get("query").unwrap().to_schema();
        assert_eq!(schema["name"], "query");
        assert_eq!(schema["parameters"]["type"], "object");
        assert_eq!(schema["parameters"]["properties"]["filters"]["type"], "object");
        assert_eq!(
            schema["parameters"]["properties"]["filters"]["additionalProperties"],
            true
        );
        assert_eq!(schema["parameters"]["properties"]["limit"]["type"], "integer");
        assert_eq!(schema["parameters"]["required"], json!(["table"]));
    }

    #[test]
    fn test_schema_description_carries_examples() {
        let registry = ToolRegistry::new();
        let meta = registry.get("query").unwrap();
        let description = meta.to_schema()["description"].as_str().unwrap().to_string();

        assert!(description.starts_with(&meta.description));
        for usage in &meta.examples.usage {
            assert!(description.contains(&format!("Example: {}", usage)));
        }
        assert!(description.contains(&format!("Returns: {}", meta.examples.output)));
    }

    #[test]
    fn test_tool_without_examples_keeps_plain_description() {
        let meta = ToolMetadata::new("echo", "Echo input");
        assert_eq!(meta.to_schema()["description"], "Echo input");
    }

    #[test]
    fn test_report_inputs_accept_array_or_wrapped_object() {
        let registry = ToolRegistry::new();
        let schema = registry.get("compose_report").unwrap().parameters_schema();
        for field in ["timeline", "cost_ranking"] {
            let prop = &schema["properties"][field];
            assert_eq!(
                prop["oneOf"],
                json!([{ "type": "array" }, { "type": "object" }]),
                "{}",
                field
            );
            assert!(prop.get("type").is_none());
            assert!(prop["description"].is_string());
        }
    }

    #[test]
    fn test_no_argument_tool_schema() {
        let registry = ToolRegistry::new();
        let schema = registry.get("list_sources").unwrap().parameters_schema();
        assert_eq!(schema["properties"], json!({}));
        assert_eq!(schema["required"], json!([]));
    }

    #[test]
    fn test_register_custom() {
        let mut registry = ToolRegistry::empty();
        assert!(registry.is_empty());
        registry.register(
            ToolMetadata::new("echo", "Echo input").with_arguments(vec![ToolArgument::new(
                "text",
                ArgumentType::String,
                true,
                "Text",
            )
            .with_default("hi")]),
        );
        assert!(registry.contains("echo"));
        let schema = registry.get("echo").unwrap().parameters_schema();
        assert_eq!(schema["properties"]["text"]["default"], "hi");
    }
}
