//! Execution engine: tool registry and dispatch for the host agent
//!
//! The host sees a flat list of tools; each call is decoded, routed to the
//! data tools and wrapped into a [`ToolResult`].

mod errors;
mod result;
mod tool_catalog;
mod tool_mapper;
mod tool_registry;
mod workbench;

pub use errors::ExecutionError;
pub use result::ToolResult;
pub use tool_catalog::default_tools;
pub use tool_mapper::{invoke_tool, ToolContext};
pub use tool_registry::{ArgumentType, ToolArgument, ToolExamples, ToolMetadata, ToolRegistry};
pub use workbench::Workbench;
