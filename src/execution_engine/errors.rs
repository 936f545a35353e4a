//! Execution engine errors

use crate::data_tools::{DataError, ErrorKind};

/// Tool dispatch errors
#[derive(Debug, thiserror::Error)]
pub enum ExecutionError {
    #[error("Unknown tool: '{0}'")]
    ToolNotFound(String),

    #[error("Missing required argument '{argument}' for tool '{tool}'")]
    MissingArgument { tool: String, argument: String },

    #[error("Invalid argument '{argument}' for tool '{tool}': {reason}")]
    InvalidArgument {
        tool: String,
        argument: String,
        reason: String,
    },

    #[error("Arguments for tool '{0}' must be a JSON object")]
    ArgumentsNotObject(String),

    #[error(transparent)]
    Data(#[from] DataError),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl ExecutionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ExecutionError::ToolNotFound(_) => ErrorKind::NotFound,
            ExecutionError::MissingArgument { .. }
            | ExecutionError::InvalidArgument { .. }
            | ExecutionError::ArgumentsNotObject(_) => ErrorKind::InvalidArgument,
            ExecutionError::Data(e) => e.kind(),
            ExecutionError::JsonError(_) => ErrorKind::Internal,
        }
    }
}
