//! CLI module
//!
//! Provides:
//! - Argument parsing (clap derive)
//! - data root resolution (flag → env → config → default)
//! - Logging setup
//! - Subcommand dispatch

pub mod args;
pub mod data_root;
pub mod dispatch;
pub mod logging;

// Re-exports
pub use args::{Cli, Command};
pub use data_root::{resolve_data_root, verify_data_root};
pub use dispatch::{run_cli, ExitCode};
pub use logging::init_logging;

/// CLI errors
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("Data directory error: {0}")]
    DataRoot(String),

    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    #[error("Tool '{tool}' failed: {message}")]
    Tool { tool: String, message: String },

    #[error("Server error: {0}")]
    Server(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Exit codes (deterministic)
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
pub const EXIT_DATA_ERROR: i32 = 2;

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, Error>;
