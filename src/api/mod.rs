//! HTTP API
//!
//! Transcript analysis, the workbench tools, and a health check.

pub mod handlers;
pub mod server;

pub use handlers::{ApiError, ApiState};
pub use server::{router, ApiServer};
