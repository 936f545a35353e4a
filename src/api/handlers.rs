//! API Handlers Module
//!
//! This module contains the request handlers for the API system.

use std::sync::Arc;

use axum::{
    body::Bytes,
    debug_handler,
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::{json, Value};

use crate::execution_engine::{ToolResult, Workbench};
use crate::llm::{analyze_transcript, Adapter, AnalysisError, AnalysisRequest, LlmAdapter, TranscriptAnalysis};

/// Represents the state of the API server
pub struct ApiState {
    /// Tool surface over the data directory
    pub workbench: Arc<Workbench>,
    /// Chat-completion adapter for transcript analysis
    pub adapter: Arc<Adapter>,
}

/// Error body returned by every failing route
#[derive(Debug, Serialize)]
pub struct ApiError {
    #[serde(skip)]
    status: StatusCode,
    pub error: String,
    pub details: String,
}

impl ApiError {
    pub fn bad_request(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error: error.into(),
            details: details.into(),
        }
    }

    pub fn internal(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            error: error.into(),
            details: details.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

impl From<AnalysisError> for ApiError {
    fn from(err: AnalysisError) -> Self {
        ApiError::internal("Failed to analyze transcript", err.to_string())
    }
}

/// Health check endpoint
#[debug_handler]
pub async fn health_check(State(state): State<Arc<ApiState>>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "pharma-investigator",
        "version": env!("CARGO_PKG_VERSION"),
        "data_dir": state.workbench.data_dir().display().to_string(),
        "llm_provider": state.adapter.provider_name(),
    }))
}

/// Critique an agent transcript with the configured model
///
/// Every failure, including a malformed body, is a 500 with `{error, details}`.
#[debug_handler]
pub async fn analyze_transcript_handler(
    State(state): State<Arc<ApiState>>,
    payload: Result<Json<AnalysisRequest>, JsonRejection>,
) -> Result<Json<TranscriptAnalysis>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::error!("Rejected analysis request: {}", rejection.body_text());
        ApiError::internal("Invalid request body", rejection.body_text())
    })?;
    tracing::debug!("Analyzing transcript via {}", state.adapter.provider_name());

    let adapter = state.adapter.clone();
    let outcome = tokio::task::spawn_blocking(move || analyze_transcript(adapter.as_ref(), &request))
        .await
        .map_err(|e| AnalysisError::Task(e.to_string()))?;

    match outcome {
        Ok(analysis) => Ok(Json(analysis)),
        Err(e) => {
            tracing::error!("Transcript analysis failed: {}", e);
            Err(e.into())
        }
    }
}

/// List tool definitions
#[debug_handler]
pub async fn list_tools(State(state): State<Arc<ApiState>>) -> Json<Value> {
    tracing::debug!("Listing workbench tools");
    Json(json!({ "tools": state.workbench.list_tools() }))
}

/// Call one workbench tool; the body is the argument object
///
/// An empty body means no arguments and a body that is not JSON is a 400.
/// Tool failures are still 200 responses with `is_error` set.
#[debug_handler]
pub async fn call_tool(
    State(state): State<Arc<ApiState>>,
    Path(name): Path<String>,
    body: Bytes,
) -> Result<Json<ToolResult>, ApiError> {
    tracing::debug!("Calling tool over HTTP: {}", name);

    let arguments = tool_arguments(&body)?;
    let workbench = state.workbench.clone();
    let result = tokio::task::spawn_blocking(move || workbench.call_tool(&name, arguments.as_ref()))
        .await
        .map_err(|e| {
            tracing::error!("Tool task failed: {}", e);
            ApiError::internal("Tool task failed", e.to_string())
        })?;

    Ok(Json(result))
}

fn tool_arguments(body: &[u8]) -> Result<Option<Value>, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice(body).map(Some).map_err(|e| {
        tracing::warn!("Rejected tool arguments: {}", e);
        ApiError::bad_request("Invalid request body", e.to_string())
    })
}
