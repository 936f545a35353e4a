//! Transcript critique
//!
//! Sends an agent transcript, its final answer and its score to a chat model
//! and pulls a `{reason, suggestion}` object out of the reply.

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use tracing::{debug, warn};

use crate::data_tools::ErrorKind;
use crate::llm::adapters::{AdapterError, LlmAdapter, LlmMessage};
use crate::llm::contracts::{transcript_system_prompt, transcript_user_prompt};

/// Body of `POST /api/analyze-transcript`
///
/// `transcript` may be plain text or any JSON (e.g. a message list), and
/// `score` a number or a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub transcript: JsonValue,
    #[serde(default)]
    pub final_answer: JsonValue,
    #[serde(default)]
    pub score: JsonValue,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptAnalysis {
    pub reason: String,
    pub suggestion: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("LLM request failed: {0}")]
    Upstream(#[from] AdapterError),

    #[error("No JSON object found in model reply")]
    NoJsonObject,

    #[error("Model reply is not a valid analysis: {0}")]
    InvalidJson(String),

    #[error("Analysis task failed: {0}")]
    Task(String),
}

impl AnalysisError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AnalysisError::Task(_) => ErrorKind::Internal,
            _ => ErrorKind::UpstreamFailure,
        }
    }
}

/// The span from the first `{` to the last `}` of `reply`
pub fn extract_json_object(reply: &str) -> Option<&str> {
    let re = Regex::new(r"(?s)\{.*\}").ok()?;
    re.find(reply).map(|m| m.as_str())
}

/// Parse a model reply into an analysis
pub fn parse_analysis(reply: &str) -> Result<TranscriptAnalysis, AnalysisError> {
    let span = extract_json_object(reply).ok_or(AnalysisError::NoJsonObject)?;
    serde_json::from_str(span).map_err(|e| AnalysisError::InvalidJson(e.to_string()))
}

fn render(value: &JsonValue) -> String {
    match value {
        JsonValue::Null => String::new(),
        JsonValue::String(s) => s.clone(),
        JsonValue::Number(n) => n.to_string(),
        other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
    }
}

/// Prompt messages for a request
pub fn build_messages(request: &AnalysisRequest) -> Vec<LlmMessage> {
    vec![
        LlmMessage::system(transcript_system_prompt()),
        LlmMessage::user(transcript_user_prompt(
            &render(&request.transcript),
            &render(&request.final_answer),
            &render(&request.score),
        )),
    ]
}

/// Run one critique; blocking
pub fn analyze_transcript<A: LlmAdapter + ?Sized>(
    adapter: &A,
    request: &AnalysisRequest,
) -> Result<TranscriptAnalysis, AnalysisError> {
    let messages = build_messages(request);
    debug!(
        "Requesting transcript analysis from {} ({} chars of prompt)",
        adapter.provider_name(),
        messages.iter().map(|m| m.content.len()).sum::<usize>()
    );

    let reply = adapter.complete(&messages)?;
    parse_analysis(&reply).map_err(|e| {
        warn!("Unusable analysis reply: {}", e);
        e
    })
}
