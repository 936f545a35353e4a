//! LLM integration
//!
//! Chat-completion adapters, fixed prompts, and the transcript critique
//! built on them.

pub mod adapters;
pub mod contracts;
pub mod transcript_analysis;

pub use adapters::{create_adapter, Adapter, AdapterError, LlmAdapter, LlmMessage, LlmRole};
pub use transcript_analysis::{
    analyze_transcript, extract_json_object, AnalysisError, AnalysisRequest, TranscriptAnalysis,
};
