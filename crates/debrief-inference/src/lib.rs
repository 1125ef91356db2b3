//! # debrief-inference
//!
//! Model gateway abstraction for debrief.
//!
//! This crate provides:
//! - Pluggable gateway trait for multimodal prompts
//! - Gemini `generateContent` implementation (production)
//! - Prompt builders for transcription, the four analyses, and chat
//! - Defensive response parsing with typed fallback shapes
//!
//! # Feature Flags
//!
//! - `mock`: Enable the scripted mock gateway (for dependent-crate tests)

pub mod gateway;
pub mod gemini;
pub mod parse;
pub mod prompts;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export core types
pub use debrief_core::*;

pub use gateway::{ModelGateway, PromptPart};
pub use gemini::{GeminiBackend, GenerationConfig};
pub use parse::{parse_analysis, strip_code_fences, ParseOutcome};
pub use prompts::{
    chat_prompt, fact_check_prompt, improvements_prompt, meeting_context, summary_prompt,
    tasks_prompt, transcription_prompt,
};

#[cfg(any(test, feature = "mock"))]
pub use mock::{MockCall, MockGateway, MockReply};
