//! # debrief-pipeline
//!
//! Sequential analysis orchestration and chat for debrief.
//!
//! This crate provides:
//! - The analysis pipeline: transcription plus four paced analysis steps
//! - Swappable inter-step pacing policies
//! - The chat service answering questions about stored meetings

pub mod chat;
pub mod orchestrator;
pub mod pacing;

// Re-export core types
pub use debrief_core::*;

pub use chat::ChatService;
pub use orchestrator::AnalysisPipeline;
pub use pacing::{FixedDelay, NoDelay, PacingPolicy, TokenBucket};
