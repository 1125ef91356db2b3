//! # debrief-core
//!
//! Core types, defaults, and abstractions for the debrief meeting analyzer.
//!
//! This crate provides the shared data model, the in-memory meeting store,
//! and the upload validation that other debrief crates depend on.

pub mod defaults;
pub mod error;
pub mod logging;
pub mod models;
pub mod store;
pub mod upload;

// Re-export commonly used types at crate root
pub use error::{Error, Result};
pub use models::*;
pub use store::MeetingStore;
pub use upload::{
    detect_content_type, is_allowed_audio_type, sanitize_filename, validate_upload,
    ValidationResult,
};
