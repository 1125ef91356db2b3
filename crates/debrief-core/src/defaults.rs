//! Centralized default constants for the debrief system.
//!
//! **This module is the single source of truth** for all shared default values.
//! All crates should reference these constants instead of defining their own
//! magic numbers.
//!
//! Organized by domain area. When adding new constants, place them in the
//! appropriate section and document the rationale for the chosen value.

// =============================================================================
// ANALYSIS PIPELINE
// =============================================================================

/// Wait between successive analysis calls in milliseconds.
///
/// The provider meters requests; spacing the four analysis calls keeps one
/// upload comfortably inside the free-tier request rate. No wait is inserted
/// after the final call.
pub const ANALYSIS_STEP_DELAY_MS: u64 = 1000;

/// Environment variable overriding [`ANALYSIS_STEP_DELAY_MS`].
pub const ENV_ANALYSIS_STEP_DELAY_MS: &str = "ANALYSIS_STEP_DELAY_MS";

/// Environment variable selecting the pacing policy ("fixed", "none",
/// "bucket").
pub const ENV_PACING_POLICY: &str = "PACING_POLICY";

// =============================================================================
// SNIPPET
// =============================================================================

/// Summary preview length in characters for meeting listings.
pub const SNIPPET_LENGTH: usize = 200;

// =============================================================================
// SERVER
// =============================================================================

/// Default HTTP server port.
pub const SERVER_PORT: u16 = 3000;

/// Default rate limit: max requests per period.
pub const RATE_LIMIT_REQUESTS: u64 = 100;

/// Default rate limit: period in seconds.
pub const RATE_LIMIT_PERIOD_SECS: u64 = 60;

/// Default CORS max-age in seconds (1 hour).
pub const CORS_MAX_AGE_SECS: u64 = 3600;

/// Maximum request body size in bytes: the upload cap plus headroom for
/// multipart framing and the other form fields.
pub const MAX_BODY_SIZE_BYTES: usize = MAX_UPLOAD_SIZE_BYTES + 2 * 1024 * 1024;

// =============================================================================
// MODEL GATEWAY
// =============================================================================

/// Environment variable holding the Gemini API key.
pub const ENV_GEMINI_API_KEY: &str = "GEMINI_API_KEY";

/// Environment variable overriding the Gemini model name.
pub const ENV_GEMINI_MODEL: &str = "GEMINI_MODEL";

/// Environment variable overriding the Gemini API base URL.
pub const ENV_GEMINI_BASE_URL: &str = "GEMINI_BASE_URL";

/// Default Gemini API base URL.
pub const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default Gemini model for transcription and analysis.
pub const GEMINI_MODEL: &str = "gemini-1.5-flash";

/// Timeout for generation requests in seconds.
pub const GEN_TIMEOUT_SECS: u64 = 120;

/// Generation calls slower than this log a warning (milliseconds).
pub const SLOW_GENERATION_MS: u64 = 30_000;

// =============================================================================
// FILE SAFETY
// =============================================================================

/// Maximum audio upload size in bytes (50 MiB).
///
/// Enforced at two layers: the request body limit on the router and the
/// per-field check in `validate_upload`.
pub const MAX_UPLOAD_SIZE_BYTES: usize = 50 * 1024 * 1024;

/// Maximum filename length (ext4/NTFS compatible).
pub const FILENAME_MAX_LENGTH: usize = 255;
