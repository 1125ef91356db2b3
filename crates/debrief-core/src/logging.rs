//! Structured logging schema and field name constants for debrief.
//!
//! All crates use these constants for consistent structured logging fields.
//! This ensures log aggregation tools (Loki, Elasticsearch) can query by
//! standardized field names across every subsystem.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Degraded service, requires operator attention |
//! | WARN  | Recoverable issue, automatic fallback applied |
//! | INFO  | Lifecycle events (startup, shutdown), operation completions |
//! | DEBUG | Decision points, intermediate values, config choices |
//! | TRACE | Per-item iteration, high-volume data |

// ─── Identity fields ───────────────────────────────────────────────────────

/// Correlation ID propagated across request → pipeline → model calls.
/// Format: UUIDv7 (time-ordered).
pub const REQUEST_ID: &str = "request_id";

/// Subsystem originating the log event.
/// Values: "api", "inference", "pipeline"
pub const SUBSYSTEM: &str = "subsystem";

/// Component within a subsystem.
/// Examples: "gemini", "orchestrator", "chat", "store"
pub const COMPONENT: &str = "component";

/// Logical operation name.
/// Examples: "invoke", "process_audio", "answer"
pub const OPERATION: &str = "op";

// ─── Entity fields ─────────────────────────────────────────────────────────

/// Meeting UUID being operated on.
pub const MEETING_ID: &str = "meeting_id";

/// Analysis step producing the log event.
/// Values: "summary", "tasks", "improvements", "fact_check"
pub const ANALYSIS_KIND: &str = "analysis_kind";

/// Original filename of an uploaded recording.
pub const FILENAME: &str = "filename";

// ─── Measurement fields ────────────────────────────────────────────────────

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Byte length of a prompt sent to the model.
pub const PROMPT_LEN: &str = "prompt_len";

/// Byte length of a model response.
pub const RESPONSE_LEN: &str = "response_len";

/// Byte size of an uploaded file.
pub const FILE_SIZE: &str = "file_size";

// ─── Inference fields ──────────────────────────────────────────────────────

/// Model name used for a request.
pub const MODEL: &str = "model";

// ─── Outcome fields ────────────────────────────────────────────────────────

/// Boolean success/failure indicator.
pub const SUCCESS: &str = "success";

/// Error message when an operation fails.
pub const ERROR_MSG: &str = "error";

/// Reason a fallback object was substituted for an analysis.
pub const FALLBACK_REASON: &str = "reason";

/// Slow operation threshold exceeded.
pub const SLOW: &str = "slow";
