//! debrief-api - HTTP API server for debrief
//!
//! Accepts meeting audio uploads, drives them through the analysis pipeline,
//! and serves the stored meetings plus a meeting-aware chat endpoint.

mod handlers;

use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, State},
    http::{header, HeaderValue, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use governor::RateLimiter;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use uuid::Uuid;

use debrief_core::{defaults, MeetingStore};
use debrief_inference::ModelGateway;
use debrief_pipeline::{AnalysisPipeline, ChatService};

use handlers::{chat_message, get_meeting, list_meetings, process_audio};

// =============================================================================
// REQUEST ID (UUIDv7)
// =============================================================================

/// Generates time-ordered UUIDv7 request correlation IDs.
///
/// UUIDv7 embeds a Unix timestamp, so IDs sort chronologically — useful for
/// log correlation, distributed tracing, and debugging production incidents.
#[derive(Clone, Default)]
pub struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &axum::http::Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}

// =============================================================================
// APPLICATION STATE
// =============================================================================

/// Global rate limiter type (direct quota, no keyed bucketing for a
/// single-tenant deployment).
pub type GlobalRateLimiter = RateLimiter<
    governor::state::NotKeyed,
    governor::state::InMemoryState,
    governor::clock::DefaultClock,
>;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Shared meeting store (also owned by the pipeline and chat service).
    pub store: Arc<MeetingStore>,
    /// Model gateway, consulted directly only by the health probe.
    pub gateway: Arc<dyn ModelGateway>,
    /// Audio-to-analyses pipeline.
    pub pipeline: Arc<AnalysisPipeline>,
    /// Meeting-aware chat service.
    pub chat: Arc<ChatService>,
    /// Global rate limiter (None if rate limiting is disabled).
    pub rate_limiter: Option<Arc<GlobalRateLimiter>>,
}

/// OpenAPI documentation (utoipa metadata).
///
/// The comprehensive OpenAPI spec is maintained in `openapi.yaml` and served
/// at `/openapi.yaml`.
#[allow(dead_code)]
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Debrief API",
        version = "0.3.0",
        description = "Meeting audio analysis: transcription, structured summaries, task extraction, and grounded chat"
    ),
    servers((url = "http://localhost:3000")),
    tags(
        (name = "Audio", description = "Audio upload and processing"),
        (name = "Meetings", description = "Stored meeting records"),
        (name = "Chat", description = "Chat grounded in meeting context"),
        (name = "System", description = "Health checks and system info")
    )
)]
struct ApiDoc;

/// Serve OpenAPI YAML spec
async fn openapi_yaml() -> impl IntoResponse {
    const SPEC: &str = include_str!("openapi.yaml");
    ([(header::CONTENT_TYPE, "application/yaml")], SPEC)
}

// =============================================================================
// CORS CONFIGURATION HELPER
// =============================================================================

/// Parse allowed origins from comma-separated environment variable.
///
/// Enforces strict origin whitelisting for CORS instead of the permissive
/// `.allow_origin(Any)` configuration.
///
/// # Environment Variable
/// `ALLOWED_ORIGINS` - Comma-separated list of allowed origins
///
/// # Default Origins
/// If not set or empty:
/// - http://localhost:3000
/// - http://localhost:5173
fn parse_allowed_origins() -> Vec<HeaderValue> {
    let origins_str = std::env::var("ALLOWED_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:3000,http://localhost:5173".to_string());

    if origins_str.trim().is_empty() {
        // Default origins
        return vec![
            HeaderValue::from_static("http://localhost:3000"),
            HeaderValue::from_static("http://localhost:5173"),
        ];
    }

    origins_str
        .split(',')
        .filter_map(|s| {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            match trimmed.parse::<HeaderValue>() {
                Ok(v) => Some(v),
                Err(e) => {
                    tracing::warn!("Invalid CORS origin '{}': {}", trimmed, e);
                    None
                }
            }
        })
        .collect()
}

// =============================================================================
// ROUTER
// =============================================================================

/// Build the application router with the full middleware stack.
pub fn router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/api/health", get(health_check))
        // OpenAPI contract
        .route("/openapi.yaml", get(openapi_yaml))
        // Audio processing
        .route("/api/process-audio", post(process_audio))
        // Meeting-aware chat
        .route("/api/chat", post(chat_message))
        // Stored meetings
        .route("/api/meetings", get(list_meetings))
        .route("/api/meeting/:id", get(get_meeting))
        // Middleware
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
        .layer({
            let allowed_origins = parse_allowed_origins();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(allowed_origins))
                .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
                .allow_credentials(true)
                .max_age(std::time::Duration::from_secs(defaults::CORS_MAX_AGE_SECS))
        })
        // Uploads up to the audio ceiling plus multipart framing overhead.
        // DefaultBodyLimit raises axum's extractor cap; RequestBodyLimitLayer
        // hard-stops anything larger at the transport level.
        .layer(DefaultBodyLimit::max(defaults::MAX_BODY_SIZE_BYTES))
        .layer(RequestBodyLimitLayer::new(defaults::MAX_BODY_SIZE_BYTES))
        .with_state(state)
}

// =============================================================================
// RATE LIMITING MIDDLEWARE
// =============================================================================

async fn rate_limit_middleware(
    State(state): State<AppState>,
    request: axum::extract::Request,
    next: axum::middleware::Next,
) -> Result<impl IntoResponse, (StatusCode, Json<serde_json::Value>)> {
    // If rate limiting is disabled, pass through
    if let Some(limiter) = &state.rate_limiter {
        // Check rate limit
        if limiter.check().is_err() {
            tracing::warn!("Rate limit exceeded");
            return Err((
                StatusCode::TOO_MANY_REQUESTS,
                Json(serde_json::json!({
                    "error": "rate_limit_exceeded",
                    "error_description": "Too many requests. Please wait before retrying."
                })),
            ));
        }
    }
    Ok(next.run(request).await)
}

// =============================================================================
// HEALTH CHECK
// =============================================================================

/// Static capability probe: no upstream call, no side effects.
#[utoipa::path(get, path = "/api/health", tag = "System",
    responses((status = 200, description = "Service health and capabilities")))]
async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "gemini_configured": state.gateway.is_configured(),
        "version": env!("CARGO_PKG_VERSION"),
        "features": ["transcription", "summary", "tasks", "improvements", "fact-check", "chat"],
    }))
}

// =============================================================================
// ERROR HANDLING
// =============================================================================

#[derive(Debug)]
enum ApiError {
    BadRequest(String),
    NotFound(String),
    /// Pipeline or provider failure, surfaced with the endpoint's stable
    /// error label and the underlying message as `details`.
    Upstream { message: String, details: String },
}

impl ApiError {
    fn upstream(message: &str, err: debrief_core::Error) -> Self {
        ApiError::Upstream {
            message: message.to_string(),
            details: err.to_string(),
        }
    }
}

impl From<debrief_core::Error> for ApiError {
    fn from(err: debrief_core::Error) -> Self {
        match &err {
            debrief_core::Error::InvalidUpload(msg) => ApiError::BadRequest(msg.clone()),
            debrief_core::Error::InvalidInput(msg) => ApiError::BadRequest(msg.clone()),
            debrief_core::Error::NotFound(msg) => ApiError::NotFound(msg.clone()),
            debrief_core::Error::MeetingNotFound(_) => {
                ApiError::NotFound("Meeting not found".to_string())
            }
            _ => ApiError::Upstream {
                message: "Internal server error".to_string(),
                details: err.to_string(),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, body) = match self {
            ApiError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, serde_json::json!({ "error": msg }))
            }
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, serde_json::json!({ "error": msg })),
            ApiError::Upstream { message, details } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                serde_json::json!({ "error": message, "details": details }),
            ),
        };

        (status, Json(body)).into_response()
    }
}
