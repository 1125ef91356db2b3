//! Meeting-aware chat HTTP handler.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{ApiError, AppState};

/// Request body for the chat endpoint.
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// User question (required, non-empty).
    pub message: Option<String>,
    /// Meeting to ground the answer in (optional).
    #[serde(rename = "meetingId")]
    pub meeting_id: Option<String>,
}

/// Response from the chat endpoint.
#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub success: bool,
    /// Raw model reply, returned without post-processing.
    pub response: String,
}

/// Answer a question, optionally grounded in a stored meeting.
///
/// When `meetingId` resolves to a stored meeting its transcription, summary,
/// and tasks are prepended as context. An unknown or malformed id simply
/// omits the context; the question is still answered.
///
/// # Returns
/// - 200 OK with the model's reply
/// - 400 Bad Request if `message` is missing or empty
/// - 500 Internal Server Error if the model call fails
#[utoipa::path(post, path = "/api/chat", tag = "Chat",
    responses((status = 200, description = "Model reply")))]
pub async fn chat_message(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let message = req
        .message
        .as_deref()
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Message is required".to_string()))?;

    // A malformed id gets the same treatment as an unknown one: no context
    // block, not an error.
    let meeting_id = req
        .meeting_id
        .as_deref()
        .and_then(|s| Uuid::parse_str(s).ok());

    let response = state
        .chat
        .answer(message, meeting_id)
        .await
        .map_err(|e| ApiError::upstream("Error processing chat message", e))?;

    Ok(Json(ChatResponse {
        success: true,
        response,
    }))
}
