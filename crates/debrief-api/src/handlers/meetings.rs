//! Meeting listing and retrieval HTTP handlers.

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use crate::{ApiError, AppState};
use debrief_core::models::{Meeting, MeetingOverview};
use debrief_core::Error;

/// Response from the meeting listing endpoint.
#[derive(Debug, Serialize)]
pub struct ListMeetingsResponse {
    pub success: bool,
    /// Overviews with truncated summaries, most recent first.
    pub meetings: Vec<MeetingOverview>,
}

/// Response from the single-meeting endpoint.
#[derive(Debug, Serialize)]
pub struct GetMeetingResponse {
    pub success: bool,
    pub meeting: Meeting,
}

/// List stored meetings, most recent first.
#[utoipa::path(get, path = "/api/meetings", tag = "Meetings",
    responses((status = 200, description = "Meeting overviews, most recent first")))]
pub async fn list_meetings(State(state): State<AppState>) -> Json<ListMeetingsResponse> {
    let meetings = state.store.list().await;
    Json(ListMeetingsResponse {
        success: true,
        meetings,
    })
}

/// Fetch one meeting with its full analyses.
///
/// The id arrives as a raw path segment; anything that does not parse as a
/// UUID is reported as not found rather than as a malformed request.
#[utoipa::path(get, path = "/api/meeting/{id}", tag = "Meetings",
    responses(
        (status = 200, description = "Full meeting record"),
        (status = 404, description = "Unknown meeting")
    ))]
pub async fn get_meeting(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<GetMeetingResponse>, ApiError> {
    let id =
        Uuid::parse_str(&id).map_err(|_| ApiError::NotFound("Meeting not found".to_string()))?;

    let meeting = state.store.get(id).await.ok_or(Error::MeetingNotFound(id))?;

    Ok(Json(GetMeetingResponse {
        success: true,
        meeting,
    }))
}
