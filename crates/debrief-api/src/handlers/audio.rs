//! Audio processing HTTP handler.
//!
//! Accepts a multipart audio upload, validates it, stages it on disk, and
//! drives it through the full transcription-and-analysis pipeline.

use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tempfile::NamedTempFile;
use uuid::Uuid;

use crate::{ApiError, AppState};
use debrief_core::models::{FactCheck, Improvements, Summary, TaskList};
use debrief_core::upload::{sanitize_filename, validate_upload};
use debrief_core::{defaults, Error};

/// Response from audio processing.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessAudioResponse {
    /// Always true on the success path.
    pub success: bool,
    /// Id of the stored meeting.
    pub meeting_id: Uuid,
    /// Full transcription text.
    pub transcription: String,
    pub summary: Summary,
    pub tasks: TaskList,
    pub improvements: Improvements,
    pub fact_check: FactCheck,
    /// Sanitized upload filename.
    pub filename: String,
    /// Size of the uploaded audio in bytes.
    pub filesize: usize,
    /// When processing completed.
    pub timestamp: DateTime<Utc>,
}

/// Process an uploaded meeting recording end to end.
///
/// Accepts multipart/form-data with an audio file, transcribes it, runs the
/// four analyses, stores the meeting, and returns the complete record.
///
/// # Multipart Fields
/// - `audio`: Audio file (required)
///
/// # Returns
/// - 200 OK with the stored meeting: transcription plus all four analyses
/// - 400 Bad Request if the file is missing, empty, oversized, or not an allowed audio type
/// - 500 Internal Server Error if transcription or the model provider fails
#[utoipa::path(post, path = "/api/process-audio", tag = "Audio",
    responses((status = 200, description = "Stored meeting with analyses")))]
pub async fn process_audio(
    State(state): State<AppState>,
    mut multipart: axum::extract::Multipart,
) -> Result<Json<ProcessAudioResponse>, ApiError> {
    let mut file_data: Option<Vec<u8>> = None;
    let mut content_type: Option<String> = None;
    let mut original_name: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Multipart error: {}", e)))?
    {
        let field_name = field.name().map(|n| n.to_string());
        match field_name.as_deref() {
            Some("audio") => {
                content_type = field.content_type().map(|c| c.to_string());
                original_name = field.file_name().map(|n| n.to_string());
                file_data = Some(
                    field
                        .bytes()
                        .await
                        .map_err(|e| ApiError::BadRequest(format!("Read error: {}", e)))?
                        .to_vec(),
                );
            }
            _ => {} // ignore unknown fields
        }
    }

    let audio_bytes =
        file_data.ok_or_else(|| ApiError::BadRequest("No audio file uploaded".to_string()))?;

    let mime_type = content_type
        .as_deref()
        .unwrap_or("application/octet-stream");
    let filename = sanitize_filename(original_name.as_deref().unwrap_or("recording"));

    let verdict = validate_upload(
        &filename,
        mime_type,
        &audio_bytes,
        defaults::MAX_UPLOAD_SIZE_BYTES as u64,
    );
    if !verdict.allowed {
        let reason = verdict
            .block_reason
            .unwrap_or_else(|| "Upload rejected".to_string());
        return Err(ApiError::BadRequest(reason));
    }

    let audio = spool_upload(&audio_bytes)
        .await
        .map_err(|e| ApiError::upstream("Error processing audio file", Error::Io(e)))?;

    let meeting = state
        .pipeline
        .process_audio(&audio, mime_type, &filename)
        .await
        .map_err(|e| ApiError::upstream("Error processing audio file", e))?;

    Ok(Json(ProcessAudioResponse {
        success: true,
        meeting_id: meeting.id,
        transcription: meeting.transcription,
        summary: meeting.summary,
        tasks: meeting.tasks,
        improvements: meeting.improvements,
        fact_check: meeting.fact_check,
        filename: meeting.filename,
        filesize: audio.len(),
        timestamp: meeting.timestamp,
    }))
}

/// Stage the upload on disk while it is forwarded to the pipeline.
///
/// The `NamedTempFile` drop guard removes the file on every exit path,
/// success and failure alike.
async fn spool_upload(data: &[u8]) -> std::io::Result<Vec<u8>> {
    let spool = NamedTempFile::new()?;
    tokio::fs::write(spool.path(), data).await?;
    tokio::fs::read(spool.path()).await
}
