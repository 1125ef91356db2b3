//! Sequential analysis pipeline turning uploaded audio into a stored meeting.
//!
//! One upload produces five model calls: transcription first, then the four
//! analyses in a fixed order with a pacing pause between consecutive
//! analysis calls. Only transcription failure is fatal; each analysis step
//! degrades to its fallback shape on its own.

use std::sync::Arc;

use chrono::Utc;
use debrief_core::models::{
    AnalysisPayload, FactCheck, Improvements, Meeting, Summary, TaskList,
};
use debrief_core::{Error, MeetingStore, Result};
use debrief_inference::parse::parse_analysis;
use debrief_inference::prompts;
use debrief_inference::{ModelGateway, PromptPart};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::pacing::{FixedDelay, PacingPolicy};

/// Runs one upload through transcription and the four analyses, in order.
pub struct AnalysisPipeline {
    gateway: Arc<dyn ModelGateway>,
    store: Arc<MeetingStore>,
    pacing: Arc<dyn PacingPolicy>,
}

impl AnalysisPipeline {
    /// Pipeline with the default fixed-delay pacing.
    pub fn new(gateway: Arc<dyn ModelGateway>, store: Arc<MeetingStore>) -> Self {
        Self {
            gateway,
            store,
            pacing: Arc::new(FixedDelay::default()),
        }
    }

    pub fn with_pacing(mut self, pacing: Arc<dyn PacingPolicy>) -> Self {
        self.pacing = pacing;
        self
    }

    /// Process one uploaded recording end to end and store the result.
    ///
    /// Analysis order is fixed: summary, tasks, improvements, fact-check.
    /// The pacing pause runs between consecutive analysis calls, never
    /// before the first or after the last.
    #[instrument(skip(self, audio), fields(subsystem = "pipeline", op = "process_audio", filename = %original_filename, file_size = audio.len()))]
    pub async fn process_audio(
        &self,
        audio: &[u8],
        mime_type: &str,
        original_filename: &str,
    ) -> Result<Meeting> {
        let transcription = self.transcribe(audio, mime_type).await?;
        info!(
            transcription_len = transcription.len(),
            "Transcription complete"
        );

        let summary = self
            .run_step::<Summary>(prompts::summary_prompt(&transcription))
            .await;
        self.pacing.pause().await;
        let tasks = self
            .run_step::<TaskList>(prompts::tasks_prompt(&transcription))
            .await;
        self.pacing.pause().await;
        let improvements = self
            .run_step::<Improvements>(prompts::improvements_prompt(&transcription))
            .await;
        self.pacing.pause().await;
        let fact_check = self
            .run_step::<FactCheck>(prompts::fact_check_prompt(&transcription))
            .await;

        let meeting = Meeting {
            id: Uuid::new_v4(),
            filename: original_filename.to_string(),
            timestamp: Utc::now(),
            transcription,
            summary,
            tasks,
            improvements,
            fact_check,
        };
        self.store.put(meeting.clone()).await;
        info!(meeting_id = %meeting.id, "Meeting processed and stored");
        Ok(meeting)
    }

    /// Audio-to-text call. Any failure here fails the whole upload.
    async fn transcribe(&self, audio: &[u8], mime_type: &str) -> Result<String> {
        let parts = [
            PromptPart::text(prompts::transcription_prompt()),
            PromptPart::blob(mime_type, audio.to_vec()),
        ];
        let raw = self
            .gateway
            .invoke(&parts)
            .await
            .map_err(|e| Error::TranscriptionFailed(e.to_string()))?;

        let transcription = raw.trim().to_string();
        if transcription.is_empty() {
            return Err(Error::TranscriptionFailed(
                "Model returned an empty transcription".to_string(),
            ));
        }
        Ok(transcription)
    }

    /// One analysis call. A gateway or decode failure degrades to the
    /// fallback shape for this kind only; the pipeline continues.
    async fn run_step<T: AnalysisPayload>(&self, prompt: String) -> T {
        match self.gateway.invoke(&[PromptPart::text(prompt)]).await {
            Ok(raw) => {
                let outcome = parse_analysis::<T>(&raw);
                if let Some(reason) = outcome.fallback_reason() {
                    warn!(
                        analysis_kind = T::KIND,
                        reason = %reason,
                        "Model reply failed to decode, using fallback shape"
                    );
                }
                outcome.into_value()
            }
            Err(e) => {
                warn!(
                    analysis_kind = T::KIND,
                    error = %e,
                    "Analysis call failed, using fallback shape"
                );
                T::fallback()
            }
        }
    }
}
