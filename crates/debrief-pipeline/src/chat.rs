//! Chat over stored meetings.
//!
//! Thin service: resolve the meeting, assemble the context block, forward
//! one prompt to the gateway, return the raw reply. Chat replies are free
//! text; nothing here parses JSON.

use std::sync::Arc;

use debrief_core::{MeetingStore, Result};
use debrief_inference::prompts;
use debrief_inference::{ModelGateway, PromptPart};
use tracing::{debug, instrument};
use uuid::Uuid;

/// Answers free-form questions, optionally grounded in one stored meeting.
pub struct ChatService {
    gateway: Arc<dyn ModelGateway>,
    store: Arc<MeetingStore>,
}

impl ChatService {
    pub fn new(gateway: Arc<dyn ModelGateway>, store: Arc<MeetingStore>) -> Self {
        Self { gateway, store }
    }

    /// Answer a question.
    ///
    /// When `meeting_id` resolves in the store, the meeting's transcription,
    /// summary overview, and task list are prepended as context. An unknown
    /// id is not an error; the question is sent without context.
    #[instrument(skip(self, question), fields(subsystem = "pipeline", op = "chat", question_len = question.len()))]
    pub async fn answer(&self, question: &str, meeting_id: Option<Uuid>) -> Result<String> {
        let context = match meeting_id {
            Some(id) => match self.store.get(id).await {
                Some(meeting) => Some(prompts::meeting_context(&meeting)),
                None => {
                    debug!(
                        meeting_id = %id,
                        "Chat references unknown meeting, answering without context"
                    );
                    None
                }
            },
            None => None,
        };

        let prompt = prompts::chat_prompt(question, context.as_deref());
        self.gateway.invoke(&[PromptPart::text(prompt)]).await
    }
}
