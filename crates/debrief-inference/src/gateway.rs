//! Model gateway trait and prompt part types.

use async_trait::async_trait;
use debrief_core::Result;

/// One part of a multimodal prompt.
///
/// A request to the model is an ordered sequence of parts; text parts carry
/// instructions, blob parts carry raw media the model should consume.
#[derive(Debug, Clone, PartialEq)]
pub enum PromptPart {
    /// Plain instruction or context text.
    Text(String),
    /// Binary payload with its MIME type; base64-encoded on the wire.
    Blob { mime_type: String, data: Vec<u8> },
}

impl PromptPart {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    pub fn blob(mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self::Blob {
            mime_type: mime_type.into(),
            data,
        }
    }
}

/// Backend for generating model completions from multimodal prompts.
#[async_trait]
pub trait ModelGateway: Send + Sync {
    /// Send the prompt parts as one request and return the raw reply text.
    ///
    /// Exactly one outbound call per invocation; no retries. Network errors
    /// surface as `UpstreamUnavailable`, provider error statuses as
    /// `UpstreamRejected`.
    async fn invoke(&self, parts: &[PromptPart]) -> Result<String>;

    /// Whether the backend holds credentials for upstream calls.
    fn is_configured(&self) -> bool;

    /// Get the model name being used.
    fn model_name(&self) -> &str;
}
