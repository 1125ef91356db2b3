//! Mock model gateway for deterministic testing.
//!
//! Replies are scripted up front and consumed in order; once the script is
//! exhausted the default reply is returned. Every invocation is recorded so
//! tests can assert on what was sent.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use debrief_inference::mock::MockGateway;
//! use debrief_inference::gateway::{ModelGateway, PromptPart};
//!
//! #[tokio::test]
//! async fn test_with_mock_gateway() {
//!     let gateway = MockGateway::new()
//!         .with_reply("Speaker 1: Hello.")
//!         .with_reply(r#"{"overview": "Short call"}"#);
//!
//!     let text = gateway.invoke(&[PromptPart::text("Transcribe")]).await.unwrap();
//!     assert_eq!(text, "Speaker 1: Hello.");
//! }
//! ```

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use debrief_core::{Error, Result};

use crate::gateway::{ModelGateway, PromptPart};

/// Mock model gateway for testing.
#[derive(Clone)]
pub struct MockGateway {
    config: Arc<MockConfig>,
    replies: Arc<Mutex<VecDeque<MockReply>>>,
    call_log: Arc<Mutex<Vec<MockCall>>>,
}

#[derive(Debug, Clone)]
struct MockConfig {
    default_reply: String,
    model: String,
    configured: bool,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            default_reply: "Mock reply".to_string(),
            model: "mock-model".to_string(),
            configured: true,
        }
    }
}

/// One scripted outcome for an invocation.
#[derive(Debug, Clone)]
pub enum MockReply {
    /// Succeed with this text.
    Text(String),
    /// Fail with `UpstreamUnavailable`.
    Unavailable(String),
    /// Fail with `UpstreamRejected`.
    Rejected(String),
}

/// Record of one invocation.
#[derive(Debug, Clone)]
pub struct MockCall {
    /// All text parts of the prompt, concatenated with newlines.
    pub text: String,
    /// MIME type and byte length of the blob part, when one was sent.
    pub blob: Option<(String, usize)>,
}

impl MockGateway {
    /// Create a new mock gateway with default configuration.
    pub fn new() -> Self {
        Self {
            config: Arc::new(MockConfig::default()),
            replies: Arc::new(Mutex::new(VecDeque::new())),
            call_log: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Script a successful reply for the next unscripted invocation.
    pub fn with_reply(self, text: impl Into<String>) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(MockReply::Text(text.into()));
        self
    }

    /// Script an `UpstreamUnavailable` failure.
    pub fn with_unavailable(self, message: impl Into<String>) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(MockReply::Unavailable(message.into()));
        self
    }

    /// Script an `UpstreamRejected` failure.
    pub fn with_rejected(self, message: impl Into<String>) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(MockReply::Rejected(message.into()));
        self
    }

    /// Set the reply returned once the script is exhausted.
    pub fn with_default_reply(mut self, text: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.config).default_reply = text.into();
        self
    }

    /// Set the reported model name.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.config).model = model.into();
        self
    }

    /// Report `is_configured() == false`, as if no API key were present.
    pub fn not_configured(mut self) -> Self {
        Arc::make_mut(&mut self.config).configured = false;
        self
    }

    /// Get all logged calls for assertion.
    pub fn calls(&self) -> Vec<MockCall> {
        self.call_log.lock().unwrap().clone()
    }

    /// Get the number of invocations so far.
    pub fn call_count(&self) -> usize {
        self.call_log.lock().unwrap().len()
    }

    /// Clear the call log.
    pub fn clear_calls(&self) {
        self.call_log.lock().unwrap().clear()
    }

    fn log_call(&self, parts: &[PromptPart]) {
        let text = parts
            .iter()
            .filter_map(|p| match p {
                PromptPart::Text(text) => Some(text.as_str()),
                PromptPart::Blob { .. } => None,
            })
            .collect::<Vec<_>>()
            .join("\n");
        let blob = parts.iter().find_map(|p| match p {
            PromptPart::Text(_) => None,
            PromptPart::Blob { mime_type, data } => Some((mime_type.clone(), data.len())),
        });
        self.call_log.lock().unwrap().push(MockCall { text, blob });
    }
}

impl Default for MockGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ModelGateway for MockGateway {
    async fn invoke(&self, parts: &[PromptPart]) -> Result<String> {
        self.log_call(parts);

        let scripted = self.replies.lock().unwrap().pop_front();
        match scripted {
            Some(MockReply::Text(text)) => Ok(text),
            Some(MockReply::Unavailable(message)) => Err(Error::UpstreamUnavailable(message)),
            Some(MockReply::Rejected(message)) => Err(Error::UpstreamRejected(message)),
            None => Ok(self.config.default_reply.clone()),
        }
    }

    fn is_configured(&self) -> bool {
        self.config.configured
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}
