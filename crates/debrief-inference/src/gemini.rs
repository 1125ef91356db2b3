//! Gemini backend for the model gateway.
//!
//! Talks to the `generateContent` endpoint of the Google Generative Language
//! API. One HTTP call per invocation, no retries; callers decide what a
//! failed call means for their pipeline.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use debrief_core::{defaults, Error, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::gateway::{ModelGateway, PromptPart};

/// Gateway to the Gemini `generateContent` API.
pub struct GeminiBackend {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    gen_timeout_secs: u64,
    generation_config: Option<GenerationConfig>,
}

/// Optional sampling parameters forwarded verbatim to the API.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
}

impl GeminiBackend {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: defaults::GEMINI_BASE_URL.to_string(),
            api_key: api_key.into(),
            model: defaults::GEMINI_MODEL.to_string(),
            gen_timeout_secs: defaults::GEN_TIMEOUT_SECS,
            generation_config: None,
        }
    }

    /// Create from environment variables.
    /// Returns None if GEMINI_API_KEY is not set or empty.
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var(defaults::ENV_GEMINI_API_KEY).ok()?;
        if api_key.is_empty() {
            return None;
        }
        let mut backend = Self::new(api_key);
        if let Ok(model) = std::env::var(defaults::ENV_GEMINI_MODEL) {
            if !model.is_empty() {
                backend.model = model;
            }
        }
        if let Ok(base_url) = std::env::var(defaults::ENV_GEMINI_BASE_URL) {
            if !base_url.is_empty() {
                backend.base_url = base_url;
            }
        }
        Some(backend)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.gen_timeout_secs = secs;
        self
    }

    pub fn with_generation_config(mut self, config: GenerationConfig) -> Self {
        self.generation_config = Some(config);
        self
    }

    fn build_request(&self, parts: &[PromptPart]) -> GenerateContentRequest {
        let parts = parts
            .iter()
            .map(|part| match part {
                PromptPart::Text(text) => Part {
                    text: Some(text.clone()),
                    inline_data: None,
                },
                PromptPart::Blob { mime_type, data } => Part {
                    text: None,
                    inline_data: Some(InlineData {
                        mime_type: mime_type.clone(),
                        data: BASE64.encode(data),
                    }),
                },
            })
            .collect();

        GenerateContentRequest {
            contents: vec![Content { parts }],
            generation_config: self.generation_config.clone(),
        }
    }
}

/// Request body for `generateContent`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

/// Response body for `generateContent`.
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Reply text: all text parts of the first candidate, concatenated.
    fn reply_text(self) -> Result<String> {
        let candidate = self
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| Error::UpstreamRejected("Gemini returned no candidates".to_string()))?;

        let text: String = candidate
            .content
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect()
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(Error::UpstreamRejected(
                "Gemini returned an empty reply".to_string(),
            ));
        }
        Ok(text)
    }
}

#[async_trait]
impl ModelGateway for GeminiBackend {
    #[instrument(skip(self, parts), fields(subsystem = "inference", component = "gemini", op = "generate", model = %self.model, part_count = parts.len()))]
    async fn invoke(&self, parts: &[PromptPart]) -> Result<String> {
        let start = Instant::now();

        let prompt_len: usize = parts
            .iter()
            .map(|p| match p {
                PromptPart::Text(text) => text.len(),
                PromptPart::Blob { .. } => 0,
            })
            .sum();
        debug!(prompt_len, "Starting generation");

        let request = self.build_request(parts);
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .timeout(Duration::from_secs(self.gen_timeout_secs))
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::UpstreamUnavailable(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::UpstreamRejected(format!(
                "Gemini API error {}: {}",
                status, body
            )));
        }

        let result: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| Error::UpstreamRejected(format!("Failed to parse response: {}", e)))?;

        let text = result.reply_text()?;
        let elapsed = start.elapsed().as_millis() as u64;
        debug!(
            response_len = text.len(),
            duration_ms = elapsed,
            "Generation complete"
        );
        if elapsed > defaults::SLOW_GENERATION_MS {
            warn!(
                duration_ms = elapsed,
                prompt_len,
                slow = true,
                "Slow generation operation"
            );
        }
        Ok(text)
    }

    fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
