//! Backend trait and normalized request/response types.
//!
//! The [`Backend`] trait abstracts over the remote generative model,
//! translating a normalized [`LlmRequest`] into the provider's HTTP API and
//! its reply back into an [`LlmResponse`].
//!
//! ```text
//! Assistant ──► LlmRequest ──► Backend::complete() ──► LlmResponse
//!                                    │
//!                         ┌──────────┴──────────┐
//!                    GeminiBackend          MockBackend
//!              :generateContent            canned replies
//! ```
//!
//! Backends make exactly one attempt per call. Retries and streaming are not
//! part of this crate.

pub mod gemini;
pub mod mock;

pub use gemini::GeminiBackend;
pub use mock::MockBackend;

use crate::error::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

/// A normalized LLM request, provider-agnostic.
#[derive(Debug, Clone)]
pub struct LlmRequest {
    /// Model identifier (e.g. `"gemini-2.5-flash"`).
    pub model: String,

    /// The full prompt text: instruction preamble plus the user query.
    pub prompt: String,

    /// Sampling settings. Unset values are left to the provider.
    pub config: GenerationConfig,
}

/// Optional sampling settings sent with each request.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
}

impl GenerationConfig {
    pub fn with_temperature(mut self, temp: f64) -> Self {
        self.temperature = Some(temp);
        self
    }

    pub fn with_max_output_tokens(mut self, tokens: u32) -> Self {
        self.max_output_tokens = Some(tokens);
        self
    }

    /// `true` when nothing is set and the block can be omitted.
    pub fn is_empty(&self) -> bool {
        self.temperature.is_none() && self.max_output_tokens.is_none()
    }
}

/// A normalized LLM response.
#[derive(Debug)]
pub struct LlmResponse {
    /// The generated text, trimmed and non-empty.
    pub text: String,

    /// HTTP status code (for diagnostics/logging).
    pub status: u16,

    /// Provider-specific metadata (token counts, model version).
    pub metadata: Option<serde_json::Value>,
}

/// Abstraction over the remote model.
///
/// Implementors return `Ok` only with non-empty reply text; a reply with no
/// usable text is [`AssistantError::EmptyReply`](crate::AssistantError::EmptyReply).
///
/// # Object Safety
///
/// This trait is object-safe and designed to be used as `Arc<dyn Backend>`.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Execute a single non-streaming call.
    async fn complete(
        &self,
        client: &Client,
        base_url: &str,
        request: &LlmRequest,
    ) -> Result<LlmResponse>;

    /// Human-readable name for logging and diagnostics.
    fn name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_config_default_is_empty() {
        assert!(GenerationConfig::default().is_empty());
        assert_eq!(
            serde_json::to_value(GenerationConfig::default()).unwrap(),
            serde_json::json!({})
        );
    }

    #[test]
    fn test_generation_config_camel_case() {
        let config = GenerationConfig::default()
            .with_temperature(0.2)
            .with_max_output_tokens(512);
        assert!(!config.is_empty());
        assert_eq!(
            serde_json::to_value(&config).unwrap(),
            serde_json::json!({"temperature": 0.2, "maxOutputTokens": 512})
        );
    }
}
