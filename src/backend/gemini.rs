//! Backend for the Gemini `generateContent` API.
//!
//! Endpoint: `/v1beta/models/{model}:generateContent`.
//! Auth: `x-goog-api-key` header.
//! Reply text: `candidates[0].content.parts[0].text`.

use super::{Backend, LlmRequest, LlmResponse};
use crate::error::Result;
use crate::AssistantError;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};

/// Backend for Google's Gemini models.
///
/// # Example
///
/// ```
/// use infosec_assistant::backend::GeminiBackend;
///
/// let backend = GeminiBackend::new("AIza-example-key");
/// assert!(!format!("{backend:?}").contains("example-key"));
/// ```
#[derive(Clone)]
pub struct GeminiBackend {
    api_key: String,
}

impl std::fmt::Debug for GeminiBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiBackend")
            .field("api_key", &redact(&self.api_key))
            .finish()
    }
}

/// Keep the first few characters of a secret for recognizability.
pub(crate) fn redact(key: &str) -> String {
    match key.get(..6) {
        Some(prefix) if key.len() > 6 => format!("{}***", prefix),
        _ => "***".to_string(),
    }
}

/// Subset of the generateContent response this crate reads.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
    usage_metadata: Option<Value>,
    model_version: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    parts: Option<Vec<Part>>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Trimmed text of the first part of the first candidate, if non-empty.
    fn first_text(&self) -> Option<&str> {
        self.candidates
            .as_deref()?
            .first()?
            .content
            .as_ref()?
            .parts
            .as_deref()?
            .first()?
            .text
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }

    fn metadata(&self) -> Option<Value> {
        let mut meta = serde_json::Map::new();
        if let Some(ref usage) = self.usage_metadata {
            meta.insert("usage".into(), usage.clone());
        }
        if let Some(ref version) = self.model_version {
            meta.insert("model_version".into(), Value::String(version.clone()));
        }
        if meta.is_empty() {
            None
        } else {
            Some(Value::Object(meta))
        }
    }
}

impl GeminiBackend {
    /// Create a backend authenticating with `api_key`.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
        }
    }

    /// Build the request body: one user turn holding the whole prompt.
    fn build_body(request: &LlmRequest) -> Value {
        let mut body = json!({
            "contents": [
                {"role": "user", "parts": [{"text": request.prompt}]}
            ],
        });

        if !request.config.is_empty() {
            body["generationConfig"] = json!(request.config);
        }

        body
    }

    fn endpoint(base_url: &str, model: &str) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            base_url.trim_end_matches('/'),
            model
        )
    }

    /// Parse a `Retry-After` header value as seconds.
    fn parse_retry_after(value: &str) -> Option<std::time::Duration> {
        value
            .trim()
            .parse::<u64>()
            .ok()
            .map(std::time::Duration::from_secs)
    }
}

#[async_trait]
impl Backend for GeminiBackend {
    async fn complete(
        &self,
        client: &Client,
        base_url: &str,
        request: &LlmRequest,
    ) -> Result<LlmResponse> {
        let url = Self::endpoint(base_url, &request.model);
        let body = Self::build_body(request);

        let resp = client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status().as_u16();

        if !resp.status().is_success() {
            let retry_after = resp
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(Self::parse_retry_after);
            let text = resp.text().await.unwrap_or_default();
            return Err(AssistantError::HttpError {
                status,
                body: text,
                retry_after,
            });
        }

        let parsed: GenerateContentResponse = resp.json().await?;
        let text = parsed
            .first_text()
            .ok_or(AssistantError::EmptyReply)?
            .to_string();

        Ok(LlmResponse {
            text,
            status,
            metadata: parsed.metadata(),
        })
    }

    fn name(&self) -> &'static str {
        "gemini"
    }
}
