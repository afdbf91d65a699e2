//! The request boundary between the HTTP layer and the remote model.
//!
//! [`Assistant`] carries the HTTP client, the backend, the endpoint and the
//! model settings. It is built once at startup and shared across requests;
//! it holds no per-request state.
//!
//! Every failure of the remote call is logged and turned into `None` here,
//! so [`classify`](crate::classify::classify) only ever sees `text | absent`.

use crate::backend::{Backend, GeminiBackend, GenerationConfig, LlmRequest};
use crate::classify::{classify, Outcome};
use crate::config::{ModelConfig, DEFAULT_BASE_URL, DEFAULT_MODEL};
use crate::error::Result;
use crate::prompt::build_prompt;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

/// Shared, immutable request handler.
///
/// # Example
///
/// ```
/// use infosec_assistant::{Assistant, MockBackend};
/// use std::sync::Arc;
///
/// let assistant = Assistant::builder("http://unused")
///     .backend(Arc::new(MockBackend::fixed("НЕ ИБ")))
///     .build()
///     .unwrap();
/// assert!(assistant.is_configured());
/// ```
pub struct Assistant {
    /// HTTP client (cheap to clone -- uses `Arc` internally).
    pub client: Client,
    /// Base URL of the model API.
    pub base_url: String,
    /// Model identifier sent with each request.
    pub model: String,
    /// `None` when no credential is configured.
    pub backend: Option<Arc<dyn Backend>>,
    /// Sampling settings sent with each request.
    pub generation: GenerationConfig,
}

impl Assistant {
    /// Create a new builder.
    pub fn builder(base_url: impl Into<String>) -> AssistantBuilder {
        AssistantBuilder {
            client: None,
            base_url: base_url.into(),
            model: None,
            backend: None,
            generation: GenerationConfig::default(),
            timeout: None,
        }
    }

    /// Build from model configuration. Without an API key the assistant is
    /// unconfigured and answers every question with
    /// [`Outcome::Unavailable`].
    pub fn from_config(config: &ModelConfig) -> Result<Self> {
        let mut builder = Assistant::builder(&config.base_url)
            .model(&config.model)
            .generation(config.generation_config())
            .timeout(config.timeout());
        match config.api_key() {
            Some(key) => builder = builder.backend(Arc::new(GeminiBackend::new(key))),
            None => tracing::warn!("GEMINI_API_KEY is not set; model requests are disabled"),
        }
        builder.build()
    }

    /// Whether a backend is configured.
    pub fn is_configured(&self) -> bool {
        self.backend.is_some()
    }

    /// Backend name for diagnostics, `"none"` when unconfigured.
    pub fn backend_name(&self) -> &'static str {
        self.backend.as_ref().map_or("none", |b| b.name())
    }

    /// Ask the model once. Returns `None` when unconfigured or when the call
    /// fails for any reason; the cause is logged.
    pub async fn fetch_reply(&self, query: &str) -> Option<String> {
        let backend = self.backend.as_ref()?;
        let request = LlmRequest {
            model: self.model.clone(),
            prompt: build_prompt(query),
            config: self.generation.clone(),
        };

        match backend.complete(&self.client, &self.base_url, &request).await {
            Ok(response) => {
                tracing::debug!(
                    backend = backend.name(),
                    status = response.status,
                    metadata = ?response.metadata,
                    "model replied"
                );
                Some(response.text)
            }
            Err(e) => {
                tracing::error!(
                    backend = backend.name(),
                    model = %self.model,
                    retry_after_secs = e.retry_after().map(|d| d.as_secs()),
                    error = %e,
                    "model call failed"
                );
                None
            }
        }
    }

    /// Ask the model and classify the reply.
    pub async fn answer(&self, query: &str) -> Outcome {
        let reply = self.fetch_reply(query).await;
        let outcome = classify(reply.as_deref());
        tracing::debug!(outcome = outcome.kind(), "request classified");
        outcome
    }
}

impl std::fmt::Debug for Assistant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Assistant")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("backend", &self.backend_name())
            .field("generation", &self.generation)
            .finish()
    }
}

/// Builder for [`Assistant`].
pub struct AssistantBuilder {
    client: Option<Client>,
    base_url: String,
    model: Option<String>,
    backend: Option<Arc<dyn Backend>>,
    generation: GenerationConfig,
    timeout: Option<Duration>,
}

impl AssistantBuilder {
    /// Set the HTTP client. If not set, a default client is created.
    pub fn client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Set the model name. Default: [`DEFAULT_MODEL`].
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the backend. Without one the assistant is unconfigured.
    pub fn backend(mut self, backend: Arc<dyn Backend>) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Set the sampling settings.
    pub fn generation(mut self, generation: GenerationConfig) -> Self {
        self.generation = generation;
        self
    }

    /// Set the request timeout. Default: 60 seconds.
    ///
    /// Ignored when a custom `Client` is provided via `.client()`.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the assistant.
    pub fn build(self) -> Result<Assistant> {
        let client = match self.client {
            Some(client) => client,
            None => Client::builder()
                .timeout(self.timeout.unwrap_or(Duration::from_secs(60)))
                .build()?,
        };
        let base_url = match self.base_url.trim_end_matches('/') {
            "" => DEFAULT_BASE_URL.to_string(),
            url => url.to_string(),
        };
        Ok(Assistant {
            client,
            base_url,
            model: self.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            backend: self.backend,
            generation: self.generation,
        })
    }
}
