use std::time::Duration;
use thiserror::Error;

/// Errors produced at the edges of the assistant: configuration, the remote
/// model call, and the HTTP server. Reply parsing never fails.
#[derive(Error, Debug)]
pub enum AssistantError {
    /// Low-level HTTP transport failure (connection refused, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// YAML config file could not be parsed.
    #[cfg(feature = "yaml")]
    #[error("YAML parsing failed: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Reading a config file or binding a socket failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP error with status code, response body, and optional Retry-After hint.
    ///
    /// Returned by [`Backend`](crate::backend::Backend) implementations when
    /// the provider returns a non-success status code.
    #[error("HTTP {status}: {body}")]
    HttpError {
        /// HTTP status code (e.g. 400, 403, 429).
        status: u16,
        /// Response body text.
        body: String,
        /// Parsed `Retry-After` header value, if present.
        retry_after: Option<Duration>,
    },

    /// The model answered but produced no candidate, no part, or blank text.
    #[error("model returned an empty reply")]
    EmptyReply,

    /// Invalid configuration detected at startup.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl AssistantError {
    /// Provider's `Retry-After` hint, if the error carried one.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            AssistantError::HttpError { retry_after, .. } => *retry_after,
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, AssistantError>;
