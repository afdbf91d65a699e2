//! Mock backend for testing without a live model.
//!
//! [`MockBackend`] returns pre-configured replies (or failures) in order,
//! so the whole request path can be exercised deterministically.
//!
//! # Example
//!
//! ```
//! use infosec_assistant::backend::MockBackend;
//!
//! let mock = MockBackend::new(vec!["НЕ ИБ".to_string()]);
//! let failing = MockBackend::failing(503);
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use reqwest::Client;

use super::{Backend, LlmRequest, LlmResponse};
use crate::error::Result;
use crate::AssistantError;

/// One canned result.
#[derive(Debug, Clone)]
enum Canned {
    Reply(String),
    Status(u16),
}

/// A test backend that returns canned results in order.
///
/// Cycles back to the beginning when all results have been consumed.
/// Blank replies come back as [`AssistantError::EmptyReply`], the same as a
/// real backend would report them.
#[derive(Debug)]
pub struct MockBackend {
    results: Vec<Canned>,
    index: AtomicUsize,
    calls: AtomicUsize,
}

impl MockBackend {
    /// Create a mock backend with the given canned replies.
    ///
    /// Replies are returned in order. When exhausted, cycles from the beginning.
    pub fn new(replies: Vec<String>) -> Self {
        assert!(!replies.is_empty(), "MockBackend requires at least one reply");
        Self::from_canned(replies.into_iter().map(Canned::Reply).collect())
    }

    /// Create a mock that always returns the same reply.
    pub fn fixed(reply: impl Into<String>) -> Self {
        Self::new(vec![reply.into()])
    }

    /// Create a mock whose every call fails with the given HTTP status.
    pub fn failing(status: u16) -> Self {
        Self::from_canned(vec![Canned::Status(status)])
    }

    fn from_canned(results: Vec<Canned>) -> Self {
        Self {
            results,
            index: AtomicUsize::new(0),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }

    fn next_result(&self) -> Canned {
        self.calls.fetch_add(1, Ordering::Relaxed);
        let idx = self.index.fetch_add(1, Ordering::Relaxed) % self.results.len();
        self.results[idx].clone()
    }
}

#[async_trait]
impl Backend for MockBackend {
    async fn complete(
        &self,
        _client: &Client,
        _base_url: &str,
        _request: &LlmRequest,
    ) -> Result<LlmResponse> {
        match self.next_result() {
            Canned::Reply(text) if text.trim().is_empty() => Err(AssistantError::EmptyReply),
            Canned::Reply(text) => Ok(LlmResponse {
                text: text.trim().to_string(),
                status: 200,
                metadata: None,
            }),
            Canned::Status(status) => Err(AssistantError::HttpError {
                status,
                body: "mock failure".into(),
                retry_after: None,
            }),
        }
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
