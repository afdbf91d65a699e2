//! # InfoSec Assistant
//!
//! A small web backend that forwards a user's question to a Gemini model,
//! constrained by a fixed instruction prompt to answer information-security
//! questions only, and reshapes the model's labelled text reply into JSON
//! for a front-end.
//!
//! ## Request Flow
//!
//! ```text
//! POST /api/assistant {"query"}
//!        │
//!        ▼
//! Assistant::fetch_reply ── Backend::complete ──► text | None
//!        │                                           │
//!        ▼                                           ▼
//!   classify(text | None) ──► Outcome ──► Outcome::to_json()
//!        │
//!        └─ parse_reply ─┬─ split_items
//!                        └─ parse_categories
//! ```
//!
//! ## Core Concepts
//!
//! - **[`output_parser`]** — pure, infallible parsers for the labelled reply
//!   format (`Кратко:`, `Угроза:`, `Контроли:`, ...).
//! - **[`classify`](classify::classify)** — maps `text | absent` to one of
//!   four [`Outcome`]s: unavailable, out of scope, structured, or freeform.
//! - **[`Backend`]** — object-safe trait over the remote model;
//!   [`GeminiBackend`] for production, [`MockBackend`] for tests.
//! - **[`Assistant`]** — the boundary that turns every remote-call failure
//!   into the absent signal.
//!
//! ## Quick Start
//!
//! ```
//! use infosec_assistant::{Assistant, MockBackend, Outcome};
//! use std::sync::Arc;
//!
//! # tokio_test::block_on(async {
//! let assistant = Assistant::builder("http://unused")
//!     .backend(Arc::new(MockBackend::fixed("ИБ:\nУгроза: Фишинг")))
//!     .build()
//!     .unwrap();
//!
//! match assistant.answer("Письмо от «банка» со ссылкой").await {
//!     Outcome::Structured(record) => assert_eq!(record.normalized_threat, "Фишинг"),
//!     other => panic!("unexpected outcome: {other:?}"),
//! }
//! # });
//! ```

pub mod assistant;
pub mod backend;
pub mod classify;
pub mod config;
pub mod error;
pub mod observability;
pub mod output_parser;
pub mod prompt;
pub mod server;

pub use assistant::{Assistant, AssistantBuilder};
pub use backend::{Backend, GeminiBackend, GenerationConfig, LlmRequest, LlmResponse, MockBackend};
pub use classify::{classify, Outcome};
pub use config::{Config, ModelConfig, ServerConfig};
pub use error::{AssistantError, Result};
pub use output_parser::{parse_categories, parse_reply, render_reply, split_items, StructuredRecord};
