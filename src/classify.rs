//! Reply classification and the outward JSON payloads.
//!
//! [`classify`] decides what a raw model reply means for the front-end:
//!
//! ```text
//! None ─────────────────────────────► Unavailable
//! Some(text) ── upper starts "НЕ ИБ" ► OutOfScope
//!            └─ parse_reply ── Some ► Structured
//!                            └─ None ► Freeform (warn)
//! ```

use serde_json::{json, Value};

use crate::output_parser::{parse_reply, StructuredRecord};

/// Prefix of the upper-cased reply that marks an out-of-scope question.
pub const OUT_OF_SCOPE_MARKER: &str = "НЕ ИБ";

/// Shown when the question is not about information security.
pub const REFUSAL_MESSAGE: &str = "Отвечаю только на вопросы по информационной безопасности.";

/// Shown when the model is unconfigured or the call failed.
pub const UNAVAILABLE_MESSAGE: &str = "Модель недоступна или ключ не задан.";

/// Shown when the query is empty; the model is not called.
pub const EMPTY_QUERY_MESSAGE: &str = "Введите вопрос по информационной безопасности.";

/// What a single request resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The model could not be reached or is not configured.
    Unavailable,
    /// The model judged the question unrelated to information security.
    OutOfScope,
    /// A labelled in-scope answer.
    Structured(StructuredRecord),
    /// Text that did not match the labelled format, passed through verbatim.
    Freeform(String),
}

impl Outcome {
    /// Short name for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Outcome::Unavailable => "unavailable",
            Outcome::OutOfScope => "out_of_scope",
            Outcome::Structured(_) => "structured",
            Outcome::Freeform(_) => "freeform",
        }
    }

    /// The JSON body the front-end expects for this outcome.
    ///
    /// Structured payloads always carry every key; empty fields render as
    /// `""`, `[]` or `{}`.
    pub fn to_json(&self) -> Value {
        match self {
            Outcome::Unavailable => json!({
                "response": UNAVAILABLE_MESSAGE,
                "model_unavailable": true,
            }),
            Outcome::OutOfScope => json!({
                "is_security": false,
                "response": REFUSAL_MESSAGE,
            }),
            Outcome::Freeform(text) => json!({ "response": text }),
            Outcome::Structured(record) => json!({
                "summary": record.summary,
                "threat": record.normalized_threat,
                "controls": record.controls,
                "control_categories": record.control_categories,
                "recommendations": record.recommendations,
                "standards": record.standards,
            }),
        }
    }
}

/// Classify a raw model reply.
///
/// `None`, or text that is blank, means the model was unavailable. Never
/// fails: any text that is neither a refusal nor a labelled answer becomes
/// [`Outcome::Freeform`].
///
/// # Examples
///
/// ```
/// use infosec_assistant::classify::{classify, Outcome};
///
/// assert_eq!(classify(None), Outcome::Unavailable);
/// assert_eq!(classify(Some("не иб")), Outcome::OutOfScope);
/// assert!(matches!(classify(Some("Угроза: Фишинг")), Outcome::Structured(_)));
/// ```
pub fn classify(reply: Option<&str>) -> Outcome {
    let Some(text) = reply.filter(|t| !t.trim().is_empty()) else {
        return Outcome::Unavailable;
    };

    if text.to_uppercase().starts_with(OUT_OF_SCOPE_MARKER) {
        return Outcome::OutOfScope;
    }

    match parse_reply(text) {
        Some(record) => Outcome::Structured(record),
        None => {
            tracing::warn!(reply = %text, "model reply outside the expected format");
            Outcome::Freeform(text.to_string())
        }
    }
}
