//! Labelled reply parsing.
//!
//! The instruction preamble asks the model for a header line followed by
//! lines of the form `Label: value`:
//!
//! ```text
//! ИБ:
//! Кратко: <1-2 sentences>
//! Угроза: <normalized threat name>
//! Контроли: item; item
//! Категории: административные=a, b; технические=c
//! Рекомендации: item; item
//! Стандарты: ISO 27001 A.5.1; 152-ФЗ
//! ```
//!
//! [`parse_reply`] turns such text into a [`StructuredRecord`] and
//! [`render_reply`] produces it back.

use serde::Serialize;

use crate::output_parser::categories::{parse_categories, CategoryMap};
use crate::output_parser::list::split_items;

/// Lower-cased prefix of the in-scope header line.
pub const IN_SCOPE_MARKER: &str = "иб";

/// Line boundaries: `\n`, `\r`, and the other Unicode line and record
/// separators. A `\r\n` pair yields an empty piece that is dropped as blank.
const LINE_BREAKS: [char; 10] = [
    '\n', '\r', '\x0b', '\x0c', '\x1c', '\x1d', '\x1e', '\u{85}', '\u{2028}', '\u{2029}',
];

/// Header line written by [`render_reply`].
const IN_SCOPE_HEADER: &str = "ИБ:";

/// A parsed in-scope answer.
///
/// Only produced by [`parse_reply`] when at least one content field is
/// non-empty, so `is_security` is always `true` on a returned record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructuredRecord {
    pub is_security: bool,
    pub summary: String,
    pub normalized_threat: String,
    pub controls: Vec<String>,
    pub control_categories: CategoryMap,
    pub recommendations: Vec<String>,
    pub standards: Vec<String>,
}

impl Default for StructuredRecord {
    fn default() -> Self {
        Self {
            is_security: true,
            summary: String::new(),
            normalized_threat: String::new(),
            controls: Vec::new(),
            control_categories: CategoryMap::new(),
            recommendations: Vec::new(),
            standards: Vec::new(),
        }
    }
}

impl StructuredRecord {
    /// `true` if any of the six content fields is non-empty.
    pub fn has_content(&self) -> bool {
        !self.summary.is_empty()
            || !self.normalized_threat.is_empty()
            || !self.controls.is_empty()
            || !self.control_categories.is_empty()
            || !self.recommendations.is_empty()
            || !self.standards.is_empty()
    }
}

/// One of the six recognized line labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Summary,
    Threat,
    Controls,
    Categories,
    Recommendations,
    Standards,
}

impl Field {
    /// All fields, in the order the preamble lists them.
    pub const ALL: [Field; 6] = [
        Field::Summary,
        Field::Threat,
        Field::Controls,
        Field::Categories,
        Field::Recommendations,
        Field::Standards,
    ];

    /// Label as written in the reply.
    pub fn title(self) -> &'static str {
        match self {
            Field::Summary => "Кратко",
            Field::Threat => "Угроза",
            Field::Controls => "Контроли",
            Field::Categories => "Категории",
            Field::Recommendations => "Рекомендации",
            Field::Standards => "Стандарты",
        }
    }

    /// Normalized (lower-case) label used for matching.
    pub fn label(self) -> &'static str {
        match self {
            Field::Summary => "кратко",
            Field::Threat => "угроза",
            Field::Controls => "контроли",
            Field::Categories => "категории",
            Field::Recommendations => "рекомендации",
            Field::Standards => "стандарты",
        }
    }

    /// Look up a raw label. Trims and lower-cases, then matches exactly.
    pub fn from_label(raw: &str) -> Option<Field> {
        let normalized = raw.trim().to_lowercase();
        Field::ALL.into_iter().find(|f| f.label() == normalized)
    }

    /// Overwrite this field of `record` with the parsed `value`.
    pub fn apply(self, record: &mut StructuredRecord, value: &str) {
        match self {
            Field::Summary => record.summary = value.to_string(),
            Field::Threat => record.normalized_threat = value.to_string(),
            Field::Controls => record.controls = split_items(value),
            Field::Categories => record.control_categories = parse_categories(value),
            Field::Recommendations => record.recommendations = split_items(value),
            Field::Standards => record.standards = split_items(value),
        }
    }
}

/// Parse a labelled reply into a [`StructuredRecord`].
///
/// Lines are split on any line or record separator (not just `\n`), then
/// trimmed, and blank lines dropped. A line whose lower-cased text
/// starts with [`IN_SCOPE_MARKER`] is the header and is skipped. Every other
/// line is split on its first `:`; lines without one, and lines with an
/// unknown label, are ignored. A repeated label replaces the earlier value.
///
/// Returns `None` when no content field ended up non-empty.
///
/// # Examples
///
/// ```
/// use infosec_assistant::output_parser::parse_reply;
///
/// let record = parse_reply("ИБ:\nКратко: Фишинг-атака\nУгроза: Фишинг").unwrap();
/// assert_eq!(record.summary, "Фишинг-атака");
/// assert_eq!(record.normalized_threat, "Фишинг");
///
/// assert!(parse_reply("Some unrelated unstructured reply").is_none());
/// ```
pub fn parse_reply(text: &str) -> Option<StructuredRecord> {
    let mut record = StructuredRecord::default();

    for line in text.split(LINE_BREAKS).map(str::trim).filter(|l| !l.is_empty()) {
        if line.to_lowercase().starts_with(IN_SCOPE_MARKER) {
            continue;
        }
        let Some((label, value)) = line.split_once(':') else {
            continue;
        };
        if let Some(field) = Field::from_label(label) {
            field.apply(&mut record, value.trim());
        }
    }

    record.has_content().then_some(record)
}

/// Render a record in the labelled reply format.
///
/// Empty fields are omitted. Lists are joined with `"; "`; category items
/// are joined with `", "` because `;` separates category blocks.
pub fn render_reply(record: &StructuredRecord) -> String {
    let mut lines = vec![IN_SCOPE_HEADER.to_string()];

    for field in Field::ALL {
        let value = match field {
            Field::Summary => record.summary.clone(),
            Field::Threat => record.normalized_threat.clone(),
            Field::Controls => record.controls.join("; "),
            Field::Categories => record
                .control_categories
                .iter()
                .map(|(name, items)| format!("{}={}", name, items.join(", ")))
                .collect::<Vec<_>>()
                .join("; "),
            Field::Recommendations => record.recommendations.join("; "),
            Field::Standards => record.standards.join("; "),
        };
        if !value.is_empty() {
            lines.push(format!("{}: {}", field.title(), value));
        }
    }

    lines.join("\n")
}
