//! # Reply Parser
//!
//! Extracts structured data from the labelled text the model is instructed
//! to produce. All parsers here are pure and infallible: malformed lines and
//! chunks are skipped, and only a reply with no recognized content at all
//! yields `None`.
//!
//! | Parser | Input |
//! |--------|-------|
//! | [`split_items`] | `a; b, c` |
//! | [`parse_categories`] | `name=a, b; other=c` |
//! | [`parse_reply`] | the whole multi-line reply |
//! | [`render_reply`] | inverse of [`parse_reply`] |

pub mod categories;
pub mod list;
pub mod reply;

pub use categories::{parse_categories, CategoryMap};
pub use list::split_items;
pub use reply::{parse_reply, render_reply, Field, StructuredRecord, IN_SCOPE_MARKER};
