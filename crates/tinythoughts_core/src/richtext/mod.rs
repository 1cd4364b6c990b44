//! Rich-text conversion between editor HTML and the store document tree.
//!
//! # Responsibility
//! - Convert editor HTML fragments into `RichTextDocument` trees for writes.
//! - Derive plain-text previews from stored HTML for list rendering.
//!
//! # Invariants
//! - Conversion is deterministic: identical HTML input yields identical trees.
//! - Malformed input degrades to a best-effort plain-text tree, never an error.

mod html;

pub use html::{derive_html_preview, html_to_document, PREVIEW_MAX_CHARS};
