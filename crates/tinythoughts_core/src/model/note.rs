//! Note domain model.
//!
//! # Responsibility
//! - Define the canonical record for one remotely stored note.
//! - Keep serde naming aligned with the store's GraphQL response shape.
//!
//! # Invariants
//! - `id` is opaque, server-assigned, and stable once created.
//! - `created_at` is server-assigned and immutable.
//! - `content` is the only client-mutable part of a note.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Opaque server-assigned note identifier.
///
/// The client never parses or interprets the inner value; it only compares
/// and forwards it. A note in the drafted state has no id yet, which callers
/// model as `Option<NoteId>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(String);

impl NoteId {
    /// Wraps a raw identifier received from the store.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for NoteId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Rich-text payload of one note as the store projects it for reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteContent {
    /// Rendered HTML used directly for read-only display.
    pub html: String,
}

/// One published note as seen by the client.
///
/// Lifecycle: drafted (client-only, no id) -> created (id assigned) ->
/// published -> optionally updated -> deleted. The client holds notes only
/// in the in-memory feed; nothing is persisted locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Stable store identifier.
    pub id: NoteId,
    /// Server-assigned ISO-8601 creation timestamp.
    /// Serialized as `createdAt` to match the store schema.
    #[serde(rename = "createdAt")]
    pub created_at: String,
    /// Current rich-text content.
    pub content: NoteContent,
}

impl Note {
    /// Builds a note record from store response parts.
    pub fn new(id: NoteId, created_at: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            id,
            created_at: created_at.into(),
            content: NoteContent { html: html.into() },
        }
    }
}
