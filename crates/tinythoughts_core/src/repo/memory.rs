//! In-memory note repository for tests and local development.
//!
//! # Responsibility
//! - Emulate the store's draft/publish lifecycle without a network.
//! - Emulate the store's HTML projection of submitted document trees.
//!
//! # Invariants
//! - Only published notes are visible to `list_notes`.
//! - List order is creation-time descending, matching the store query.
//! - Assigned ids are unique for the lifetime of the repository.

use crate::model::document::{DocumentNode, ElementKind, ElementNode, RichTextDocument};
use crate::model::note::{Note, NoteId};
use crate::repo::note_repo::{
    NoteHandle, NoteRepository, NotesPage, PageWindow, RepoError, RepoResult,
};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

struct MemoryRecord {
    id: NoteId,
    created_at: String,
    draft_html: String,
    published_html: Option<String>,
}

#[derive(Default)]
struct MemoryState {
    /// Newest-first, matching the store's `createdAt_DESC` ordering.
    records: Vec<MemoryRecord>,
    sequence: u64,
}

/// Store stand-in holding notes in process memory.
///
/// Cloning shares the underlying state, so a feed and an editor constructed
/// from clones observe each other's mutations the way they would through the
/// real store.
#[derive(Clone, Default)]
pub struct InMemoryNoteRepository {
    state: Arc<Mutex<MemoryState>>,
}

impl InMemoryNoteRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_state<T>(&self, f: impl FnOnce(&mut MemoryState) -> RepoResult<T>) -> RepoResult<T> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| RepoError::InvalidData("memory store lock poisoned".to_string()))?;
        f(&mut state)
    }
}

impl NoteRepository for InMemoryNoteRepository {
    fn list_notes(&self, window: PageWindow) -> RepoResult<NotesPage> {
        self.with_state(|state| {
            let published: Vec<&MemoryRecord> = state
                .records
                .iter()
                .filter(|record| record.published_html.is_some())
                .collect();
            let total_count = published.len();
            let notes = published
                .into_iter()
                .skip(window.skip as usize)
                .take(window.first as usize)
                .map(|record| {
                    Note::new(
                        record.id.clone(),
                        record.created_at.clone(),
                        record.published_html.clone().unwrap_or_default(),
                    )
                })
                .collect();
            Ok(NotesPage { notes, total_count })
        })
    }

    fn create_note(&self, content: &RichTextDocument) -> RepoResult<NoteHandle> {
        self.with_state(|state| {
            state.sequence += 1;
            let id = NoteId::new(format!("tt-{}", Uuid::new_v4()));
            // Synthetic monotonic timestamp preserving creation order.
            let created_at = format!("2024-01-01T00:00:00.{:06}Z", state.sequence);
            let html = render_document_html(content);
            state.records.insert(
                0,
                MemoryRecord {
                    id: id.clone(),
                    created_at,
                    draft_html: html.clone(),
                    published_html: None,
                },
            );
            Ok(NoteHandle { id, html })
        })
    }

    fn update_note(&self, id: &NoteId, content: &RichTextDocument) -> RepoResult<NoteHandle> {
        self.with_state(|state| {
            let record = state
                .records
                .iter_mut()
                .find(|record| record.id == *id)
                .ok_or_else(|| RepoError::NotFound(id.clone()))?;
            record.draft_html = render_document_html(content);
            Ok(NoteHandle {
                id: record.id.clone(),
                html: record.draft_html.clone(),
            })
        })
    }

    fn publish_note(&self, id: &NoteId) -> RepoResult<Note> {
        self.with_state(|state| {
            let record = state
                .records
                .iter_mut()
                .find(|record| record.id == *id)
                .ok_or_else(|| RepoError::NotFound(id.clone()))?;
            record.published_html = Some(record.draft_html.clone());
            Ok(Note::new(
                record.id.clone(),
                record.created_at.clone(),
                record.draft_html.clone(),
            ))
        })
    }

    fn delete_note(&self, id: &NoteId) -> RepoResult<NoteHandle> {
        self.with_state(|state| {
            let position = state
                .records
                .iter()
                .position(|record| record.id == *id)
                .ok_or_else(|| RepoError::NotFound(id.clone()))?;
            let record = state.records.remove(position);
            Ok(NoteHandle {
                id: record.id,
                html: record.published_html.unwrap_or(record.draft_html),
            })
        })
    }
}

// ============================================================================
// HTML projection (mirrors the store's rendering of document trees)
// ============================================================================

fn render_document_html(document: &RichTextDocument) -> String {
    document.children.iter().map(render_node).collect()
}

fn render_node(node: &DocumentNode) -> String {
    match node {
        DocumentNode::Text(leaf) => {
            let mut html = escape_html(&leaf.text);
            if leaf.code {
                html = format!("<code>{html}</code>");
            }
            if leaf.underline {
                html = format!("<u>{html}</u>");
            }
            if leaf.italic {
                html = format!("<i>{html}</i>");
            }
            if leaf.bold {
                html = format!("<b>{html}</b>");
            }
            html
        }
        DocumentNode::Element(element) => render_element(element),
    }
}

fn render_element(element: &ElementNode) -> String {
    let inner: String = element.children.iter().map(render_node).collect();
    match element.kind {
        ElementKind::Paragraph => format!("<p>{inner}</p>"),
        ElementKind::HeadingOne => format!("<h1>{inner}</h1>"),
        ElementKind::HeadingTwo => format!("<h2>{inner}</h2>"),
        ElementKind::HeadingThree => format!("<h3>{inner}</h3>"),
        ElementKind::HeadingFour => format!("<h4>{inner}</h4>"),
        ElementKind::HeadingFive => format!("<h5>{inner}</h5>"),
        ElementKind::HeadingSix => format!("<h6>{inner}</h6>"),
        ElementKind::BlockQuote => format!("<blockquote>{inner}</blockquote>"),
        ElementKind::BulletedList => format!("<ul>{inner}</ul>"),
        ElementKind::NumberedList => format!("<ol>{inner}</ol>"),
        ElementKind::ListItem => format!("<li>{inner}</li>"),
        ElementKind::Link => match &element.href {
            Some(href) => format!("<a href=\"{}\">{inner}</a>", escape_html(href)),
            None => format!("<a>{inner}</a>"),
        },
    }
}

fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
