//! Note repository contract over the remote content store.
//!
//! # Responsibility
//! - Define the injected fetch capability used by feed and editor services.
//! - Name the five store operations and their result shapes.
//!
//! # Invariants
//! - `list_notes` returns pages in store order (`createdAt` descending)
//!   together with the store-reported total count.
//! - A created note is not visible to `list_notes` until published.

use crate::graphql::GraphQLError;
use crate::model::document::RichTextDocument;
use crate::model::note::{Note, NoteId};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository failure for store queries and mutations.
#[derive(Debug)]
pub enum RepoError {
    /// Transport or store-side failure; not further distinguished.
    Store(GraphQLError),
    /// The store knows no note under this id.
    NotFound(NoteId),
    /// The store answered with a shape this client cannot use.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Store(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "note not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid store data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::NotFound(_) => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<GraphQLError> for RepoError {
    fn from(value: GraphQLError) -> Self {
        Self::Store(value)
    }
}

/// Offset pagination request window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// Maximum notes to return.
    pub first: u32,
    /// Notes to skip from the top of the store ordering.
    pub skip: u32,
}

/// One fetched page plus the store-reported total count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotesPage {
    /// Page contents in store order.
    pub notes: Vec<Note>,
    /// Total published notes held by the store at fetch time.
    pub total_count: usize,
}

/// Reference to a note returned by create/update/delete mutations.
///
/// Carries the id plus the store's HTML projection of the submitted content;
/// `created_at` is only selected by the publish mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteHandle {
    pub id: NoteId,
    pub html: String,
}

/// Repository interface for note store operations.
pub trait NoteRepository {
    /// Fetches one page of published notes.
    fn list_notes(&self, window: PageWindow) -> RepoResult<NotesPage>;
    /// Creates a new drafted note and returns its assigned id.
    fn create_note(&self, content: &RichTextDocument) -> RepoResult<NoteHandle>;
    /// Replaces the content of an existing note.
    fn update_note(&self, id: &NoteId, content: &RichTextDocument) -> RepoResult<NoteHandle>;
    /// Finalizes the note's current content as its queryable version.
    fn publish_note(&self, id: &NoteId) -> RepoResult<Note>;
    /// Removes the note from the store.
    fn delete_note(&self, id: &NoteId) -> RepoResult<NoteHandle>;
}
