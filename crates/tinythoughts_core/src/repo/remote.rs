//! GraphQL-backed note repository.
//!
//! # Responsibility
//! - Bind the repository contract to the five store operation documents.
//! - Keep wire DTO shapes private to this module.
//!
//! # Invariants
//! - Mutations resolving to `null` map to `RepoError::NotFound`.
//! - Page order arrives store-sorted and is passed through untouched.

use crate::config::StoreConfig;
use crate::graphql::operations::{
    CREATE_NOTE_MUTATION, DELETE_NOTE_MUTATION, NOTES_PAGE_QUERY, PUBLISH_NOTE_MUTATION,
    UPDATE_NOTE_MUTATION,
};
use crate::graphql::GraphQLClient;
use crate::model::document::RichTextDocument;
use crate::model::note::{Note, NoteId};
use crate::repo::note_repo::{NoteHandle, NoteRepository, NotesPage, PageWindow, RepoError, RepoResult};
use serde::{Deserialize, Serialize};

// ============================================================================
// Wire types (internal, match the store's response format)
// ============================================================================

#[derive(Serialize)]
struct PageVariables {
    first: u32,
    skip: u32,
}

#[derive(Serialize)]
struct ContentVariables<'a> {
    content: &'a RichTextDocument,
}

#[derive(Serialize)]
struct UpdateVariables<'a> {
    content: &'a RichTextDocument,
    id: &'a NoteId,
}

#[derive(Serialize)]
struct IdVariables<'a> {
    id: &'a NoteId,
}

#[derive(Deserialize)]
struct NotesPageData {
    #[serde(rename = "tinyThoughts")]
    notes: Vec<Note>,
    #[serde(rename = "tinyThoughtsConnection")]
    connection: ConnectionData,
}

#[derive(Deserialize)]
struct ConnectionData {
    aggregate: AggregateData,
}

#[derive(Deserialize)]
struct AggregateData {
    count: usize,
}

#[derive(Deserialize)]
struct WireHandle {
    id: NoteId,
    content: WireContent,
}

#[derive(Deserialize)]
struct WireContent {
    html: String,
}

#[derive(Deserialize)]
struct CreateData {
    #[serde(rename = "createTinyThought")]
    note: Option<WireHandle>,
}

#[derive(Deserialize)]
struct UpdateData {
    #[serde(rename = "updateTinyThought")]
    note: Option<WireHandle>,
}

#[derive(Deserialize)]
struct PublishData {
    #[serde(rename = "publishTinyThought")]
    note: Option<Note>,
}

#[derive(Deserialize)]
struct DeleteData {
    #[serde(rename = "deleteTinyThought")]
    note: Option<WireHandle>,
}

impl From<WireHandle> for NoteHandle {
    fn from(value: WireHandle) -> Self {
        Self {
            id: value.id,
            html: value.content.html,
        }
    }
}

// ============================================================================
// Repository implementation
// ============================================================================

/// Note repository backed by the hosted GraphQL store.
///
/// Cloning shares the underlying HTTP client.
#[derive(Debug, Clone)]
pub struct GraphQlNoteRepository {
    client: GraphQLClient,
}

impl GraphQlNoteRepository {
    pub fn new(client: GraphQLClient) -> Self {
        Self { client }
    }

    /// Builds a repository directly from store configuration.
    pub fn from_config(config: &StoreConfig) -> RepoResult<Self> {
        let client = GraphQLClient::new(config)?;
        Ok(Self::new(client))
    }
}

impl NoteRepository for GraphQlNoteRepository {
    fn list_notes(&self, window: PageWindow) -> RepoResult<NotesPage> {
        let data: NotesPageData = self.client.execute(
            "TinyThoughtsQuery",
            NOTES_PAGE_QUERY,
            &PageVariables {
                first: window.first,
                skip: window.skip,
            },
        )?;
        Ok(NotesPage {
            notes: data.notes,
            total_count: data.connection.aggregate.count,
        })
    }

    fn create_note(&self, content: &RichTextDocument) -> RepoResult<NoteHandle> {
        let data: CreateData = self.client.execute(
            "createTinyThought",
            CREATE_NOTE_MUTATION,
            &ContentVariables { content },
        )?;
        let note = data.note.ok_or_else(|| {
            RepoError::InvalidData("create mutation resolved to null".to_string())
        })?;
        Ok(note.into())
    }

    fn update_note(&self, id: &NoteId, content: &RichTextDocument) -> RepoResult<NoteHandle> {
        let data: UpdateData = self.client.execute(
            "updateTinyThought",
            UPDATE_NOTE_MUTATION,
            &UpdateVariables { content, id },
        )?;
        let note = data.note.ok_or_else(|| RepoError::NotFound(id.clone()))?;
        Ok(note.into())
    }

    fn publish_note(&self, id: &NoteId) -> RepoResult<Note> {
        let data: PublishData = self.client.execute(
            "publishTinyThought",
            PUBLISH_NOTE_MUTATION,
            &IdVariables { id },
        )?;
        data.note.ok_or_else(|| RepoError::NotFound(id.clone()))
    }

    fn delete_note(&self, id: &NoteId) -> RepoResult<NoteHandle> {
        let data: DeleteData = self.client.execute(
            "deleteTinyThought",
            DELETE_NOTE_MUTATION,
            &IdVariables { id },
        )?;
        let note = data.note.ok_or_else(|| RepoError::NotFound(id.clone()))?;
        Ok(note.into())
    }
}
