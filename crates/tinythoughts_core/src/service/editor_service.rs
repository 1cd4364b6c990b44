//! Note editor workflows.
//!
//! # Responsibility
//! - Model one note's display/edit lifecycle and its mutation workflows.
//! - Enforce the sequential update-then-publish and create-then-publish
//!   chains with failure short-circuits.
//!
//! # Invariants
//! - Publish is never issued after a failed update or create.
//! - A new note's draft is cleared only after its publish succeeds.
//! - A failed mutation leaves the editor in `Edit` mode for manual retry;
//!   there is no automatic retry.
//! - While a workflow is in flight the editor rejects further submissions.

use crate::model::note::{Note, NoteId};
use crate::repo::note_repo::{NoteHandle, NoteRepository, RepoError};
use crate::richtext::html_to_document;
use log::error;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Generic user-facing failure message; diagnostics go to the log.
pub const EDITOR_ERROR_MESSAGE: &str = "Error while updating or fetching";

/// Presentation mode of one note editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    /// Read-only render of the stored HTML.
    Display,
    /// Interactive editing with action buttons.
    Edit,
}

pub type EditorResult<T> = Result<T, EditorError>;

/// Editor workflow failure.
#[derive(Debug)]
pub enum EditorError {
    /// Another workflow is still in flight for this editor.
    Busy,
    /// The note has no stored id yet; save/delete require one.
    Unsaved,
    /// The note already exists; `add` only applies to drafts.
    AlreadyCreated,
    /// A store mutation failed; the chain stopped at `operation`.
    MutationFailed {
        operation: &'static str,
        source: RepoError,
    },
}

impl Display for EditorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Busy => write!(f, "a mutation is already in flight"),
            Self::Unsaved => write!(f, "note has not been saved yet"),
            Self::AlreadyCreated => write!(f, "note already exists in the store"),
            Self::MutationFailed { operation, source } => {
                write!(f, "{operation} failed: {source}")
            }
        }
    }
}

impl Error for EditorError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::MutationFailed { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Editor for one note, existing or drafted.
///
/// Mirrors the two item presentations of the client: an existing note opens
/// in `Display` mode, a new unsaved note opens in `Edit` mode.
pub struct NoteEditor<R: NoteRepository> {
    repo: R,
    note_id: Option<NoteId>,
    mode: EditorMode,
    draft_html: String,
    busy: bool,
    failed: bool,
}

impl<R: NoteRepository> NoteEditor<R> {
    /// Editor over an existing stored note; opens read-only.
    pub fn for_existing(repo: R, id: NoteId, html: impl Into<String>) -> Self {
        Self {
            repo,
            note_id: Some(id),
            mode: EditorMode::Display,
            draft_html: html.into(),
            busy: false,
            failed: false,
        }
    }

    /// Editor for a new unsaved note; opens editable with an empty draft.
    pub fn for_new(repo: R) -> Self {
        Self {
            repo,
            note_id: None,
            mode: EditorMode::Edit,
            draft_html: String::new(),
            busy: false,
            failed: false,
        }
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn note_id(&self) -> Option<&NoteId> {
        self.note_id.as_ref()
    }

    pub fn draft_html(&self) -> &str {
        &self.draft_html
    }

    /// Busy latch covering the current mutation workflow.
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn has_error(&self) -> bool {
        self.failed
    }

    /// Generic message for display when the last workflow failed.
    pub fn error_message(&self) -> Option<&'static str> {
        self.failed.then_some(EDITOR_ERROR_MESSAGE)
    }

    /// Replaces the draft content (editor change callback).
    pub fn set_draft(&mut self, html: impl Into<String>) {
        self.draft_html = html.into();
    }

    pub fn open_edit(&mut self) {
        self.mode = EditorMode::Edit;
    }

    /// Leaves edit mode without saving.
    pub fn close_edit(&mut self) {
        self.mode = EditorMode::Display;
    }

    /// Saves the draft: update, then publish, then return to display mode.
    ///
    /// # Errors
    /// - `Unsaved` when the editor has no note id.
    /// - `Busy` when a workflow is already in flight.
    /// - `MutationFailed` at the step that failed; publish is not attempted
    ///   after a failed update, and the editor stays in `Edit` mode.
    pub fn save(&mut self) -> EditorResult<Note> {
        let id = match &self.note_id {
            Some(id) => id.clone(),
            None => return Err(EditorError::Unsaved),
        };
        self.begin()?;
        let result = self.run_save(&id);
        self.busy = false;
        match result {
            Ok(note) => {
                self.mode = EditorMode::Display;
                Ok(note)
            }
            Err(err) => self.fail(err),
        }
    }

    /// Creates and publishes a new note from the draft, then clears it.
    ///
    /// # Errors
    /// - `AlreadyCreated` when the editor already has a note id.
    /// - `Busy` when a workflow is already in flight.
    /// - `MutationFailed` at the step that failed; publish is not attempted
    ///   after a failed create, and the draft is retained for retry.
    pub fn add(&mut self) -> EditorResult<Note> {
        if self.note_id.is_some() {
            return Err(EditorError::AlreadyCreated);
        }
        self.begin()?;
        let result = self.run_add();
        self.busy = false;
        match result {
            Ok(note) => {
                self.draft_html.clear();
                Ok(note)
            }
            Err(err) => self.fail(err),
        }
    }

    /// Deletes the stored note. Callers refresh the feed afterwards so the
    /// note disappears from the visible collection.
    pub fn delete(&mut self) -> EditorResult<NoteHandle> {
        let id = match &self.note_id {
            Some(id) => id.clone(),
            None => return Err(EditorError::Unsaved),
        };
        self.begin()?;
        let result = self
            .repo
            .delete_note(&id)
            .map_err(|source| EditorError::MutationFailed {
                operation: "delete",
                source,
            });
        self.busy = false;
        match result {
            Ok(handle) => Ok(handle),
            Err(err) => self.fail(err),
        }
    }

    fn run_save(&mut self, id: &NoteId) -> EditorResult<Note> {
        let document = html_to_document(&self.draft_html);
        let updated = self
            .repo
            .update_note(id, &document)
            .map_err(|source| EditorError::MutationFailed {
                operation: "update",
                source,
            })?;
        self.repo
            .publish_note(&updated.id)
            .map_err(|source| EditorError::MutationFailed {
                operation: "publish",
                source,
            })
    }

    fn run_add(&mut self) -> EditorResult<Note> {
        let document = html_to_document(&self.draft_html);
        let created = self
            .repo
            .create_note(&document)
            .map_err(|source| EditorError::MutationFailed {
                operation: "create",
                source,
            })?;
        self.repo
            .publish_note(&created.id)
            .map_err(|source| EditorError::MutationFailed {
                operation: "publish",
                source,
            })
    }

    fn begin(&mut self) -> EditorResult<()> {
        if self.busy {
            return Err(EditorError::Busy);
        }
        self.busy = true;
        self.failed = false;
        Ok(())
    }

    fn fail<T>(&mut self, err: EditorError) -> EditorResult<T> {
        self.failed = true;
        error!("event=note_mutation module=editor status=error error={err}");
        Err(err)
    }
}
