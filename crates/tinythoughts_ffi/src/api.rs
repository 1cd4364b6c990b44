//! FFI use-case API for the mobile shell.
//!
//! # Responsibility
//! - Expose stable, use-case-level functions to Dart via FRB.
//! - Own the process-global feed bound to the configured remote store.
//! - Refresh the feed after each successful mutation so the visible list
//!   always reflects store state.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Error envelopes carry a generic message; detail stays in the log.

use log::error;
use std::sync::{Mutex, OnceLock};
use tinythoughts_core::{
    core_version as core_version_inner, derive_html_preview, init_logging as init_logging_inner,
    ping as ping_inner, GraphQlNoteRepository, NoteEditor, NoteFeed, NoteId, NoteRepository,
    StoreConfig,
};

static FEED_STATE: OnceLock<Mutex<Option<FeedState>>> = OnceLock::new();

struct FeedState {
    feed: NoteFeed<GraphQlNoteRepository>,
    repo: GraphQlNoteRepository,
}

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// # FFI contract
/// - Sync call; may perform small file-system setup work.
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on
///   failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// One feed row for list rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedItem {
    /// Stable note id in string form.
    pub note_id: String,
    /// Server-assigned ISO-8601 creation timestamp.
    pub created_at: String,
    /// Stored HTML for read-only display.
    pub html: String,
    /// Derived plain-text preview (empty when the note is blank).
    pub preview: String,
}

/// Feed envelope for list rendering and scroll decisions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedResponse {
    /// Whether the operation succeeded.
    pub ok: bool,
    /// Held notes in store order.
    pub items: Vec<FeedItem>,
    /// Store-reported total, when a fetch has completed.
    pub total_count: Option<u64>,
    /// Whether another `feed_load_more` call would fetch.
    pub has_more: bool,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

/// Generic action response envelope for note mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionResponse {
    /// Whether the operation succeeded.
    pub ok: bool,
    /// Note id the operation resolved to, when available.
    pub note_id: Option<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl ActionResponse {
    fn success(message: impl Into<String>, note_id: String) -> Self {
        Self {
            ok: true,
            note_id: Some(note_id),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            note_id: None,
            message: message.into(),
        }
    }
}

/// Fetches the first page of notes.
///
/// # FFI contract
/// - Sync call performing one blocking network round trip.
/// - Never panics; failures produce an `ok=false` envelope.
#[flutter_rust_bridge::frb(sync)]
pub fn feed_load_initial() -> FeedResponse {
    run_feed_call(|feed| feed.load_initial().map(|_| "Loaded.".to_string()))
}

/// Fetches the next page when the store holds more notes.
///
/// # FFI contract
/// - Sync call; issues no network traffic when the feed is complete.
/// - Never panics; failures produce an `ok=false` envelope.
#[flutter_rust_bridge::frb(sync)]
pub fn feed_load_more() -> FeedResponse {
    run_feed_call(|feed| feed.load_more().map(|_| "Loaded.".to_string()))
}

/// Replaces the held collection with a fresh first page.
///
/// # FFI contract
/// - Sync call performing one blocking network round trip.
/// - Never panics; failures produce an `ok=false` envelope.
#[flutter_rust_bridge::frb(sync)]
pub fn feed_refresh() -> FeedResponse {
    run_feed_call(|feed| feed.refresh().map(|_| "Refreshed.".to_string()))
}

/// Saves edited note content: update, then publish, then refresh the feed.
///
/// # FFI contract
/// - Sync call performing up to three blocking round trips.
/// - Never panics; failures produce an `ok=false` envelope with a generic
///   message.
#[flutter_rust_bridge::frb(sync)]
pub fn entry_save_note(note_id: String, html: String) -> ActionResponse {
    with_state(|state| {
        let mut editor = NoteEditor::for_existing(state.repo.clone(), NoteId::new(note_id), html);
        editor.open_edit();
        match editor.save() {
            Ok(note) => {
                refresh_after_mutation(state);
                ActionResponse::success("Note saved.", note.id.to_string())
            }
            Err(err) => {
                error!("event=entry_save module=ffi status=error error={err}");
                ActionResponse::failure(editor_failure_message())
            }
        }
    })
    .unwrap_or_else(ActionResponse::failure)
}

/// Creates and publishes a new note, then refreshes the feed.
///
/// # FFI contract
/// - Sync call performing up to three blocking round trips.
/// - Never panics; failures produce an `ok=false` envelope with a generic
///   message.
#[flutter_rust_bridge::frb(sync)]
pub fn entry_add_note(html: String) -> ActionResponse {
    with_state(|state| {
        let mut editor = NoteEditor::for_new(state.repo.clone());
        editor.set_draft(html);
        match editor.add() {
            Ok(note) => {
                refresh_after_mutation(state);
                ActionResponse::success("Note added.", note.id.to_string())
            }
            Err(err) => {
                error!("event=entry_add module=ffi status=error error={err}");
                ActionResponse::failure(editor_failure_message())
            }
        }
    })
    .unwrap_or_else(ActionResponse::failure)
}

/// Deletes a note, then refreshes the feed so it disappears from the list.
///
/// # FFI contract
/// - Sync call performing up to two blocking round trips.
/// - Never panics; failures produce an `ok=false` envelope with a generic
///   message.
#[flutter_rust_bridge::frb(sync)]
pub fn entry_delete_note(note_id: String) -> ActionResponse {
    with_state(|state| {
        let id = NoteId::new(note_id);
        let mut editor = NoteEditor::for_existing(state.repo.clone(), id, String::new());
        match editor.delete() {
            Ok(handle) => {
                refresh_after_mutation(state);
                ActionResponse::success("Note deleted.", handle.id.to_string())
            }
            Err(err) => {
                error!("event=entry_delete module=ffi status=error error={err}");
                ActionResponse::failure(editor_failure_message())
            }
        }
    })
    .unwrap_or_else(ActionResponse::failure)
}

fn editor_failure_message() -> String {
    tinythoughts_core::EDITOR_ERROR_MESSAGE.to_string()
}

/// Runs one feed operation and renders the resulting envelope.
fn run_feed_call(
    f: impl FnOnce(&mut NoteFeed<GraphQlNoteRepository>) -> Result<String, tinythoughts_core::RepoError>,
) -> FeedResponse {
    let outcome = with_state(|state| match f(&mut state.feed) {
        Ok(message) => to_feed_response(&state.feed, true, message),
        Err(err) => {
            error!("event=feed_call module=ffi status=error error={err}");
            to_feed_response(&state.feed, false, editor_failure_message())
        }
    });
    outcome.unwrap_or_else(|message| FeedResponse {
        ok: false,
        items: Vec::new(),
        total_count: None,
        has_more: false,
        message,
    })
}

/// The list query cache is shared; every successful mutation triggers a full
/// refetch instead of a targeted patch. A failed refetch only logs: the
/// mutation itself succeeded and the next feed call will retry the fetch.
fn refresh_after_mutation(state: &mut FeedState) {
    if let Err(err) = state.feed.refresh() {
        error!("event=feed_refresh module=ffi status=error error={err}");
    }
}

fn to_feed_response<R: NoteRepository>(
    feed: &NoteFeed<R>,
    ok: bool,
    message: String,
) -> FeedResponse {
    let items = feed
        .notes()
        .iter()
        .map(|note| FeedItem {
            note_id: note.id.to_string(),
            created_at: note.created_at.clone(),
            html: note.content.html.clone(),
            preview: derive_html_preview(&note.content.html).unwrap_or_default(),
        })
        .collect();
    FeedResponse {
        ok,
        items,
        total_count: feed.total_count().map(|count| count as u64),
        has_more: feed.has_more(),
        message,
    }
}

/// Resolves the process-global feed state, constructing it on first use from
/// environment configuration.
fn with_state<T>(f: impl FnOnce(&mut FeedState) -> T) -> Result<T, String> {
    let cell = FEED_STATE.get_or_init(|| Mutex::new(None));
    let mut guard = cell
        .lock()
        .map_err(|_| "feed state lock poisoned".to_string())?;

    if guard.is_none() {
        let config =
            StoreConfig::from_env().map_err(|err| format!("store config invalid: {err}"))?;
        let repo = GraphQlNoteRepository::from_config(&config)
            .map_err(|err| format!("store client init failed: {err}"))?;
        let feed = NoteFeed::new(repo.clone(), config.page_size);
        *guard = Some(FeedState { feed, repo });
    }

    match guard.as_mut() {
        Some(state) => Ok(f(state)),
        None => Err("feed state unavailable".to_string()),
    }
}
