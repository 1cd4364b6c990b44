//! Core domain logic for Tiny Thoughts.
//! This crate is the single source of truth for client-side note behavior.

pub mod config;
pub mod graphql;
pub mod logging;
pub mod model;
pub mod repo;
pub mod richtext;
pub mod service;

pub use config::{normalize_page_size, ConfigError, StoreConfig, DEFAULT_PAGE_SIZE};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::document::{DocumentNode, ElementKind, ElementNode, RichTextDocument, TextNode};
pub use model::note::{Note, NoteContent, NoteId};
pub use repo::memory::InMemoryNoteRepository;
pub use repo::note_repo::{
    NoteHandle, NoteRepository, NotesPage, PageWindow, RepoError, RepoResult,
};
pub use repo::remote::GraphQlNoteRepository;
pub use richtext::{derive_html_preview, html_to_document};
pub use service::editor_service::{
    EditorError, EditorMode, EditorResult, NoteEditor, EDITOR_ERROR_MESSAGE,
};
pub use service::feed_service::{FeedProgress, NoteFeed};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
