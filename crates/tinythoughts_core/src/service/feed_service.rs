//! Note feed pagination service.
//!
//! # Responsibility
//! - Own page-window state and the merged, ordered note collection.
//! - Decide when another fetch is needed and when the feed is complete.
//!
//! # Invariants
//! - Held order is arrival order; the store's sort is never re-applied
//!   locally.
//! - Merging is idempotent by note id, so overlapping fetches cannot
//!   duplicate entries.
//! - Completion is decided by exact equality against the store-reported
//!   total, never by modulo arithmetic.

use crate::model::note::{Note, NoteId};
use crate::repo::note_repo::{NoteRepository, PageWindow, RepoResult};
use log::info;
use std::collections::HashSet;

/// Outcome of one feed operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedProgress {
    /// A page was fetched; carries the count of newly appended notes.
    Loaded(usize),
    /// Every store note is already held; no fetch was issued.
    UpToDate,
}

/// Paginated view over the store's note collection.
///
/// The repository is injected so the same feed logic runs against the remote
/// store and the in-memory stand-in.
pub struct NoteFeed<R: NoteRepository> {
    repo: R,
    page_size: u32,
    pages_requested: u32,
    total_count: Option<usize>,
    /// Set when a fetch returns an empty page; guards against a total count
    /// that drifted upward after the fetch sequence began.
    complete: bool,
    notes: Vec<Note>,
    held_ids: HashSet<NoteId>,
}

impl<R: NoteRepository> NoteFeed<R> {
    /// Creates an empty feed; nothing is fetched until `load_initial`.
    pub fn new(repo: R, page_size: u32) -> Self {
        Self {
            repo,
            page_size: page_size.max(1),
            pages_requested: 0,
            total_count: None,
            complete: false,
            notes: Vec::new(),
            held_ids: HashSet::new(),
        }
    }

    /// Fetches the first page and merges it into the held collection.
    pub fn load_initial(&mut self) -> RepoResult<FeedProgress> {
        self.fetch_page(0).map(FeedProgress::Loaded)
    }

    /// Fetches the next page window unless the feed already holds every note.
    ///
    /// The no-op path issues no repository call at all; callers can invoke
    /// this freely from scroll handlers.
    pub fn load_more(&mut self) -> RepoResult<FeedProgress> {
        if self.is_up_to_date() {
            info!(
                "event=feed_fetch module=feed status=skip held={} total={:?}",
                self.notes.len(),
                self.total_count
            );
            return Ok(FeedProgress::UpToDate);
        }
        let skip = self.page_size * self.pages_requested;
        self.fetch_page(skip).map(FeedProgress::Loaded)
    }

    /// Refetches the first page and replaces the held collection with it.
    ///
    /// On failure the previously held collection is left untouched.
    pub fn refresh(&mut self) -> RepoResult<FeedProgress> {
        let window = PageWindow {
            first: self.page_size,
            skip: 0,
        };
        let page = self.repo.list_notes(window)?;
        info!(
            "event=feed_refresh module=feed status=ok fetched={} total={}",
            page.notes.len(),
            page.total_count
        );
        self.total_count = Some(page.total_count);
        self.complete = page.notes.is_empty();
        self.held_ids = page.notes.iter().map(|note| note.id.clone()).collect();
        let fetched = page.notes.len();
        self.notes = page.notes;
        self.pages_requested = 1;
        Ok(FeedProgress::Loaded(fetched))
    }

    /// Notes in arrival order (store-sorted, newest first).
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Store-reported total from the most recent fetch, if any.
    pub fn total_count(&self) -> Option<usize> {
        self.total_count
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn pages_requested(&self) -> u32 {
        self.pages_requested
    }

    /// Whether a `load_more` call would issue a fetch.
    pub fn has_more(&self) -> bool {
        !self.is_up_to_date()
    }

    fn is_up_to_date(&self) -> bool {
        if self.complete {
            return true;
        }
        match self.total_count {
            // Exact equality: a modulo check would wrongly stop after any
            // full page even when more notes remain.
            Some(total) => self.notes.len() == total,
            None => false,
        }
    }

    fn fetch_page(&mut self, skip: u32) -> RepoResult<usize> {
        let window = PageWindow {
            first: self.page_size,
            skip,
        };
        let page = self.repo.list_notes(window)?;
        self.total_count = Some(page.total_count);
        if page.notes.is_empty() {
            self.complete = true;
        }

        let fetched = page.notes.len();
        let mut appended = 0;
        for note in page.notes {
            if self.held_ids.insert(note.id.clone()) {
                self.notes.push(note);
                appended += 1;
            }
        }
        self.pages_requested += 1;

        info!(
            "event=feed_fetch module=feed status=ok skip={skip} fetched={fetched} appended={appended} held={} total={}",
            self.notes.len(),
            page.total_count
        );
        Ok(appended)
    }
}
