use std::cell::Cell;
use std::rc::Rc;

use tinythoughts_core::{
    FeedProgress, InMemoryNoteRepository, NoteFeed, NoteHandle, NoteRepository, NotesPage,
    PageWindow, RepoResult, RichTextDocument,
};

/// Repository wrapper counting the list fetches a feed issues.
#[derive(Clone)]
struct CountingRepo {
    inner: InMemoryNoteRepository,
    list_calls: Rc<Cell<usize>>,
}

impl CountingRepo {
    fn new(inner: InMemoryNoteRepository) -> Self {
        Self {
            inner,
            list_calls: Rc::new(Cell::new(0)),
        }
    }

    fn list_calls(&self) -> usize {
        self.list_calls.get()
    }
}

impl NoteRepository for CountingRepo {
    fn list_notes(&self, window: PageWindow) -> RepoResult<NotesPage> {
        self.list_calls.set(self.list_calls.get() + 1);
        self.inner.list_notes(window)
    }

    fn create_note(&self, content: &RichTextDocument) -> RepoResult<NoteHandle> {
        self.inner.create_note(content)
    }

    fn update_note(
        &self,
        id: &tinythoughts_core::NoteId,
        content: &RichTextDocument,
    ) -> RepoResult<NoteHandle> {
        self.inner.update_note(id, content)
    }

    fn publish_note(&self, id: &tinythoughts_core::NoteId) -> RepoResult<tinythoughts_core::Note> {
        self.inner.publish_note(id)
    }

    fn delete_note(&self, id: &tinythoughts_core::NoteId) -> RepoResult<NoteHandle> {
        self.inner.delete_note(id)
    }
}

fn seed_notes(repo: &InMemoryNoteRepository, count: usize) {
    for index in 0..count {
        let handle = repo
            .create_note(&RichTextDocument::plain_text(format!("note {index}")))
            .expect("create succeeds");
        repo.publish_note(&handle.id).expect("publish succeeds");
    }
}

#[test]
fn twenty_five_notes_paginate_in_three_fetches_then_stop() {
    let store = InMemoryNoteRepository::new();
    seed_notes(&store, 25);
    let repo = CountingRepo::new(store);
    let mut feed = NoteFeed::new(repo.clone(), 10);

    assert_eq!(feed.load_initial().expect("initial load"), FeedProgress::Loaded(10));
    assert_eq!(feed.len(), 10);

    assert_eq!(feed.load_more().expect("second page"), FeedProgress::Loaded(10));
    assert_eq!(feed.len(), 20);

    assert_eq!(feed.load_more().expect("final page"), FeedProgress::Loaded(5));
    assert_eq!(feed.len(), 25);
    assert_eq!(feed.total_count(), Some(25));

    // ceil(25 / 10) = 3 fetches; the fourth call must not reach the store.
    assert_eq!(feed.load_more().expect("no-op"), FeedProgress::UpToDate);
    assert_eq!(repo.list_calls(), 3);
    assert!(!feed.has_more());
}

#[test]
fn termination_uses_exact_count_not_modulo() {
    let store = InMemoryNoteRepository::new();
    seed_notes(&store, 20);
    let repo = CountingRepo::new(store);
    let mut feed = NoteFeed::new(repo.clone(), 10);

    feed.load_initial().expect("initial load");
    // 10 held of 20: a full page boundary, but more remain. A modulo check
    // would wrongly report completion here.
    assert!(feed.has_more());
    assert_eq!(feed.load_more().expect("second page"), FeedProgress::Loaded(10));

    assert_eq!(feed.load_more().expect("no-op"), FeedProgress::UpToDate);
    assert_eq!(repo.list_calls(), 2);
}

#[test]
fn load_more_before_initial_fetches_the_first_page() {
    let store = InMemoryNoteRepository::new();
    seed_notes(&store, 5);
    let mut feed = NoteFeed::new(store, 10);

    assert_eq!(feed.load_more().expect("first fetch"), FeedProgress::Loaded(5));
    assert_eq!(feed.len(), 5);
}

#[test]
fn refresh_replaces_held_notes_with_exactly_the_first_page() {
    let store = InMemoryNoteRepository::new();
    seed_notes(&store, 25);
    let repo = CountingRepo::new(store.clone());
    let mut feed = NoteFeed::new(repo, 10);

    feed.load_initial().expect("initial load");
    feed.load_more().expect("second page");
    assert_eq!(feed.len(), 20);

    feed.refresh().expect("refresh");
    assert_eq!(feed.len(), 10);
    assert_eq!(feed.pages_requested(), 1);

    let first_page = store
        .list_notes(PageWindow { first: 10, skip: 0 })
        .expect("direct list");
    let held: Vec<_> = feed.notes().iter().map(|note| note.id.clone()).collect();
    let expected: Vec<_> = first_page.notes.iter().map(|note| note.id.clone()).collect();
    assert_eq!(held, expected);
}

#[test]
fn refresh_surfaces_notes_added_since_the_last_fetch() {
    let store = InMemoryNoteRepository::new();
    seed_notes(&store, 10);
    let mut feed = NoteFeed::new(store.clone(), 10);
    feed.load_initial().expect("initial load");

    let handle = store
        .create_note(&RichTextDocument::plain_text("latest"))
        .expect("create succeeds");
    store.publish_note(&handle.id).expect("publish succeeds");

    feed.refresh().expect("refresh");
    assert_eq!(feed.notes()[0].id, handle.id);
    assert_eq!(feed.total_count(), Some(11));
}

#[test]
fn overlapping_fetches_do_not_duplicate_notes() {
    let store = InMemoryNoteRepository::new();
    seed_notes(&store, 10);
    let mut feed = NoteFeed::new(store, 10);

    assert_eq!(feed.load_initial().expect("first load"), FeedProgress::Loaded(10));
    // A second fetch of the same window merges by id and appends nothing.
    assert_eq!(feed.load_initial().expect("repeat load"), FeedProgress::Loaded(0));
    assert_eq!(feed.len(), 10);
}

#[test]
fn empty_store_completes_after_one_fetch() {
    let repo = CountingRepo::new(InMemoryNoteRepository::new());
    let mut feed = NoteFeed::new(repo.clone(), 10);

    assert_eq!(feed.load_initial().expect("initial load"), FeedProgress::Loaded(0));
    assert!(feed.is_empty());
    assert!(!feed.has_more());
    assert_eq!(feed.load_more().expect("no-op"), FeedProgress::UpToDate);
    assert_eq!(repo.list_calls(), 1);
}

#[test]
fn held_order_matches_store_order_across_pages() {
    let store = InMemoryNoteRepository::new();
    seed_notes(&store, 6);
    let mut feed = NoteFeed::new(store.clone(), 2);

    feed.load_initial().expect("initial load");
    feed.load_more().expect("second page");
    feed.load_more().expect("third page");

    let all = store
        .list_notes(PageWindow { first: 6, skip: 0 })
        .expect("direct list");
    let held: Vec<_> = feed.notes().iter().map(|note| note.id.clone()).collect();
    let expected: Vec<_> = all.notes.iter().map(|note| note.id.clone()).collect();
    assert_eq!(held, expected);
}
