use std::cell::Cell;
use std::rc::Rc;

use tinythoughts_core::{
    EditorError, EditorMode, InMemoryNoteRepository, Note, NoteEditor, NoteHandle, NoteId,
    NoteRepository, NotesPage, PageWindow, RepoError, RepoResult, RichTextDocument,
};

/// Repository wrapper with per-operation failure injection.
#[derive(Clone)]
struct FlakyRepo {
    inner: InMemoryNoteRepository,
    fail_create: Rc<Cell<bool>>,
    fail_update: Rc<Cell<bool>>,
    fail_publish: Rc<Cell<bool>>,
    publish_calls: Rc<Cell<usize>>,
}

impl FlakyRepo {
    fn new(inner: InMemoryNoteRepository) -> Self {
        Self {
            inner,
            fail_create: Rc::new(Cell::new(false)),
            fail_update: Rc::new(Cell::new(false)),
            fail_publish: Rc::new(Cell::new(false)),
            publish_calls: Rc::new(Cell::new(0)),
        }
    }

    fn injected() -> RepoError {
        RepoError::InvalidData("injected failure".to_string())
    }
}

impl NoteRepository for FlakyRepo {
    fn list_notes(&self, window: PageWindow) -> RepoResult<NotesPage> {
        self.inner.list_notes(window)
    }

    fn create_note(&self, content: &RichTextDocument) -> RepoResult<NoteHandle> {
        if self.fail_create.get() {
            return Err(Self::injected());
        }
        self.inner.create_note(content)
    }

    fn update_note(&self, id: &NoteId, content: &RichTextDocument) -> RepoResult<NoteHandle> {
        if self.fail_update.get() {
            return Err(Self::injected());
        }
        self.inner.update_note(id, content)
    }

    fn publish_note(&self, id: &NoteId) -> RepoResult<Note> {
        self.publish_calls.set(self.publish_calls.get() + 1);
        if self.fail_publish.get() {
            return Err(Self::injected());
        }
        self.inner.publish_note(id)
    }

    fn delete_note(&self, id: &NoteId) -> RepoResult<NoteHandle> {
        self.inner.delete_note(id)
    }
}

/// Creates and publishes one note, returning its id.
fn seed_note(repo: &InMemoryNoteRepository, text: &str) -> NoteId {
    let handle = repo
        .create_note(&RichTextDocument::plain_text(text))
        .expect("create succeeds");
    repo.publish_note(&handle.id).expect("publish succeeds");
    handle.id
}

fn published_htmls(repo: &InMemoryNoteRepository) -> Vec<String> {
    repo.list_notes(PageWindow { first: 50, skip: 0 })
        .expect("list succeeds")
        .notes
        .into_iter()
        .map(|note| note.content.html)
        .collect()
}

#[test]
fn save_updates_then_publishes_the_new_content() {
    let store = InMemoryNoteRepository::new();
    let id = seed_note(&store, "a");

    let mut editor = NoteEditor::for_existing(store.clone(), id, "<p>a</p>");
    assert_eq!(editor.mode(), EditorMode::Display);
    editor.open_edit();
    editor.set_draft("<p>b</p>");

    let published = editor.save().expect("save succeeds");
    assert_eq!(published.content.html, "<p>b</p>");
    assert_eq!(editor.mode(), EditorMode::Display);
    assert!(!editor.is_busy());
    assert!(!editor.has_error());
    assert_eq!(published_htmls(&store), vec!["<p>b</p>".to_string()]);
}

#[test]
fn failed_update_short_circuits_before_publish() {
    let store = InMemoryNoteRepository::new();
    let id = seed_note(&store, "a");
    let repo = FlakyRepo::new(store.clone());
    repo.fail_update.set(true);

    let mut editor = NoteEditor::for_existing(repo.clone(), id, "<p>a</p>");
    editor.open_edit();
    editor.set_draft("<p>b</p>");

    let error = editor.save().expect_err("save fails");
    assert!(matches!(
        error,
        EditorError::MutationFailed { operation: "update", .. }
    ));
    assert_eq!(repo.publish_calls.get(), 0);
    assert_eq!(editor.mode(), EditorMode::Edit);
    assert!(editor.has_error());
    assert!(!editor.is_busy());
    // Stored content is untouched.
    assert_eq!(published_htmls(&store), vec!["<p>a</p>".to_string()]);
}

#[test]
fn failed_publish_keeps_editor_in_edit_mode() {
    let store = InMemoryNoteRepository::new();
    let id = seed_note(&store, "a");
    let repo = FlakyRepo::new(store.clone());
    repo.fail_publish.set(true);

    let mut editor = NoteEditor::for_existing(repo, id, "<p>a</p>");
    editor.open_edit();
    editor.set_draft("<p>b</p>");

    let error = editor.save().expect_err("save fails");
    assert!(matches!(
        error,
        EditorError::MutationFailed { operation: "publish", .. }
    ));
    assert_eq!(editor.mode(), EditorMode::Edit);
    // The update went through but was never published.
    assert_eq!(published_htmls(&store), vec!["<p>a</p>".to_string()]);
}

#[test]
fn add_creates_publishes_and_clears_the_draft() {
    let store = InMemoryNoteRepository::new();
    let mut editor = NoteEditor::for_new(store.clone());
    assert_eq!(editor.mode(), EditorMode::Edit);
    editor.set_draft("<p>hello</p>");

    let published = editor.add().expect("add succeeds");
    assert_eq!(published.content.html, "<p>hello</p>");
    assert_eq!(editor.draft_html(), "");
    assert_eq!(published_htmls(&store), vec!["<p>hello</p>".to_string()]);
}

#[test]
fn failed_create_short_circuits_before_publish_and_keeps_draft() {
    let repo = FlakyRepo::new(InMemoryNoteRepository::new());
    repo.fail_create.set(true);

    let mut editor = NoteEditor::for_new(repo.clone());
    editor.set_draft("<p>hello</p>");

    let error = editor.add().expect_err("add fails");
    assert!(matches!(
        error,
        EditorError::MutationFailed { operation: "create", .. }
    ));
    assert_eq!(repo.publish_calls.get(), 0);
    assert_eq!(editor.draft_html(), "<p>hello</p>");
    assert!(editor.has_error());
}

#[test]
fn draft_is_cleared_only_after_publish_succeeds() {
    let store = InMemoryNoteRepository::new();
    let repo = FlakyRepo::new(store.clone());
    repo.fail_publish.set(true);

    let mut editor = NoteEditor::for_new(repo.clone());
    editor.set_draft("<p>hello</p>");

    editor.add().expect_err("publish fails");
    assert_eq!(editor.draft_html(), "<p>hello</p>");
    assert_eq!(published_htmls(&store), Vec::<String>::new());

    repo.fail_publish.set(false);
    editor.add().expect("retry succeeds");
    assert_eq!(editor.draft_html(), "");
}

#[test]
fn delete_removes_the_note_from_the_store() {
    let store = InMemoryNoteRepository::new();
    let keep = seed_note(&store, "keep");
    let doomed = seed_note(&store, "drop");

    let mut editor = NoteEditor::for_existing(store.clone(), doomed, "<p>drop</p>");
    let handle = editor.delete().expect("delete succeeds");
    assert_eq!(handle.html, "<p>drop</p>");

    let page = store
        .list_notes(PageWindow { first: 10, skip: 0 })
        .expect("list succeeds");
    assert_eq!(page.total_count, 1);
    assert_eq!(page.notes[0].id, keep);
}

#[test]
fn draft_editors_reject_save_and_delete() {
    let store = InMemoryNoteRepository::new();
    let mut editor = NoteEditor::for_new(store);
    assert!(matches!(editor.save(), Err(EditorError::Unsaved)));
    assert!(matches!(editor.delete(), Err(EditorError::Unsaved)));
}

#[test]
fn existing_note_editors_reject_add() {
    let store = InMemoryNoteRepository::new();
    let id = seed_note(&store, "a");
    let mut editor = NoteEditor::for_existing(store, id, "<p>a</p>");
    assert!(matches!(editor.add(), Err(EditorError::AlreadyCreated)));
}

#[test]
fn error_flag_clears_on_the_next_successful_workflow() {
    let store = InMemoryNoteRepository::new();
    let id = seed_note(&store, "a");
    let repo = FlakyRepo::new(store);
    repo.fail_update.set(true);

    let mut editor = NoteEditor::for_existing(repo.clone(), id, "<p>a</p>");
    editor.open_edit();
    editor.set_draft("<p>b</p>");
    editor.save().expect_err("save fails");
    assert!(editor.has_error());
    assert!(editor.error_message().is_some());

    repo.fail_update.set(false);
    editor.save().expect("retry succeeds");
    assert!(!editor.has_error());
    assert_eq!(editor.error_message(), None);
}
