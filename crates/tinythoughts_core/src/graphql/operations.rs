//! Fixed GraphQL operation documents.
//!
//! # Responsibility
//! - Hold the five operation shapes the client issues against the store.
//!
//! # Invariants
//! - The page query orders by `createdAt_DESC`; the client never re-sorts.
//! - Mutations select `content { html }` so callers can confirm the stored
//!   projection without a follow-up read.

/// Offset-paginated page of notes plus the store-side total count.
pub const NOTES_PAGE_QUERY: &str = "\
query TinyThoughtsQuery($first: Int, $skip: Int) {
  tinyThoughts(first: $first, orderBy: createdAt_DESC, skip: $skip) {
    id
    createdAt
    content {
      html
    }
  }
  tinyThoughtsConnection {
    aggregate {
      count
    }
  }
}";

pub const CREATE_NOTE_MUTATION: &str = "\
mutation createTinyThought($content: RichTextAST) {
  createTinyThought(data: { content: $content }) {
    id
    content {
      html
    }
  }
}";

pub const UPDATE_NOTE_MUTATION: &str = "\
mutation updateTinyThought($content: RichTextAST, $id: ID) {
  updateTinyThought(data: { content: $content }, where: { id: $id }) {
    id
    content {
      html
    }
  }
}";

/// Finalizes a note's current content as its queryable version.
pub const PUBLISH_NOTE_MUTATION: &str = "\
mutation publishTinyThought($id: ID) {
  publishTinyThought(where: { id: $id }) {
    id
    createdAt
    content {
      html
    }
  }
}";

pub const DELETE_NOTE_MUTATION: &str = "\
mutation deleteTinyThought($id: ID) {
  deleteTinyThought(where: { id: $id }) {
    id
    content {
      html
    }
  }
}";
