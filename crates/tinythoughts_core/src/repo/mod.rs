//! Repository layer abstractions and store implementations.
//!
//! # Responsibility
//! - Define the use-case oriented data access contract for notes.
//! - Isolate GraphQL wire details from service orchestration.
//!
//! # Invariants
//! - Repository APIs return semantic errors (`NotFound`) in addition to
//!   transport errors.
//! - List results preserve store ordering; no implementation re-sorts.

pub mod memory;
pub mod note_repo;
pub mod remote;
