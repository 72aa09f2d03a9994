//! Domain model for notes and feedback.
//!
//! # Responsibility
//! - Define the note record persisted by the store.
//! - Define the validated feedback payload.
//! - Keep input normalization rules next to the data they guard.
//!
//! # Invariants
//! - Every note is identified by a stable, store-unique `NoteId`.
//! - Deletion is a hard delete; there are no tombstones.

pub mod feedback;
pub mod note;
