//! Note domain model.
//!
//! # Invariants
//! - Every persisted note is identified by a stable `NoteId`.
//! - Persisted title and subject are never blank.

pub mod note;
