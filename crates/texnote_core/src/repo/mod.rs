//! Repository layer: note persistence contract and SQLite implementation.
//!
//! # Invariants
//! - Writes re-check required fields before touching SQL.
//! - Missing rows surface as `RepoError::NotFound`, distinct from transport
//!   errors.

pub mod note_repo;
