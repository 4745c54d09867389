//! Core domain logic for TexNote.
//! This crate is the single source of truth for note invariants, LaTeX
//! preview rendering and editor toolbar behavior.

pub mod db;
pub mod editor;
pub mod logging;
pub mod model;
pub mod render;
pub mod repo;
pub mod service;

pub use editor::cursor::{CursorError, CursorState, Selection};
pub use editor::palette::{symbols_for, Symbol, SymbolKind, SymbolTab};
pub use editor::session::{EditorSession, SessionError};
pub use editor::toolbar::{insert_template, toggle_math_environment, Toolbar};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::note::{
    parse_note_id, NewNote, Note, NoteId, NoteIdError, NotePatch, NoteValidationError,
};
pub use render::{render, segments, MathLayout, Renderer, Segment, SegmentKind};
pub use repo::note_repo::{NoteRepository, RepoError, RepoResult, SqliteNoteRepository};
pub use service::note_filter::{distinct_subjects, filter_notes, NoteFilter};
pub use service::note_service::{NoteService, NoteServiceError};
