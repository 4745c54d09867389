//! Note record, create/update inputs and identifier parsing.
//!
//! # Invariants
//! - `title` and `subject` are trimmed and non-empty on persisted notes.
//! - `content` is stored verbatim (raw text + LaTeX), never rendered.
//! - Malformed id text is reported as `NoteIdError`, never as "not found".

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Stable identifier for a note.
pub type NoteId = Uuid;

/// Id text that does not parse as a note identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid note id `{0}`")]
pub struct NoteIdError(pub String);

/// Parses externally supplied id text (path segments, CLI args).
pub fn parse_note_id(raw: &str) -> Result<NoteId, NoteIdError> {
    let trimmed = raw.trim();
    match Uuid::parse_str(trimmed) {
        Ok(id) if !id.is_nil() => Ok(id),
        _ => Err(NoteIdError(trimmed.to_string())),
    }
}

/// Required field missing on a create or save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NoteValidationError {
    #[error("title is required")]
    MissingTitle,
    #[error("subject is required")]
    MissingSubject,
    #[error("title and subject are required")]
    MissingTitleAndSubject,
}

/// Persisted note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub subject: String,
    /// Raw editor buffer.
    pub content: String,
    /// Epoch milliseconds, assigned by the store.
    pub created_at: i64,
    /// Epoch milliseconds, bumped by the store on every update.
    pub updated_at: i64,
}

/// Create input. Only `content` may be omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewNote {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub content: Option<String>,
}

impl NewNote {
    pub fn new(title: impl Into<String>, subject: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subject: subject.into(),
            content: None,
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    /// Checks required fields without mutating the input.
    pub fn validate(&self) -> Result<(), NoteValidationError> {
        check_required(&self.title, &self.subject)
    }

    /// Builds the note to persist. Timestamps are placeholders until the
    /// store assigns them.
    pub fn into_note(self, id: NoteId) -> Result<Note, NoteValidationError> {
        self.validate()?;
        Ok(Note {
            id,
            title: self.title.trim().to_string(),
            subject: self.subject.trim().to_string(),
            content: self.content.unwrap_or_default(),
            created_at: 0,
            updated_at: 0,
        })
    }
}

/// Partial update input.
///
/// Blank or absent `title`/`subject` keep the stored value. `content` keeps
/// the stored value only when absent; `Some("")` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotePatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

impl NotePatch {
    /// Returns `current` with this patch applied.
    pub fn apply_to(&self, current: &Note) -> Note {
        Note {
            title: pick_required(self.title.as_deref(), &current.title),
            subject: pick_required(self.subject.as_deref(), &current.subject),
            content: self
                .content
                .clone()
                .unwrap_or_else(|| current.content.clone()),
            ..current.clone()
        }
    }
}

fn pick_required(patched: Option<&str>, current: &str) -> String {
    match patched.map(str::trim) {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => current.to_string(),
    }
}

pub(crate) fn check_required(title: &str, subject: &str) -> Result<(), NoteValidationError> {
    match (title.trim().is_empty(), subject.trim().is_empty()) {
        (false, false) => Ok(()),
        (true, false) => Err(NoteValidationError::MissingTitle),
        (false, true) => Err(NoteValidationError::MissingSubject),
        (true, true) => Err(NoteValidationError::MissingTitleAndSubject),
    }
}
