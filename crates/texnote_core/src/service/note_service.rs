//! Note use-case service.
//!
//! # Responsibility
//! - Create/update/get/list/delete notes through a `NoteRepository`.
//! - Apply partial-update fallback rules before persistence.
//!
//! # Invariants
//! - Every write is read back so callers receive store-assigned timestamps.
//! - Log events carry ids and counts only, never note text.

use crate::model::note::{NewNote, Note, NoteId, NotePatch, NoteValidationError};
use crate::repo::note_repo::{NoteRepository, RepoError};
use crate::service::note_filter::{distinct_subjects, filter_notes, NoteFilter};
use log::{info, warn};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum NoteServiceError {
    #[error(transparent)]
    Validation(#[from] NoteValidationError),
    #[error("note not found: {0}")]
    NoteNotFound(NoteId),
    #[error(transparent)]
    Repo(RepoError),
    /// Write succeeded but the read-back disagrees.
    #[error("inconsistent note state: {0}")]
    InconsistentState(&'static str),
}

impl From<RepoError> for NoteServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::NoteNotFound(id),
            RepoError::Validation(err) => Self::Validation(err),
            other => Self::Repo(other),
        }
    }
}

/// Note service facade over a repository implementation.
pub struct NoteService<R: NoteRepository> {
    repo: R,
}

impl<R: NoteRepository> NoteService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists notes newest-updated first, then applies `filter` in memory.
    pub fn list_notes(&self, filter: &NoteFilter) -> Result<Vec<Note>, NoteServiceError> {
        let notes = self.repo.list_notes()?;
        let total = notes.len();
        let filtered = filter_notes(notes, filter);
        info!(
            "event=note_list module=service status=ok total={} returned={}",
            total,
            filtered.len()
        );
        Ok(filtered)
    }

    /// Distinct subjects across all notes, in list order.
    pub fn list_subjects(&self) -> Result<Vec<String>, NoteServiceError> {
        Ok(distinct_subjects(&self.repo.list_notes()?))
    }

    pub fn get_note(&self, id: NoteId) -> Result<Note, NoteServiceError> {
        self.repo
            .get_note(id)?
            .ok_or(NoteServiceError::NoteNotFound(id))
    }

    /// Creates a note; title and subject are required, content may be empty.
    pub fn create_note(&self, input: NewNote) -> Result<Note, NoteServiceError> {
        let note = input.into_note(Uuid::new_v4()).map_err(|err| {
            warn!("event=note_create module=service status=error error_code=validation error={err}");
            err
        })?;
        let id = self.repo.insert_note(&note)?;
        let created = self
            .repo
            .get_note(id)?
            .ok_or(NoteServiceError::InconsistentState(
                "created note not found in read-back",
            ))?;
        info!(
            "event=note_create module=service status=ok note_id={} content_len={}",
            id,
            created.content.len()
        );
        Ok(created)
    }

    /// Applies `patch` on top of the stored note.
    pub fn update_note(&self, id: NoteId, patch: &NotePatch) -> Result<Note, NoteServiceError> {
        let current = self.get_note(id)?;
        let next = patch.apply_to(&current);
        self.repo
            .update_note(id, &next.title, &next.subject, &next.content)?;
        let updated = self
            .repo
            .get_note(id)?
            .ok_or(NoteServiceError::InconsistentState(
                "updated note not found in read-back",
            ))?;
        info!(
            "event=note_update module=service status=ok note_id={} content_len={}",
            id,
            updated.content.len()
        );
        Ok(updated)
    }

    pub fn delete_note(&self, id: NoteId) -> Result<(), NoteServiceError> {
        self.repo.delete_note(id)?;
        info!("event=note_delete module=service status=ok note_id={id}");
        Ok(())
    }
}
