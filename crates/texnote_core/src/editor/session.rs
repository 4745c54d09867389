//! Note editing session.
//!
//! # Responsibility
//! - Hold the draft (title, subject, buffer + selection, toolbar) of one note.
//! - Route toolbar actions, preview rendering and save/delete through it.
//!
//! # Invariants
//! - A session whose load failed exposes no buffer and rejects every edit.
//! - Only the raw buffer is persisted, never rendered markup.

use crate::editor::cursor::{CursorError, CursorState};
use crate::editor::palette::{Symbol, SymbolTab};
use crate::editor::toolbar::{insert_template, Toolbar};
use crate::model::note::{check_required, NewNote, Note, NoteId, NotePatch, NoteValidationError};
use crate::render;
use crate::repo::note_repo::NoteRepository;
use crate::service::note_service::{NoteService, NoteServiceError};
use log::{info, warn};
use thiserror::Error;

/// Shown when an existing note cannot be loaded.
pub const LOAD_FAILED_MESSAGE: &str =
    "Failed to load note. It might not exist or there's a server issue.";
/// Shown in place of the editor once its note has been deleted.
pub const DELETED_MESSAGE: &str = "Note removed";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("editor is not available: {0}")]
    NotEditable(String),
    #[error(transparent)]
    Validation(#[from] NoteValidationError),
    #[error(transparent)]
    Cursor(#[from] CursorError),
    #[error("cannot delete a note that hasn't been saved yet")]
    Unsaved,
    #[error(transparent)]
    Service(#[from] NoteServiceError),
}

/// Editable state of one note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDraft {
    /// `None` until the first successful save.
    pub id: Option<NoteId>,
    pub title: String,
    pub subject: String,
    pub cursor: CursorState,
    pub toolbar: Toolbar,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum SessionState {
    Ready(NoteDraft),
    Failed { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorSession {
    state: SessionState,
}

impl EditorSession {
    /// Starts a draft for a note that does not exist yet.
    pub fn new_note(
        title: impl Into<String>,
        subject: impl Into<String>,
    ) -> Result<Self, SessionError> {
        let title = title.into();
        let subject = subject.into();
        check_required(&title, &subject)?;
        Ok(Self::ready(NoteDraft {
            id: None,
            title: title.trim().to_string(),
            subject: subject.trim().to_string(),
            cursor: CursorState::at_end(String::new()),
            toolbar: Toolbar::new(),
        }))
    }

    /// Loads an existing note. Failures yield a locked session instead of an
    /// error so the caller can show the message in place of the editor.
    pub fn open<R: NoteRepository>(service: &NoteService<R>, id: NoteId) -> Self {
        match service.get_note(id) {
            Ok(note) => Self::from_note(note),
            Err(err) => {
                warn!(
                    "event=editor_open module=editor status=error note_id={id} error={err}"
                );
                Self {
                    state: SessionState::Failed {
                        message: LOAD_FAILED_MESSAGE.to_string(),
                    },
                }
            }
        }
    }

    pub fn from_note(note: Note) -> Self {
        Self::ready(NoteDraft {
            id: Some(note.id),
            title: note.title,
            subject: note.subject,
            cursor: CursorState::at_end(note.content),
            toolbar: Toolbar::new(),
        })
    }

    fn ready(draft: NoteDraft) -> Self {
        Self {
            state: SessionState::Ready(draft),
        }
    }

    pub fn is_editable(&self) -> bool {
        matches!(self.state, SessionState::Ready(_))
    }

    /// User-facing load failure, if any.
    pub fn failure_message(&self) -> Option<&str> {
        match &self.state {
            SessionState::Failed { message } => Some(message),
            SessionState::Ready(_) => None,
        }
    }

    pub fn draft(&self) -> Option<&NoteDraft> {
        match &self.state {
            SessionState::Ready(draft) => Some(draft),
            SessionState::Failed { .. } => None,
        }
    }

    pub fn note_id(&self) -> Option<NoteId> {
        self.draft().and_then(|draft| draft.id)
    }

    fn draft_ref(&self) -> Result<&NoteDraft, SessionError> {
        match &self.state {
            SessionState::Ready(draft) => Ok(draft),
            SessionState::Failed { message } => Err(SessionError::NotEditable(message.clone())),
        }
    }

    fn draft_mut(&mut self) -> Result<&mut NoteDraft, SessionError> {
        match &mut self.state {
            SessionState::Ready(draft) => Ok(draft),
            SessionState::Failed { message } => Err(SessionError::NotEditable(message.clone())),
        }
    }

    pub fn buffer(&self) -> Result<&str, SessionError> {
        Ok(self.draft_ref()?.cursor.buffer())
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> Result<(), SessionError> {
        self.draft_mut()?.title = title.into();
        Ok(())
    }

    pub fn set_subject(&mut self, subject: impl Into<String>) -> Result<(), SessionError> {
        self.draft_mut()?.subject = subject.into();
        Ok(())
    }

    /// Replaces the buffer as typed by the user; the caret moves to the end.
    pub fn set_buffer(&mut self, text: impl Into<String>) -> Result<(), SessionError> {
        self.draft_mut()?.cursor = CursorState::at_end(text);
        Ok(())
    }

    pub fn select(&mut self, start: usize, end: usize) -> Result<(), SessionError> {
        self.draft_mut()?.cursor.select(start, end)?;
        Ok(())
    }

    pub fn insert_template(&mut self, template: &str) -> Result<(), SessionError> {
        let draft = self.draft_mut()?;
        draft.cursor = insert_template(&draft.cursor, template);
        Ok(())
    }

    /// Flips toolbar math mode; returns the new mode.
    pub fn toggle_math_mode(&mut self) -> Result<bool, SessionError> {
        let draft = self.draft_mut()?;
        draft.cursor = draft.toolbar.toggle_math_mode(&draft.cursor);
        Ok(draft.toolbar.math_mode())
    }

    pub fn select_tab(&mut self, tab: SymbolTab) -> Result<(), SessionError> {
        self.draft_mut()?.toolbar.select_tab(tab);
        Ok(())
    }

    pub fn insert_symbol(&mut self, symbol: &Symbol) -> Result<(), SessionError> {
        let draft = self.draft_mut()?;
        draft.cursor = draft.toolbar.insert_symbol(&draft.cursor, symbol);
        Ok(())
    }

    /// Preview markup of the current buffer.
    pub fn preview(&self) -> Result<String, SessionError> {
        Ok(render::render(self.draft_ref()?.cursor.buffer()))
    }

    /// Creates the note on first save, updates it afterwards.
    pub fn save<R: NoteRepository>(
        &mut self,
        service: &NoteService<R>,
    ) -> Result<Note, SessionError> {
        let draft = self.draft_mut()?;
        check_required(&draft.title, &draft.subject)?;

        let saved = match draft.id {
            None => service.create_note(
                NewNote::new(draft.title.clone(), draft.subject.clone())
                    .with_content(draft.cursor.buffer()),
            )?,
            Some(id) => service.update_note(
                id,
                &NotePatch {
                    title: Some(draft.title.clone()),
                    subject: Some(draft.subject.clone()),
                    content: Some(draft.cursor.buffer().to_string()),
                },
            )?,
        };

        draft.id = Some(saved.id);
        draft.title = saved.title.clone();
        draft.subject = saved.subject.clone();
        info!(
            "event=editor_save module=editor status=ok note_id={}",
            saved.id
        );
        Ok(saved)
    }

    /// Deletes the saved note backing this session. On failure the draft
    /// stays editable; on success the session is locked.
    pub fn delete<R: NoteRepository>(
        &mut self,
        service: &NoteService<R>,
    ) -> Result<(), SessionError> {
        let id = self.draft_ref()?.id.ok_or(SessionError::Unsaved)?;
        service.delete_note(id)?;
        info!("event=editor_delete module=editor status=ok note_id={id}");
        self.state = SessionState::Failed {
            message: DELETED_MESSAGE.to_string(),
        };
        Ok(())
    }
}
