//! Editor buffer plus selection.
//!
//! Offsets are byte offsets into the UTF-8 buffer and always sit on char
//! boundaries, with `start <= end <= buffer.len()`.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CursorError {
    #[error("selection start {start} is after end {end}")]
    InvertedSelection { start: usize, end: usize },
    #[error("offset {offset} is past the end of a {len}-byte buffer")]
    OutOfBounds { offset: usize, len: usize },
    #[error("offset {offset} is not on a character boundary")]
    NotCharBoundary { offset: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    start: usize,
    end: usize,
}

impl Selection {
    pub fn collapsed(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }
}

/// Buffer with an optional selection; `None` means no active editing surface.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CursorState {
    buffer: String,
    selection: Option<Selection>,
}

impl CursorState {
    /// Buffer without an established selection.
    pub fn detached(buffer: impl Into<String>) -> Self {
        Self {
            buffer: buffer.into(),
            selection: None,
        }
    }

    /// Buffer with a collapsed caret after its last character.
    pub fn at_end(buffer: impl Into<String>) -> Self {
        let buffer = buffer.into();
        let end = buffer.len();
        Self {
            buffer,
            selection: Some(Selection::collapsed(end)),
        }
    }

    pub fn with_selection(
        buffer: impl Into<String>,
        start: usize,
        end: usize,
    ) -> Result<Self, CursorError> {
        let mut state = Self::detached(buffer);
        state.select(start, end)?;
        Ok(state)
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn selection(&self) -> Option<Selection> {
        self.selection
    }

    /// Selection start, or `None` without an active selection.
    pub fn caret(&self) -> Option<usize> {
        self.selection.map(|selection| selection.start)
    }

    pub fn select(&mut self, start: usize, end: usize) -> Result<(), CursorError> {
        if start > end {
            return Err(CursorError::InvertedSelection { start, end });
        }
        for offset in [start, end] {
            if offset > self.buffer.len() {
                return Err(CursorError::OutOfBounds {
                    offset,
                    len: self.buffer.len(),
                });
            }
            if !self.buffer.is_char_boundary(offset) {
                return Err(CursorError::NotCharBoundary { offset });
            }
        }
        self.selection = Some(Selection { start, end });
        Ok(())
    }

    /// Drops the selection, e.g. when the editing surface loses focus.
    pub fn detach(&mut self) {
        self.selection = None;
    }

    /// Replaces `[selection.start, selection.end)` with `text` and collapses
    /// the caret to `selection.start + caret_in_text`.
    pub(crate) fn splice(&self, selection: Selection, text: &str, caret_in_text: usize) -> Self {
        let mut buffer =
            String::with_capacity(self.buffer.len() - (selection.end - selection.start) + text.len());
        buffer.push_str(&self.buffer[..selection.start]);
        buffer.push_str(text);
        buffer.push_str(&self.buffer[selection.end..]);
        Self {
            buffer,
            selection: Some(Selection::collapsed(selection.start + caret_in_text)),
        }
    }
}
