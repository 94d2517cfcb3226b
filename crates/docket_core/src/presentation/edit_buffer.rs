//! In-place edit capture for editable entry rows.
//!
//! Text typed into a row is buffered per entry and committed as one
//! `Gesture::Edit` when the row loses focus.

use super::gesture::Gesture;
use crate::model::entry::{validate_text, EntryId};

#[derive(Debug, Default)]
pub struct EditBuffer {
    pending: Option<(EntryId, String)>,
}

impl EditBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the current text of row `id`.
    ///
    /// Input for a different row replaces the pending edit.
    pub fn input(&mut self, id: EntryId, text: impl Into<String>) {
        self.pending = Some((id, text.into()));
    }

    pub fn pending(&self) -> Option<(EntryId, &str)> {
        self.pending.as_ref().map(|(id, text)| (*id, text.as_str()))
    }

    /// Takes the pending edit as a gesture and clears the buffer.
    ///
    /// Blank text is dropped without producing a gesture.
    pub fn focus_out(&mut self) -> Option<Gesture> {
        let (id, text) = self.pending.take()?;
        validate_text(&text).ok()?;
        Some(Gesture::Edit { id, text })
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}
