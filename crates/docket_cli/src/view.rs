//! Terminal presentation adapter.
//!
//! Renders the whole list on every change and routes typed commands into
//! the bound gesture handlers.

use docket_core::presentation::{AddHandler, DeleteHandler, EditHandler, ToggleHandler};
use docket_core::{
    EditBuffer, Entry, EntryId, Gesture, GestureResult, GestureSlots, IgnoreReason,
    MutationOutcome, PresentationAdapter,
};
use std::cell::RefCell;
use std::io::Write;

pub const TITLE: &str = "dockets";
pub const EMPTY_MESSAGE: &str = "Nothing to do! Add a task?";

/// Formats a full frame for `entries`.
pub fn render_lines(entries: &[Entry]) -> Vec<String> {
    let mut lines = vec![TITLE.to_string()];
    if entries.is_empty() {
        lines.push(EMPTY_MESSAGE.to_string());
        return lines;
    }
    lines.extend(entries.iter().map(|entry| {
        if entry.complete {
            format!("[x] {:>3}  ~~{}~~", entry.id, entry.text)
        } else {
            format!("[ ] {:>3}  {}", entry.id, entry.text)
        }
    }));
    lines
}

pub struct TerminalView<W: Write> {
    out: RefCell<W>,
    slots: GestureSlots,
    edit_buffer: RefCell<EditBuffer>,
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: RefCell::new(out),
            slots: GestureSlots::new(),
            edit_buffer: RefCell::new(EditBuffer::new()),
        }
    }

    pub fn submit(&self, text: &str) -> Option<GestureResult> {
        self.slots.dispatch(Gesture::Add(text.to_string()))
    }

    /// Types `text` into row `id` and then leaves the row.
    ///
    /// Blank text never leaves the buffer and reports `EmptyText`, the same
    /// outcome the store gives. `None` only means no edit handler is bound.
    pub fn edit(&self, id: EntryId, text: &str) -> Option<GestureResult> {
        let gesture = {
            let mut buffer = self.edit_buffer.borrow_mut();
            buffer.input(id, text);
            buffer.focus_out()
        };
        match gesture {
            Some(gesture) => self.slots.dispatch(gesture),
            None => self
                .slots
                .edit_handler()
                .map(|_| Ok(MutationOutcome::Ignored(IgnoreReason::EmptyText))),
        }
    }

    pub fn toggle(&self, id: EntryId) -> Option<GestureResult> {
        self.slots.dispatch(Gesture::Toggle(id))
    }

    pub fn delete(&self, id: EntryId) -> Option<GestureResult> {
        self.slots.dispatch(Gesture::Delete(id))
    }

    pub fn print(&self, message: &str) {
        let mut out = self.out.borrow_mut();
        // Terminal output failures are not actionable for the shell.
        let _ = writeln!(out, "{message}");
        let _ = out.flush();
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }
}

impl<W: Write> PresentationAdapter for TerminalView<W> {
    fn render(&self, entries: &[Entry]) {
        let mut out = self.out.borrow_mut();
        for line in render_lines(entries) {
            let _ = writeln!(out, "{line}");
        }
        let _ = out.flush();
    }

    fn bind_add(&self, handler: AddHandler) {
        self.slots.bind_add(handler);
    }

    fn bind_edit(&self, handler: EditHandler) {
        self.slots.bind_edit(handler);
    }

    fn bind_delete(&self, handler: DeleteHandler) {
        self.slots.bind_delete(handler);
    }

    fn bind_toggle(&self, handler: ToggleHandler) {
        self.slots.bind_toggle(handler);
    }
}
