//! Semantic gestures and the handler slots adapters dispatch them through.

use crate::model::entry::EntryId;
use crate::service::entry_store::{EntryStoreResult, MutationOutcome};
use std::cell::RefCell;
use std::rc::Rc;

pub type GestureResult = EntryStoreResult<MutationOutcome>;

pub type AddHandler = Rc<dyn Fn(&str) -> GestureResult>;
pub type EditHandler = Rc<dyn Fn(EntryId, &str) -> GestureResult>;
pub type DeleteHandler = Rc<dyn Fn(EntryId) -> GestureResult>;
pub type ToggleHandler = Rc<dyn Fn(EntryId) -> GestureResult>;

/// A user interaction already translated into a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Gesture {
    Add(String),
    Edit { id: EntryId, text: String },
    Delete(EntryId),
    Toggle(EntryId),
}

/// Storage for the four bound gesture handlers.
///
/// Binding again replaces the previous handler for that slot.
#[derive(Default)]
pub struct GestureSlots {
    add: RefCell<Option<AddHandler>>,
    edit: RefCell<Option<EditHandler>>,
    delete: RefCell<Option<DeleteHandler>>,
    toggle: RefCell<Option<ToggleHandler>>,
}

impl GestureSlots {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind_add(&self, handler: AddHandler) {
        *self.add.borrow_mut() = Some(handler);
    }

    pub fn bind_edit(&self, handler: EditHandler) {
        *self.edit.borrow_mut() = Some(handler);
    }

    pub fn bind_delete(&self, handler: DeleteHandler) {
        *self.delete.borrow_mut() = Some(handler);
    }

    pub fn bind_toggle(&self, handler: ToggleHandler) {
        *self.toggle.borrow_mut() = Some(handler);
    }

    pub fn add_handler(&self) -> Option<AddHandler> {
        self.add.borrow().clone()
    }

    pub fn edit_handler(&self) -> Option<EditHandler> {
        self.edit.borrow().clone()
    }

    pub fn delete_handler(&self) -> Option<DeleteHandler> {
        self.delete.borrow().clone()
    }

    pub fn toggle_handler(&self) -> Option<ToggleHandler> {
        self.toggle.borrow().clone()
    }

    /// Runs the handler bound for `gesture`.
    ///
    /// Returns `None` when that slot is unbound. The handler is cloned out of
    /// its slot first, so it may trigger a render on the owning adapter.
    pub fn dispatch(&self, gesture: Gesture) -> Option<GestureResult> {
        match gesture {
            Gesture::Add(text) => self.add_handler().map(|handler| handler(&text)),
            Gesture::Edit { id, text } => self.edit_handler().map(|handler| handler(id, &text)),
            Gesture::Delete(id) => self.delete_handler().map(|handler| handler(id)),
            Gesture::Toggle(id) => self.toggle_handler().map(|handler| handler(id)),
        }
    }
}
