//! Boundary contract for presentation layers.
//!
//! # Responsibility
//! - Define what a rendering surface must expose to be driven by the
//!   coordinator: four gesture registration points and one render call.
//! - Provide reusable helpers adapters embed (`GestureSlots`, `EditBuffer`).
//!
//! # Invariants
//! - `render` receives the full ordered collection and replaces whatever was
//!   displayed before.
//! - `render` must not fire gestures or read back through the coordinator
//!   (`entries`, `refresh`, `with_store`); the store is still borrowed while
//!   it notifies, and any of those panics on the `RefCell`.

pub mod edit_buffer;
pub mod gesture;

use crate::model::entry::Entry;

pub use edit_buffer::EditBuffer;
pub use gesture::{
    AddHandler, DeleteHandler, EditHandler, Gesture, GestureResult, GestureSlots, ToggleHandler,
};

/// A surface that paints entries and turns raw input into gestures.
///
/// All methods take `&self`: adapters are shared through `Rc` between the
/// coordinator and the store's change callback, so they keep their mutable
/// state behind interior mutability.
pub trait PresentationAdapter {
    /// Fully redraws the list. An empty slice shows an explicit
    /// "nothing to show" state.
    ///
    /// `entries` is the whole collection; use it instead of reading back.
    /// The store is mutably borrowed during a change notification, so calling
    /// `Coordinator::entries`/`refresh` or a bound handler from here panics
    /// with a `BorrowMutError`/`BorrowError`.
    fn render(&self, entries: &[Entry]);

    fn bind_add(&self, handler: AddHandler);
    fn bind_edit(&self, handler: EditHandler);
    fn bind_delete(&self, handler: DeleteHandler);
    fn bind_toggle(&self, handler: ToggleHandler);
}
