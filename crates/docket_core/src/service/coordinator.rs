//! Wiring between the entry store and a presentation adapter.
//!
//! # Responsibility
//! - Bind store change notifications to `render`.
//! - Bind the adapter's four gestures to the matching store operations.
//! - Paint the loaded collection once at startup.
//!
//! # Invariants
//! - Startup order is: load, bind change callback, bind gestures, render.
//! - Handlers are created once; the adapter receives clones of the same `Rc`.
//! - Only the store writes to storage; the coordinator never does.
//! - The store stays borrowed while `render` runs, so `render` must not call
//!   `entries`, `refresh`, `with_store`, or any bound handler.

use crate::config::StoreConfig;
use crate::model::entry::Entry;
use crate::presentation::{
    AddHandler, DeleteHandler, EditHandler, PresentationAdapter, ToggleHandler,
};
use crate::repo::kv_repo::KeyValueRepository;
use crate::service::entry_store::EntryStore;
use log::info;
use std::cell::RefCell;
use std::rc::Rc;

/// The handler set bound into the adapter at startup.
#[derive(Clone)]
pub struct GestureHandlers {
    pub add: AddHandler,
    pub edit: EditHandler,
    pub delete: DeleteHandler,
    pub toggle: ToggleHandler,
}

impl GestureHandlers {
    fn for_store<R: KeyValueRepository + 'static>(store: &Rc<RefCell<EntryStore<R>>>) -> Self {
        let add_store = Rc::clone(store);
        let edit_store = Rc::clone(store);
        let delete_store = Rc::clone(store);
        let toggle_store = Rc::clone(store);

        Self {
            add: Rc::new(move |text: &str| add_store.borrow_mut().add(text)),
            edit: Rc::new(move |id, text: &str| edit_store.borrow_mut().edit(id, text)),
            delete: Rc::new(move |id| delete_store.borrow_mut().delete(id)),
            toggle: Rc::new(move |id| toggle_store.borrow_mut().toggle(id)),
        }
    }
}

/// Owns the running store/adapter pair.
pub struct Coordinator<R: KeyValueRepository + 'static, V: PresentationAdapter + 'static> {
    store: Rc<RefCell<EntryStore<R>>>,
    view: Rc<V>,
    handlers: GestureHandlers,
}

impl<R: KeyValueRepository + 'static, V: PresentationAdapter + 'static> Coordinator<R, V> {
    /// Starts with the default storage key.
    pub fn start(repo: R, view: Rc<V>) -> Self {
        Self::start_with_config(repo, StoreConfig::default(), view)
    }

    pub fn start_with_config(repo: R, config: StoreConfig, view: Rc<V>) -> Self {
        let store = Rc::new(RefCell::new(EntryStore::with_config(repo, config)));

        // Weak so the adapter's handlers (which own the store) do not form a
        // cycle through the store's callback.
        let render_target = Rc::downgrade(&view);
        store.borrow_mut().on_change(move |entries: &[Entry]| {
            if let Some(view) = render_target.upgrade() {
                view.render(entries);
            }
        });

        let handlers = GestureHandlers::for_store(&store);
        view.bind_add(Rc::clone(&handlers.add));
        view.bind_edit(Rc::clone(&handlers.edit));
        view.bind_delete(Rc::clone(&handlers.delete));
        view.bind_toggle(Rc::clone(&handlers.toggle));

        let coordinator = Self {
            store,
            view,
            handlers,
        };
        coordinator.refresh();
        info!(
            "event=coordinator_start module=service status=ok count={}",
            coordinator.store.borrow().len()
        );
        coordinator
    }

    /// Renders the current collection without mutating it.
    ///
    /// Must not be called from inside `render`.
    pub fn refresh(&self) {
        let store = self.store.borrow();
        self.view.render(store.entries());
    }

    pub fn entries(&self) -> Vec<Entry> {
        self.store.borrow().entries().to_vec()
    }

    pub fn handlers(&self) -> &GestureHandlers {
        &self.handlers
    }

    /// Runs `f` with read access to the store.
    pub fn with_store<T>(&self, f: impl FnOnce(&EntryStore<R>) -> T) -> T {
        f(&self.store.borrow())
    }
}
