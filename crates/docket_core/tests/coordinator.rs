use docket_core::presentation::{AddHandler, DeleteHandler, EditHandler, ToggleHandler};
use docket_core::{
    Coordinator, EditBuffer, Entry, Gesture, GestureSlots, IgnoreReason, KeyValueRepository,
    MemoryKeyValueRepository, MutationOutcome, PresentationAdapter,
};
use std::cell::RefCell;
use std::rc::Rc;

/// Adapter that records every frame and every binding it receives.
#[derive(Default)]
struct RecordingAdapter {
    slots: GestureSlots,
    frames: RefCell<Vec<Vec<Entry>>>,
    events: RefCell<Vec<&'static str>>,
}

impl RecordingAdapter {
    fn fire(&self, gesture: Gesture) -> MutationOutcome {
        self.slots
            .dispatch(gesture)
            .expect("gesture should be bound")
            .expect("in-memory store should not fail")
    }

    fn frames(&self) -> Vec<Vec<Entry>> {
        self.frames.borrow().clone()
    }

    fn last_frame(&self) -> Vec<Entry> {
        self.frames.borrow().last().cloned().unwrap_or_default()
    }
}

impl PresentationAdapter for RecordingAdapter {
    fn render(&self, entries: &[Entry]) {
        self.events.borrow_mut().push("render");
        self.frames.borrow_mut().push(entries.to_vec());
    }

    fn bind_add(&self, handler: AddHandler) {
        self.events.borrow_mut().push("bind_add");
        self.slots.bind_add(handler);
    }

    fn bind_edit(&self, handler: EditHandler) {
        self.events.borrow_mut().push("bind_edit");
        self.slots.bind_edit(handler);
    }

    fn bind_delete(&self, handler: DeleteHandler) {
        self.events.borrow_mut().push("bind_delete");
        self.slots.bind_delete(handler);
    }

    fn bind_toggle(&self, handler: ToggleHandler) {
        self.events.borrow_mut().push("bind_toggle");
        self.slots.bind_toggle(handler);
    }
}

fn start_empty() -> (
    Coordinator<Rc<MemoryKeyValueRepository>, RecordingAdapter>,
    Rc<MemoryKeyValueRepository>,
    Rc<RecordingAdapter>,
) {
    let repo = Rc::new(MemoryKeyValueRepository::new());
    let view = Rc::new(RecordingAdapter::default());
    let coordinator = Coordinator::start(Rc::clone(&repo), Rc::clone(&view));
    (coordinator, repo, view)
}

#[test]
fn startup_binds_all_gestures_before_single_initial_render() {
    let (_coordinator, _repo, view) = start_empty();

    assert_eq!(
        *view.events.borrow(),
        vec!["bind_add", "bind_edit", "bind_delete", "bind_toggle", "render"]
    );
    assert_eq!(view.frames(), vec![Vec::<Entry>::new()]);
}

#[test]
fn initial_render_shows_persisted_entries() {
    let repo = Rc::new(MemoryKeyValueRepository::new());
    repo.set(
        "dockets",
        r#"[{"id":3,"text":"water plants","complete":true}]"#,
    )
    .unwrap();
    let view = Rc::new(RecordingAdapter::default());

    let coordinator = Coordinator::start(Rc::clone(&repo), Rc::clone(&view));

    let expected = vec![Entry {
        id: 3,
        text: "water plants".to_string(),
        complete: true,
    }];
    assert_eq!(view.frames(), vec![expected.clone()]);
    assert_eq!(coordinator.entries(), expected);
}

#[test]
fn add_toggle_delete_scenario_renders_and_persists_each_step() {
    let (coordinator, repo, view) = start_empty();

    view.fire(Gesture::Add("buy milk".to_string()));
    let after_add = vec![Entry::new(1, "buy milk")];
    assert_eq!(view.frames(), vec![Vec::new(), after_add.clone()]);
    assert_eq!(coordinator.entries(), after_add);

    view.fire(Gesture::Toggle(1));
    assert_eq!(
        view.last_frame(),
        vec![Entry {
            id: 1,
            text: "buy milk".to_string(),
            complete: true,
        }]
    );

    view.fire(Gesture::Delete(1));
    assert_eq!(view.last_frame(), Vec::<Entry>::new());
    assert_eq!(view.frames().len(), 4);
    assert!(coordinator.entries().is_empty());
    assert_eq!(repo.get("dockets").unwrap().as_deref(), Some("[]"));
}

#[test]
fn ignored_gestures_do_not_render() {
    let (_coordinator, _repo, view) = start_empty();

    assert_eq!(
        view.fire(Gesture::Add("  ".to_string())),
        MutationOutcome::Ignored(IgnoreReason::EmptyText)
    );
    assert_eq!(
        view.fire(Gesture::Toggle(5)),
        MutationOutcome::Ignored(IgnoreReason::UnknownId(5))
    );
    assert_eq!(view.frames().len(), 1);
}

#[test]
fn bound_handlers_keep_their_identity() {
    let (coordinator, _repo, view) = start_empty();
    let handlers = coordinator.handlers();

    assert!(Rc::ptr_eq(&handlers.add, &view.slots.add_handler().unwrap()));
    assert!(Rc::ptr_eq(&handlers.edit, &view.slots.edit_handler().unwrap()));
    assert!(Rc::ptr_eq(
        &handlers.delete,
        &view.slots.delete_handler().unwrap()
    ));
    assert!(Rc::ptr_eq(
        &handlers.toggle,
        &view.slots.toggle_handler().unwrap()
    ));

    view.fire(Gesture::Add("a".to_string()));
    assert!(Rc::ptr_eq(&handlers.add, &view.slots.add_handler().unwrap()));
}

#[test]
fn edit_buffer_commit_reaches_the_store() {
    let (coordinator, _repo, view) = start_empty();
    view.fire(Gesture::Add("draft".to_string()));
    view.fire(Gesture::Toggle(1));

    let mut buffer = EditBuffer::new();
    buffer.input(1, "final");
    let gesture = buffer.focus_out().unwrap();
    view.fire(gesture);

    assert_eq!(
        coordinator.entries(),
        vec![Entry {
            id: 1,
            text: "final".to_string(),
            complete: true,
        }]
    );
}

#[test]
fn refresh_renders_without_mutating() {
    let (coordinator, repo, view) = start_empty();
    view.fire(Gesture::Add("a".to_string()));
    let stored = repo.get("dockets").unwrap();

    coordinator.refresh();

    assert_eq!(view.frames().len(), 3);
    assert_eq!(view.last_frame(), vec![Entry::new(1, "a")]);
    assert_eq!(repo.get("dockets").unwrap(), stored);
}

#[test]
fn restart_on_same_storage_restores_collection() {
    let repo = Rc::new(MemoryKeyValueRepository::new());
    {
        let view = Rc::new(RecordingAdapter::default());
        let _coordinator = Coordinator::start(Rc::clone(&repo), Rc::clone(&view));
        view.fire(Gesture::Add("a".to_string()));
        view.fire(Gesture::Add("b".to_string()));
        view.fire(Gesture::Delete(1));
    }

    let view = Rc::new(RecordingAdapter::default());
    let coordinator = Coordinator::start(Rc::clone(&repo), Rc::clone(&view));
    assert_eq!(view.frames(), vec![vec![Entry::new(2, "b")]]);

    view.fire(Gesture::Add("c".to_string()));
    assert_eq!(coordinator.with_store(|store| store.len()), 2);
    assert_eq!(coordinator.entries()[1].id, 3);
}

/// Adapter that fires a gesture from inside `render`.
#[derive(Default)]
struct ReentrantAdapter {
    slots: GestureSlots,
}

impl PresentationAdapter for ReentrantAdapter {
    fn render(&self, entries: &[Entry]) {
        if let Some(first) = entries.first() {
            let _ = self.slots.dispatch(Gesture::Toggle(first.id));
        }
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

#[test]
#[should_panic(expected = "borrowed")]
fn gesture_fired_from_render_panics_on_the_borrowed_store() {
    let view = Rc::new(ReentrantAdapter::default());
    let _coordinator = Coordinator::start(MemoryKeyValueRepository::new(), Rc::clone(&view));
    let _ = view.slots.dispatch(Gesture::Add("a".to_string()));
}

#[test]
fn render_sees_the_new_collection_through_its_argument() {
    let (coordinator, _repo, view) = start_empty();

    view.fire(Gesture::Add("a".to_string()));
    view.fire(Gesture::Add("b".to_string()));

    assert_eq!(view.last_frame(), coordinator.entries());
}
