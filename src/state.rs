//! Interaction state and the store that owns it.
//!
//! `InteractionState` is only ever mutated through [`Store::dispatch`]. Every
//! transition is total: actions that do not apply to the current state leave
//! it untouched instead of failing.

use std::collections::{BTreeSet, VecDeque};

use crate::actions::Action;
use crate::dialog::{DialogRequest, DialogResult};
use crate::document::DocumentRef;

#[derive(Debug, Default)]
pub struct InteractionState {
    active_menu_path: Vec<String>,
    expanded_compartment_ids: BTreeSet<String>,
    open_documents: Vec<DocumentRef>,
    active_document_id: Option<String>,
    dialog_queue: VecDeque<DialogRequest>,
}

impl InteractionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a state with compartments expanded, e.g. restored by the host.
    pub fn with_expanded<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.expanded_compartment_ids
            .extend(ids.into_iter().map(Into::into));
        self
    }

    /// Seed a state with open documents; the first one becomes active.
    pub fn with_documents(mut self, docs: Vec<DocumentRef>) -> Self {
        for doc in docs {
            open_document(&mut self, doc);
        }
        self
    }

    pub fn active_menu_path(&self) -> &[String] {
        &self.active_menu_path
    }

    pub fn menu_open(&self) -> bool {
        !self.active_menu_path.is_empty()
    }

    pub fn expanded_compartment_ids(&self) -> &BTreeSet<String> {
        &self.expanded_compartment_ids
    }

    pub fn is_expanded(&self, compartment_id: &str) -> bool {
        self.expanded_compartment_ids.contains(compartment_id)
    }

    pub fn open_documents(&self) -> &[DocumentRef] {
        &self.open_documents
    }

    pub fn active_document_id(&self) -> Option<&str> {
        self.active_document_id.as_deref()
    }

    pub fn active_document(&self) -> Option<&DocumentRef> {
        let id = self.active_document_id.as_deref()?;
        self.open_documents.iter().find(|doc| doc.id == id)
    }

    pub fn dialog_queue(&self) -> &VecDeque<DialogRequest> {
        &self.dialog_queue
    }

    pub fn current_dialog(&self) -> Option<&DialogRequest> {
        self.dialog_queue.front()
    }
}

/// Owner of the session's `InteractionState`.
#[derive(Debug, Default)]
pub struct Store {
    state: InteractionState,
}

impl Store {
    pub fn new(initial: InteractionState) -> Self {
        Self { state: initial }
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    /// Apply `action` and return the resulting state.
    ///
    /// The transition is committed before any dialog callback runs, so a
    /// callback that panics or re-enters the host cannot observe or leave
    /// behind a half-applied state.
    pub fn dispatch(&mut self, action: Action) -> &InteractionState {
        tracing::debug!(action = %action, "dispatch");
        let deliveries = reduce(&mut self.state, action);
        for (request, result) in deliveries {
            request.deliver(result);
        }
        &self.state
    }
}

type Delivery = (DialogRequest, DialogResult);

fn reduce(state: &mut InteractionState, action: Action) -> Vec<Delivery> {
    match action {
        Action::OpenMenu(path) => {
            state.active_menu_path = path;
            Vec::new()
        }
        Action::CloseMenu => {
            state.active_menu_path.clear();
            Vec::new()
        }
        Action::ToggleCompartment(id) => {
            if !state.expanded_compartment_ids.remove(&id) {
                state.expanded_compartment_ids.insert(id);
            }
            Vec::new()
        }
        Action::OpenDocument(doc) => {
            open_document(state, doc);
            Vec::new()
        }
        Action::ActivateDocument(id) => {
            if state.open_documents.iter().any(|doc| doc.id == id) {
                state.active_document_id = Some(id);
            }
            Vec::new()
        }
        Action::CloseDocument(id) => {
            close_document(state, &id);
            Vec::new()
        }
        Action::OpenDialog(request) => {
            state.dialog_queue.push_back(request);
            Vec::new()
        }
        Action::ResolveDialog(result) => state
            .dialog_queue
            .pop_front()
            .map(|request| vec![(request, result)])
            .unwrap_or_default(),
        Action::CloseAll => {
            state.active_menu_path.clear();
            state.expanded_compartment_ids.clear();
            state.open_documents.clear();
            state.active_document_id = None;
            state
                .dialog_queue
                .drain(..)
                .map(|request| (request, DialogResult::Cancelled))
                .collect()
        }
        Action::Command(_) => Vec::new(),
    }
}

fn open_document(state: &mut InteractionState, doc: DocumentRef) {
    if state.open_documents.iter().any(|open| open.id == doc.id) {
        return;
    }
    if state.active_document_id.is_none() {
        state.active_document_id = Some(doc.id.clone());
    }
    state.open_documents.push(doc);
}

fn close_document(state: &mut InteractionState, id: &str) {
    let Some(index) = state.open_documents.iter().position(|doc| doc.id == id) else {
        return;
    };
    state.open_documents.remove(index);
    if state.active_document_id.as_deref() != Some(id) {
        return;
    }
    // Prefer the tab that slid into the closed slot, then the one before it.
    let neighbour = state
        .open_documents
        .get(index)
        .or_else(|| index.checked_sub(1).and_then(|i| state.open_documents.get(i)));
    state.active_document_id = neighbour.map(|doc| doc.id.clone());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialog::DialogPayload;
    use crate::document::ContentHandle;
    use std::sync::{Arc, Mutex};

    fn doc(id: &str) -> DocumentRef {
        DocumentRef::new(id, "csv", id.to_uppercase(), ContentHandle(0))
    }

    fn recording_dialog(id: &str, log: &Arc<Mutex<Vec<(String, DialogResult)>>>) -> DialogRequest {
        let log = Arc::clone(log);
        let owner = id.to_string();
        DialogRequest::new(
            id,
            "confirm",
            DialogPayload::Confirm {
                title: id.into(),
                prompt: "?".into(),
            },
            move |result| log.lock().unwrap().push((owner, result)),
        )
    }

    #[test]
    fn initial_state_is_empty() {
        let s = InteractionState::new();
        assert!(s.active_menu_path().is_empty());
        assert!(s.expanded_compartment_ids().is_empty());
        assert!(s.active_document_id().is_none());
        assert!(s.dialog_queue().is_empty());
    }

    #[test]
    fn open_and_close_menu() {
        let mut store = Store::default();
        store.dispatch(Action::open_menu(["file"]));
        assert_eq!(store.state().active_menu_path(), ["file".to_string()]);
        store.dispatch(Action::CloseMenu);
        assert!(!store.state().menu_open());
    }

    #[test]
    fn toggle_compartment_twice_restores_membership() {
        let mut store = Store::new(InteractionState::new().with_expanded(["model"]));
        store.dispatch(Action::ToggleCompartment("data".into()));
        assert!(store.state().is_expanded("data"));
        store.dispatch(Action::ToggleCompartment("data".into()));
        assert!(!store.state().is_expanded("data"));
        assert!(store.state().is_expanded("model"));
    }

    #[test]
    fn activate_unknown_document_is_a_no_op() {
        let mut store = Store::new(InteractionState::new().with_documents(vec![doc("doc-1")]));
        assert_eq!(store.state().active_document_id(), Some("doc-1"));
        store.dispatch(Action::ActivateDocument("doc-2".into()));
        assert_eq!(store.state().active_document_id(), Some("doc-1"));
    }

    #[test]
    fn closing_active_document_activates_neighbour() {
        let mut store = Store::new(
            InteractionState::new().with_documents(vec![doc("a"), doc("b"), doc("c")]),
        );
        store.dispatch(Action::ActivateDocument("b".into()));
        store.dispatch(Action::CloseDocument("b".into()));
        assert_eq!(store.state().active_document_id(), Some("c"));
        store.dispatch(Action::CloseDocument("c".into()));
        assert_eq!(store.state().active_document_id(), Some("a"));
        store.dispatch(Action::CloseDocument("a".into()));
        assert_eq!(store.state().active_document_id(), None);
    }

    #[test]
    fn reopening_a_document_keeps_a_single_tab() {
        let mut store = Store::default();
        store.dispatch(Action::OpenDocument(doc("a")));
        store.dispatch(Action::OpenDocument(doc("a")));
        assert_eq!(store.state().open_documents().len(), 1);
    }

    #[test]
    fn dialogs_resolve_in_fifo_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut store = Store::default();
        store.dispatch(Action::OpenDialog(recording_dialog("A", &log)));
        store.dispatch(Action::OpenDialog(recording_dialog("B", &log)));
        store.dispatch(Action::ResolveDialog(DialogResult::Submitted("r1".into())));

        assert_eq!(
            *log.lock().unwrap(),
            vec![("A".to_string(), DialogResult::Submitted("r1".into()))]
        );
        assert_eq!(store.state().current_dialog().map(|d| d.id.as_str()), Some("B"));
    }

    #[test]
    fn resolve_with_empty_queue_is_a_no_op() {
        let mut store = Store::default();
        store.dispatch(Action::ResolveDialog(DialogResult::Confirmed));
        assert!(store.state().dialog_queue().is_empty());
    }

    #[test]
    fn panicking_callback_leaves_state_consistent() {
        let mut store = Store::default();
        store.dispatch(Action::OpenDialog(DialogRequest::new(
            "bad",
            "message",
            DialogPayload::Message {
                title: "t".into(),
                body: "b".into(),
            },
            |_| panic!("host bug"),
        )));
        store.dispatch(Action::OpenDialog(DialogRequest::message("next", "t", "b")));
        store.dispatch(Action::ResolveDialog(DialogResult::Confirmed));
        assert_eq!(store.state().current_dialog().map(|d| d.id.as_str()), Some("next"));
    }

    #[test]
    fn close_all_cancels_every_queued_dialog() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut store = Store::new(
            InteractionState::new()
                .with_expanded(["data"])
                .with_documents(vec![doc("a")]),
        );
        store.dispatch(Action::open_menu(["file"]));
        store.dispatch(Action::OpenDialog(recording_dialog("A", &log)));
        store.dispatch(Action::OpenDialog(recording_dialog("B", &log)));
        store.dispatch(Action::CloseAll);

        let state = store.state();
        assert!(!state.menu_open());
        assert!(state.expanded_compartment_ids().is_empty());
        assert!(state.open_documents().is_empty());
        assert!(state.active_document_id().is_none());
        assert!(state.dialog_queue().is_empty());
        assert_eq!(
            *log.lock().unwrap(),
            vec![
                ("A".to_string(), DialogResult::Cancelled),
                ("B".to_string(), DialogResult::Cancelled),
            ]
        );
    }

    #[test]
    fn host_commands_leave_state_untouched() {
        let mut store = Store::new(InteractionState::new().with_expanded(["data"]));
        store.dispatch(Action::open_menu(["file"]));
        store.dispatch(Action::Command("some.future.feature".into()));
        assert_eq!(store.state().active_menu_path(), ["file".to_string()]);
        assert!(store.state().is_expanded("data"));
    }

    enum Step {
        Do(Action),
        ToggleTwice(&'static str),
    }

    fn mixed_steps(round: usize, log: &Arc<Mutex<Vec<(String, DialogResult)>>>) -> Vec<Step> {
        let dialog = |n: usize| {
            let request = recording_dialog(&format!("d{round}-{n}"), log);
            Step::Do(Action::OpenDialog(request))
        };
        let mut steps = vec![
            Step::Do(Action::open_menu(["file", "recent"])),
            Step::Do(Action::OpenDocument(doc("a"))),
            Step::Do(Action::OpenDocument(doc("b"))),
            Step::Do(Action::OpenDocument(doc("a"))),
            Step::Do(Action::ActivateDocument("b".into())),
            Step::Do(Action::ActivateDocument("ghost".into())),
            Step::ToggleTwice("data"),
            Step::Do(Action::ToggleCompartment("model".into())),
            dialog(1),
            Step::Do(Action::ResolveDialog(DialogResult::Confirmed)),
            Step::Do(Action::CloseDocument("b".into())),
            Step::Do(Action::CloseDocument("ghost".into())),
            dialog(2),
            dialog(3),
            Step::Do(Action::ResolveDialog(DialogResult::Submitted("x".into()))),
            Step::Do(Action::Command("view.refresh".into())),
            Step::Do(Action::CloseMenu),
            Step::Do(Action::CloseMenu),
            Step::Do(Action::ResolveDialog(DialogResult::Cancelled)),
            Step::Do(Action::ResolveDialog(DialogResult::Confirmed)),
            Step::ToggleTwice("model"),
            Step::Do(Action::OpenDocument(doc("c"))),
            Step::Do(Action::ActivateDocument("c".into())),
            Step::Do(Action::CloseDocument("a".into())),
            Step::Do(Action::CloseDocument("c".into())),
            dialog(4),
        ];
        if round % 2 == 1 {
            steps.push(Step::Do(Action::CloseAll));
        }
        steps
    }

    fn assert_consistent(state: &InteractionState, opened: &[String], delivered: &[String]) {
        let ids: Vec<&str> = state.open_documents().iter().map(|d| d.id.as_str()).collect();
        let unique: BTreeSet<&str> = ids.iter().copied().collect();
        assert_eq!(unique.len(), ids.len(), "duplicate tabs: {ids:?}");
        match state.active_document_id() {
            Some(active) => assert!(ids.contains(&active), "{active} is not open"),
            None => assert!(ids.is_empty(), "open documents without an active one"),
        }
        assert_eq!(delivered, &opened[..delivered.len()], "results out of FIFO order");
        let queued: Vec<&str> = state.dialog_queue().iter().map(|d| d.id.as_str()).collect();
        assert_eq!(queued, opened[delivered.len()..]);
    }

    #[test]
    fn long_mixed_sequences_keep_the_state_consistent() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut store = Store::new(InteractionState::new().with_expanded(["data"]));
        let mut opened = Vec::new();

        for round in 0..6 {
            for step in mixed_steps(round, &log) {
                match step {
                    Step::Do(action) => {
                        if let Action::OpenDialog(request) = &action {
                            opened.push(request.id.clone());
                        }
                        store.dispatch(action);
                    }
                    Step::ToggleTwice(id) => {
                        let before = store.state().expanded_compartment_ids().clone();
                        store.dispatch(Action::ToggleCompartment(id.into()));
                        assert_ne!(store.state().expanded_compartment_ids(), &before);
                        store.dispatch(Action::ToggleCompartment(id.into()));
                        assert_eq!(store.state().expanded_compartment_ids(), &before);
                    }
                }
                let delivered: Vec<String> =
                    log.lock().unwrap().iter().map(|(id, _)| id.clone()).collect();
                assert_consistent(store.state(), &opened, &delivered);
            }
        }

        // The last round closes everything, so each callback ran exactly once.
        assert!(store.state().dialog_queue().is_empty());
        let delivered: Vec<String> = log.lock().unwrap().iter().map(|(id, _)| id.clone()).collect();
        assert_eq!(delivered, opened);
        let cancelled = log.lock().unwrap().iter().filter(|(_, r)| r.is_cancelled()).count();
        assert_eq!(cancelled, 9);
    }
}
