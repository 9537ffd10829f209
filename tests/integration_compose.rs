use std::sync::Arc;

use term_compose::actions::Action;
use term_compose::compose::{ToolNode, compose};
use term_compose::descriptor::{
    CompartmentDescriptor, Descriptors, MenuDescriptor, MenuItem, ToolEntry, validate,
};
use term_compose::document::{ContentHandle, DocumentRef};
use term_compose::error::ResolutionMiss;
use term_compose::params::{ParamShape, WidgetParams};
use term_compose::registry::{Registry, factory_fn};
use term_compose::shell::Shell;
use term_compose::state::{InteractionState, Store};
use term_compose::widget::Widget;
use term_compose::widgets::{self, TextWidget};

fn registry() -> Arc<Registry> {
    let registry = Arc::new(Registry::new());
    widgets::register_builtin(&registry).unwrap();
    registry
}

fn descriptors() -> Descriptors {
    Descriptors::new("candis")
        .menu(
            MenuDescriptor::new("file", "File")
                .item(MenuItem::new("open", "Open"))
                .item(MenuItem::new("save", "Save")),
        )
        .menu(MenuDescriptor::new("edit", "Edit").item(MenuItem::new("undo", "Undo")))
        .compartment(
            CompartmentDescriptor::new("data", "Data")
                .tool(ToolEntry::new("create", "button", WidgetParams::button("Create"))),
        )
        .compartment(
            CompartmentDescriptor::new("viz", "Visualization")
                .tool(ToolEntry::new("plot", "scatter_plot", WidgetParams::Empty)),
        )
}

#[test]
fn open_menu_shows_only_that_menus_items() {
    let valid = validate(descriptors()).unwrap();
    let mut store = Store::new(InteractionState::new());
    store.dispatch(Action::open_menu(["file"]));
    assert_eq!(store.state().active_menu_path(), ["file".to_string()]);

    let tree = compose(&valid, store.state(), &registry().snapshot());
    let open = tree.open_menu().unwrap();
    assert_eq!(open.id, "file");
    let ids: Vec<&str> = open.items.iter().map(|item| item.id.as_str()).collect();
    assert_eq!(ids, ["open", "save"]);
    let edit = &tree.menu_bar.menus[1];
    assert!(!edit.open);
    assert!(edit.items.is_empty());
}

#[test]
fn activating_an_unopened_document_changes_nothing() {
    let doc = DocumentRef::new("doc-1", "csv", "iris.csv", ContentHandle(1));
    let mut store = Store::new(InteractionState::new().with_documents(vec![doc]));
    assert_eq!(store.state().active_document_id(), Some("doc-1"));
    store.dispatch(Action::ActivateDocument("doc-2".into()));
    assert_eq!(store.state().active_document_id(), Some("doc-1"));
}

#[test]
fn unknown_kind_becomes_a_placeholder_without_failing_the_pass() {
    let valid = validate(descriptors()).unwrap();
    let state = InteractionState::new().with_expanded(["data", "viz"]);
    let tree = compose(&valid, &state, &registry().snapshot());

    let data = tree.compartment("data").unwrap();
    assert!(!data.tools[0].is_placeholder());
    let placeholders: Vec<&ToolNode> = tree.placeholders().collect();
    assert_eq!(placeholders.len(), 1);
    match placeholders[0] {
        ToolNode::Placeholder { id, miss, .. } => {
            assert_eq!(id, "plot");
            assert_eq!(
                miss,
                &ResolutionMiss::UnknownKind {
                    kind: "scatter_plot".into()
                }
            );
        }
        other => panic!("expected placeholder, got {other:?}"),
    }
}

#[test]
fn registering_a_missing_kind_fills_in_the_placeholder() {
    let registry = registry();
    let initial = InteractionState::new().with_expanded(["viz"]);
    let mut shell = Shell::mount(descriptors(), Arc::clone(&registry), initial).unwrap();
    assert_eq!(shell.current_tree().placeholders().count(), 1);

    registry
        .register(
            "scatter_plot",
            factory_fn(ParamShape::Empty, |_| {
                Ok(Arc::new(TextWidget::new("plot")) as Arc<dyn Widget>)
            }),
        )
        .unwrap();
    shell.refresh();
    assert_eq!(shell.current_tree().placeholders().count(), 0);
    assert!(shell.last_report().full);
}

#[test]
fn state_changes_reuse_untouched_subtrees() {
    let mut shell = Shell::mount(descriptors(), registry(), InteractionState::new()).unwrap();
    let before = Arc::clone(shell.current_tree());

    shell.dispatch(Action::ToggleCompartment("data".into()));
    let after = Arc::clone(shell.current_tree());
    let report = shell.last_report();

    assert!(!report.full);
    assert_eq!(report.rebuilt, 1);
    assert!(Arc::ptr_eq(&before.app_bar, &after.app_bar));
    assert!(Arc::ptr_eq(&before.menu_bar.menus[0], &after.menu_bar.menus[0]));
    assert!(Arc::ptr_eq(
        &before.tool_box.compartments[1],
        &after.tool_box.compartments[1]
    ));
    assert!(!Arc::ptr_eq(
        &before.tool_box.compartments[0],
        &after.tool_box.compartments[0]
    ));
    assert!(Arc::ptr_eq(&before.document_panel, &after.document_panel));
}

#[test]
fn incremental_tree_matches_a_fresh_compose() {
    let registry = registry();
    let mut shell = Shell::mount(descriptors(), Arc::clone(&registry), InteractionState::new())
        .unwrap();
    let actions = [
        Action::open_menu(["file", "save"]),
        Action::ToggleCompartment("viz".into()),
        Action::CloseMenu,
        Action::OpenDocument(DocumentRef::new("a", "csv", "a.csv", ContentHandle(0))),
        Action::ToggleCompartment("viz".into()),
        Action::open_menu(["edit"]),
    ];
    for action in actions {
        shell.dispatch(action);
        let fresh = compose(shell.descriptors(), shell.state(), &registry.snapshot());
        assert_eq!(**shell.current_tree(), fresh);
    }
}
