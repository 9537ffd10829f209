//! Composition engine: descriptors + interaction state -> widget tree.
//!
//! [`compose`] is the pure form and always builds the whole tree.
//! [`Composer`] keeps the previous pass around and, when only the
//! interaction state changed, rebuilds just the menus, compartments and
//! panels whose inputs differ; everything else is handed back by reference.

mod tree;

pub use tree::{
    AppBarNode, CompartmentNode, DialogNode, DocumentPanelNode, DocumentTab, MenuBarNode,
    MenuItemNode, MenuNode, ToolBoxNode, ToolNode, WidgetTree,
};

use std::sync::Arc;

use crate::descriptor::{CompartmentDescriptor, MenuDescriptor, ToolEntry, ValidDescriptors};
use crate::error::ResolutionMiss;
use crate::registry::RegistrySnapshot;
use crate::state::InteractionState;

/// Build the full widget tree for `descriptors` under `state`.
///
/// Deterministic for a given registry snapshot. Unknown or misconfigured
/// widget kinds become placeholders; the pass itself never fails.
pub fn compose(
    descriptors: &ValidDescriptors,
    state: &InteractionState,
    registry: &RegistrySnapshot,
) -> WidgetTree {
    let active = state.active_menu_path();
    WidgetTree {
        app_bar: Arc::new(build_app_bar(descriptors)),
        menu_bar: MenuBarNode {
            menus: descriptors
                .menus
                .iter()
                .map(|menu| Arc::new(build_top_menu(menu, active)))
                .collect(),
        },
        tool_box: ToolBoxNode {
            title: descriptors.toolbox_title.clone(),
            compartments: descriptors
                .compartments
                .iter()
                .map(|c| Arc::new(build_compartment(c, state.is_expanded(&c.id), registry)))
                .collect(),
        },
        document_panel: Arc::new(build_document_panel(state)),
        dialog: build_dialog(state).map(Arc::new),
    }
}

/// Subtree counts for one [`Composer::recompose`] pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompositionReport {
    pub rebuilt: usize,
    pub reused: usize,
    /// No previous pass could be reused (first pass, descriptor swap or a
    /// registry change).
    pub full: bool,
}

impl CompositionReport {
    fn track(&mut self, reused: bool) {
        if reused {
            self.reused += 1;
        } else {
            self.rebuilt += 1;
        }
    }
}

struct PassCache {
    descriptors: Arc<ValidDescriptors>,
    registry_generation: u64,
    menu_keys: Vec<Vec<String>>,
    tree: Arc<WidgetTree>,
}

/// Incremental composer owned by a shell session.
#[derive(Default)]
pub struct Composer {
    cache: Option<PassCache>,
}

impl Composer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tree(&self) -> Option<&Arc<WidgetTree>> {
        self.cache.as_ref().map(|cache| &cache.tree)
    }

    /// Forget the previous pass; the next one rebuilds everything.
    pub fn invalidate(&mut self) {
        self.cache = None;
    }

    /// Compose against the previous pass, reusing unchanged subtrees.
    ///
    /// A different descriptor instance or a newer registry generation
    /// forces a full pass, which yields the same tree [`compose`] would.
    pub fn recompose(
        &mut self,
        descriptors: &Arc<ValidDescriptors>,
        state: &InteractionState,
        registry: &RegistrySnapshot,
    ) -> (Arc<WidgetTree>, CompositionReport) {
        let previous = self.cache.take().filter(|cache| {
            Arc::ptr_eq(&cache.descriptors, descriptors)
                && cache.registry_generation == registry.generation()
        });
        let active = state.active_menu_path();
        let menu_keys: Vec<Vec<String>> = descriptors
            .menus
            .iter()
            .map(|menu| menu_key(menu, active))
            .collect();

        let (tree, report) = match previous {
            None => {
                let tree = compose(descriptors, state, registry);
                let report = CompositionReport {
                    rebuilt: subtree_count(&tree),
                    reused: 0,
                    full: true,
                };
                (tree, report)
            }
            Some(previous) => {
                let mut report = CompositionReport::default();
                let prev = &previous.tree;

                report.track(true);
                let app_bar = Arc::clone(&prev.app_bar);

                let menus = descriptors
                    .menus
                    .iter()
                    .zip(&prev.menu_bar.menus)
                    .zip(menu_keys.iter().zip(&previous.menu_keys))
                    .map(|((menu, prev_node), (key, prev_key))| {
                        let reuse = key == prev_key;
                        report.track(reuse);
                        if reuse {
                            Arc::clone(prev_node)
                        } else {
                            Arc::new(build_top_menu(menu, active))
                        }
                    })
                    .collect();

                let compartments = descriptors
                    .compartments
                    .iter()
                    .zip(&prev.tool_box.compartments)
                    .map(|(descriptor, prev_node)| {
                        let expanded = state.is_expanded(&descriptor.id);
                        let reuse = prev_node.expanded == expanded;
                        report.track(reuse);
                        if reuse {
                            Arc::clone(prev_node)
                        } else {
                            Arc::new(build_compartment(descriptor, expanded, registry))
                        }
                    })
                    .collect();

                let document_panel =
                    reuse_if_equal(&prev.document_panel, build_document_panel(state), &mut report);

                let dialog = match (build_dialog(state), &prev.dialog) {
                    (Some(node), Some(prev_node)) => {
                        Some(reuse_if_equal(prev_node, node, &mut report))
                    }
                    (Some(node), None) => {
                        report.track(false);
                        Some(Arc::new(node))
                    }
                    (None, _) => None,
                };

                let tree = WidgetTree {
                    app_bar,
                    menu_bar: MenuBarNode { menus },
                    tool_box: ToolBoxNode {
                        title: prev.tool_box.title.clone(),
                        compartments,
                    },
                    document_panel,
                    dialog,
                };
                (tree, report)
            }
        };

        tracing::debug!(
            rebuilt = report.rebuilt,
            reused = report.reused,
            full = report.full,
            "composition pass"
        );
        let tree = Arc::new(tree);
        self.cache = Some(PassCache {
            descriptors: Arc::clone(descriptors),
            registry_generation: registry.generation(),
            menu_keys,
            tree: Arc::clone(&tree),
        });
        (tree, report)
    }
}

fn reuse_if_equal<T: PartialEq>(
    previous: &Arc<T>,
    fresh: T,
    report: &mut CompositionReport,
) -> Arc<T> {
    let reuse = **previous == fresh;
    report.track(reuse);
    if reuse {
        Arc::clone(previous)
    } else {
        Arc::new(fresh)
    }
}

fn subtree_count(tree: &WidgetTree) -> usize {
    2 + tree.menu_bar.menus.len()
        + tree.tool_box.compartments.len()
        + usize::from(tree.dialog.is_some())
}

/// The part of the active path a top-level menu depends on: all of it when
/// the path starts in this menu, nothing otherwise.
fn menu_key(menu: &MenuDescriptor, active: &[String]) -> Vec<String> {
    if active.first() == Some(&menu.id) {
        active.to_vec()
    } else {
        Vec::new()
    }
}

fn build_app_bar(descriptors: &ValidDescriptors) -> AppBarNode {
    AppBarNode {
        title: descriptors.title.clone(),
    }
}

fn build_top_menu(menu: &MenuDescriptor, active: &[String]) -> MenuNode {
    build_menu(menu, std::slice::from_ref(&menu.id), active)
}

// `prefix` is the path addressing this menu level: the top-level menu id
// followed by the ids of the items leading here.
fn build_menu(menu: &MenuDescriptor, prefix: &[String], active: &[String]) -> MenuNode {
    let open = active.starts_with(prefix);
    let items = if open {
        menu.items
            .iter()
            .map(|item| {
                let mut path = prefix.to_vec();
                path.push(item.id.clone());
                let highlighted = active.starts_with(&path);
                let submenu = item
                    .submenu
                    .as_deref()
                    .filter(|_| highlighted)
                    .map(|submenu| Arc::new(build_menu(submenu, &path, active)));
                MenuItemNode {
                    id: item.id.clone(),
                    label: item.label.clone(),
                    icon: item.icon.clone(),
                    action: item.action.clone(),
                    has_submenu: item.submenu.is_some(),
                    highlighted,
                    submenu,
                }
            })
            .collect()
    } else {
        Vec::new()
    };
    MenuNode {
        id: menu.id.clone(),
        label: menu.label.clone(),
        open,
        items,
    }
}

fn build_compartment(
    compartment: &CompartmentDescriptor,
    expanded: bool,
    registry: &RegistrySnapshot,
) -> CompartmentNode {
    let tools = if expanded {
        compartment
            .tools
            .iter()
            .map(|entry| build_tool(entry, registry))
            .collect()
    } else {
        Vec::new()
    };
    CompartmentNode {
        id: compartment.id.clone(),
        title: compartment.title.clone(),
        expanded,
        tools,
    }
}

fn build_tool(entry: &ToolEntry, registry: &RegistrySnapshot) -> ToolNode {
    match resolve_tool(entry, registry) {
        Ok(widget) => ToolNode::Widget {
            id: entry.id.clone(),
            kind: entry.widget_kind.clone(),
            params: entry.params.clone(),
            widget,
        },
        Err(miss) => {
            tracing::warn!(entry = %entry.id, %miss, "tool entry rendered as placeholder");
            ToolNode::Placeholder {
                id: entry.id.clone(),
                kind: entry.widget_kind.clone(),
                miss,
            }
        }
    }
}

fn resolve_tool(
    entry: &ToolEntry,
    registry: &RegistrySnapshot,
) -> Result<Arc<dyn crate::widget::Widget>, ResolutionMiss> {
    let kind = &entry.widget_kind;
    let factory = registry
        .resolve(kind)
        .ok_or_else(|| ResolutionMiss::UnknownKind { kind: kind.clone() })?;
    let expected = factory.shape();
    if !expected.accepts(&entry.params) {
        return Err(ResolutionMiss::ParamsMismatch {
            kind: kind.clone(),
            expected,
            found: entry.params.shape(),
        });
    }
    factory
        .build(&entry.params)
        .map_err(|source| ResolutionMiss::FactoryFailed {
            kind: kind.clone(),
            source,
        })
}

fn build_document_panel(state: &InteractionState) -> DocumentPanelNode {
    let active = state.active_document_id();
    DocumentPanelNode {
        tabs: state
            .open_documents()
            .iter()
            .map(|doc| DocumentTab {
                id: doc.id.clone(),
                kind: doc.kind.clone(),
                title: doc.title.clone(),
                handle: doc.handle,
                active: active == Some(doc.id.as_str()),
            })
            .collect(),
    }
}

fn build_dialog(state: &InteractionState) -> Option<DialogNode> {
    let queue = state.dialog_queue();
    queue.front().map(|request| DialogNode {
        id: request.id.clone(),
        kind: request.kind.clone(),
        payload: request.payload.clone(),
        queued: queue.len() - 1,
    })
}
