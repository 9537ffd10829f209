//! The widget tree produced by a composition pass.
//!
//! Subtrees sit behind `Arc`s so that a later pass can hand back the very same
//! allocation for anything whose inputs did not change. Equality is
//! structural; built widget instances are compared through the descriptor
//! data they were built from, not by identity.

use std::fmt;
use std::sync::Arc;

use crate::descriptor::IconRef;
use crate::dialog::DialogPayload;
use crate::document::ContentHandle;
use crate::error::ResolutionMiss;
use crate::params::WidgetParams;
use crate::widget::Widget;

#[derive(Debug, Clone, PartialEq)]
pub struct WidgetTree {
    pub app_bar: Arc<AppBarNode>,
    pub menu_bar: MenuBarNode,
    pub tool_box: ToolBoxNode,
    pub document_panel: Arc<DocumentPanelNode>,
    pub dialog: Option<Arc<DialogNode>>,
}

impl WidgetTree {
    /// The open top-level menu, if any.
    pub fn open_menu(&self) -> Option<&Arc<MenuNode>> {
        self.menu_bar.menus.iter().find(|menu| menu.open)
    }

    pub fn compartment(&self, id: &str) -> Option<&Arc<CompartmentNode>> {
        self.tool_box
            .compartments
            .iter()
            .find(|compartment| compartment.id == id)
    }

    /// Every placeholder in the tree, in tool box order.
    pub fn placeholders(&self) -> impl Iterator<Item = &ToolNode> {
        self.tool_box
            .compartments
            .iter()
            .flat_map(|compartment| compartment.tools.iter())
            .filter(|tool| tool.is_placeholder())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppBarNode {
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MenuBarNode {
    pub menus: Vec<Arc<MenuNode>>,
}

/// A menu level. `items` is only populated while the menu is open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuNode {
    pub id: String,
    pub label: String,
    pub open: bool,
    pub items: Vec<MenuItemNode>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItemNode {
    pub id: String,
    pub label: String,
    pub icon: Option<IconRef>,
    pub action: Option<String>,
    pub has_submenu: bool,
    /// On the active menu path.
    pub highlighted: bool,
    pub submenu: Option<Arc<MenuNode>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ToolBoxNode {
    pub title: String,
    pub compartments: Vec<Arc<CompartmentNode>>,
}

/// A compartment. `tools` is only populated while it is expanded.
#[derive(Debug, Clone, PartialEq)]
pub struct CompartmentNode {
    pub id: String,
    pub title: String,
    pub expanded: bool,
    pub tools: Vec<ToolNode>,
}

#[derive(Clone)]
pub enum ToolNode {
    Widget {
        id: String,
        kind: String,
        params: WidgetParams,
        widget: Arc<dyn Widget>,
    },
    /// Fail-closed stand-in for an entry whose kind could not be built.
    Placeholder {
        id: String,
        kind: String,
        miss: ResolutionMiss,
    },
}

impl ToolNode {
    pub fn id(&self) -> &str {
        match self {
            ToolNode::Widget { id, .. } | ToolNode::Placeholder { id, .. } => id,
        }
    }

    pub fn kind(&self) -> &str {
        match self {
            ToolNode::Widget { kind, .. } | ToolNode::Placeholder { kind, .. } => kind,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, ToolNode::Placeholder { .. })
    }

    pub fn height(&self) -> u16 {
        match self {
            ToolNode::Widget { widget, .. } => widget.height(),
            ToolNode::Placeholder { .. } => 1,
        }
    }
}

impl PartialEq for ToolNode {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                ToolNode::Widget {
                    id: a_id,
                    kind: a_kind,
                    params: a_params,
                    ..
                },
                ToolNode::Widget {
                    id: b_id,
                    kind: b_kind,
                    params: b_params,
                    ..
                },
            ) => a_id == b_id && a_kind == b_kind && a_params == b_params,
            (
                ToolNode::Placeholder {
                    id: a_id,
                    kind: a_kind,
                    miss: a_miss,
                },
                ToolNode::Placeholder {
                    id: b_id,
                    kind: b_kind,
                    miss: b_miss,
                },
            ) => a_id == b_id && a_kind == b_kind && a_miss == b_miss,
            _ => false,
        }
    }
}

impl fmt::Debug for ToolNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolNode::Widget {
                id, kind, params, ..
            } => f
                .debug_struct("Widget")
                .field("id", id)
                .field("kind", kind)
                .field("params", params)
                .finish_non_exhaustive(),
            ToolNode::Placeholder { id, kind, miss } => f
                .debug_struct("Placeholder")
                .field("id", id)
                .field("kind", kind)
                .field("miss", miss)
                .finish(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DocumentPanelNode {
    pub tabs: Vec<DocumentTab>,
}

impl DocumentPanelNode {
    pub fn active(&self) -> Option<&DocumentTab> {
        self.tabs.iter().find(|tab| tab.active)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentTab {
    pub id: String,
    pub kind: String,
    pub title: String,
    pub handle: ContentHandle,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogNode {
    pub id: String,
    pub kind: String,
    pub payload: DialogPayload,
    /// Requests waiting behind this one.
    pub queued: usize,
}
