//! Keyboard navigation for the terminal host.
//!
//! The navigator owns only host-side cursor state (which pane has focus,
//! which compartment the cursor is on). Everything that changes what the
//! widget tree shows is expressed as store [`Action`]s.

use crate::actions::Action;
use crate::descriptor::{MenuItem, ValidDescriptors};
use crate::dialog::{DialogPayload, DialogResult};
use crate::keybindings::Intent;
use crate::state::InteractionState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pane {
    #[default]
    ToolBox,
    Documents,
}

/// Cursor position painted by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Focus {
    pub pane: Pane,
    pub compartment: usize,
}

#[derive(Debug, Default)]
pub struct Navigator {
    focus: Focus,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    /// Translate `intent` into store actions. Dialogs take precedence over
    /// menus, and menus over the panes.
    pub fn handle(
        &mut self,
        intent: Intent,
        descriptors: &ValidDescriptors,
        state: &InteractionState,
    ) -> Vec<Action> {
        if let Some(dialog) = state.current_dialog() {
            return dialog_actions(intent, &dialog.payload);
        }
        if state.menu_open() {
            return menu_actions(intent, descriptors, state.active_menu_path());
        }
        self.pane_actions(intent, descriptors, state)
    }

    fn pane_actions(
        &mut self,
        intent: Intent,
        descriptors: &ValidDescriptors,
        state: &InteractionState,
    ) -> Vec<Action> {
        match intent {
            Intent::OpenMenuBar => descriptors
                .menus
                .first()
                .map(|menu| vec![Action::open_menu([menu.id.as_str()])])
                .unwrap_or_default(),
            Intent::FocusNext => {
                self.focus.pane = match self.focus.pane {
                    Pane::ToolBox => Pane::Documents,
                    Pane::Documents => Pane::ToolBox,
                };
                Vec::new()
            }
            Intent::Back => Vec::new(),
            _ => match self.focus.pane {
                Pane::ToolBox => self.toolbox_actions(intent, descriptors),
                Pane::Documents => document_actions(intent, state),
            },
        }
    }

    fn toolbox_actions(&mut self, intent: Intent, descriptors: &ValidDescriptors) -> Vec<Action> {
        let count = descriptors.compartments.len();
        if count == 0 {
            return Vec::new();
        }
        self.focus.compartment = self.focus.compartment.min(count - 1);
        match intent {
            Intent::Up => {
                self.focus.compartment = self.focus.compartment.saturating_sub(1);
                Vec::new()
            }
            Intent::Down => {
                self.focus.compartment = (self.focus.compartment + 1).min(count - 1);
                Vec::new()
            }
            Intent::Toggle | Intent::Activate => {
                let id = descriptors.compartments[self.focus.compartment].id.clone();
                vec![Action::ToggleCompartment(id)]
            }
            _ => Vec::new(),
        }
    }
}

fn dialog_actions(intent: Intent, payload: &DialogPayload) -> Vec<Action> {
    let result = match intent {
        Intent::Activate | Intent::Confirm => match payload {
            DialogPayload::Input { default, .. } => DialogResult::Submitted(default.clone()),
            _ => DialogResult::Confirmed,
        },
        Intent::Back | Intent::Cancel => DialogResult::Cancelled,
        _ => return Vec::new(),
    };
    vec![Action::ResolveDialog(result)]
}

fn document_actions(intent: Intent, state: &InteractionState) -> Vec<Action> {
    let docs = state.open_documents();
    let Some(active) = state
        .active_document_id()
        .and_then(|id| docs.iter().position(|doc| doc.id == id))
    else {
        return Vec::new();
    };
    let target = match intent {
        Intent::Left | Intent::Up => active.checked_sub(1),
        Intent::Right | Intent::Down => Some(active + 1).filter(|i| *i < docs.len()),
        Intent::CloseDocument => return vec![Action::CloseDocument(docs[active].id.clone())],
        _ => None,
    };
    target
        .map(|i| vec![Action::ActivateDocument(docs[i].id.clone())])
        .unwrap_or_default()
}

/// Items shown at the deepest open level of `path` (the level holding the
/// highlighted item, or the top-level menu when nothing is highlighted).
fn level_items<'a>(descriptors: &'a ValidDescriptors, path: &[String]) -> Option<&'a [MenuItem]> {
    let menu = descriptors.find_menu(path.first()?)?;
    match path.len() {
        1 | 2 => Some(&menu.items),
        len => {
            let parent = menu.find(&path[1..len - 1])?;
            parent.submenu.as_deref().map(|sub| sub.items.as_slice())
        }
    }
}

fn menu_actions(intent: Intent, descriptors: &ValidDescriptors, path: &[String]) -> Vec<Action> {
    let Some(items) = level_items(descriptors, path) else {
        return vec![Action::CloseMenu];
    };
    let highlighted = if path.len() > 1 {
        descriptors
            .find_menu(&path[0])
            .and_then(|menu| menu.find(&path[1..]))
    } else {
        None
    };

    match intent {
        Intent::Back | Intent::OpenMenuBar => {
            if path.len() > 1 {
                vec![Action::OpenMenu(path[..path.len() - 1].to_vec())]
            } else {
                vec![Action::CloseMenu]
            }
        }
        Intent::Left | Intent::Right => {
            let menus = &descriptors.menus;
            let Some(index) = menus.iter().position(|menu| menu.id == path[0]) else {
                return vec![Action::CloseMenu];
            };
            let next = if intent == Intent::Right {
                (index + 1) % menus.len()
            } else {
                (index + menus.len() - 1) % menus.len()
            };
            vec![Action::open_menu([menus[next].id.as_str()])]
        }
        Intent::Up | Intent::Down => {
            if items.is_empty() {
                return Vec::new();
            }
            let Some(current) = highlighted else {
                return vec![with_segment(open_level(path), &items[0].id)];
            };
            let index = items
                .iter()
                .position(|item| item.id == current.id)
                .unwrap_or(0);
            let next = if intent == Intent::Down {
                (index + 1) % items.len()
            } else {
                (index + items.len() - 1) % items.len()
            };
            let parent = &path[..path.len() - 1];
            vec![with_segment(parent, &items[next].id)]
        }
        Intent::Activate => match highlighted {
            None => items
                .first()
                .map(|item| vec![with_segment(open_level(path), &item.id)])
                .unwrap_or_default(),
            Some(item) => match item.submenu.as_deref() {
                Some(submenu) => submenu
                    .items
                    .first()
                    .map(|first| vec![with_segment(path, &first.id)])
                    .unwrap_or_default(),
                None => {
                    let mut actions = vec![Action::CloseMenu];
                    if let Some(command) = &item.action {
                        actions.push(Action::Command(command.clone()));
                    }
                    actions
                }
            },
        },
        _ => Vec::new(),
    }
}

/// Prefix addressing the level whose items are listed. Beyond the top-level
/// menu the last segment names an item; if that item is gone (stale path after
/// a descriptor swap) it is dropped so the next segment replaces it.
fn open_level(path: &[String]) -> &[String] {
    if path.len() > 1 {
        &path[..path.len() - 1]
    } else {
        path
    }
}

fn with_segment(path: &[String], segment: &str) -> Action {
    let mut next = path.to_vec();
    next.push(segment.to_string());
    Action::OpenMenu(next)
}
