use std::fmt;

use crate::dialog::{DialogRequest, DialogResult};
use crate::document::DocumentRef;

/// User-level transitions accepted by the interaction store.
#[derive(Debug)]
pub enum Action {
    // Menus
    OpenMenu(Vec<String>),
    CloseMenu,
    // Tool box
    ToggleCompartment(String),
    // Documents
    OpenDocument(DocumentRef),
    ActivateDocument(String),
    CloseDocument(String),
    // Dialogs
    OpenDialog(DialogRequest),
    ResolveDialog(DialogResult),
    CloseAll,
    /// Host-level command, usually a menu item's action id. The store does
    /// not know these and leaves the state untouched.
    Command(String),
}

impl Action {
    pub fn open_menu<I, S>(path: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Action::OpenMenu(path.into_iter().map(Into::into).collect())
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::OpenMenu(path) => write!(f, "Open menu {}", path.join("/")),
            Action::CloseMenu => write!(f, "Close menu"),
            Action::ToggleCompartment(id) => write!(f, "Toggle compartment {}", id),
            Action::OpenDocument(doc) => write!(f, "Open document {}", doc.id),
            Action::ActivateDocument(id) => write!(f, "Activate document {}", id),
            Action::CloseDocument(id) => write!(f, "Close document {}", id),
            Action::OpenDialog(req) => write!(f, "Open dialog {}", req.id),
            Action::ResolveDialog(result) => write!(f, "Resolve dialog ({:?})", result),
            Action::CloseAll => write!(f, "Close all"),
            Action::Command(name) => write!(f, "Command {}", name),
        }
    }
}
