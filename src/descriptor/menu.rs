use serde::{Deserialize, Serialize};

/// Reference to an icon resolved by the host toolkit (a glyph in the
/// terminal host).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IconRef(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuDescriptor {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub items: Vec<MenuItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub icon: Option<IconRef>,
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub submenu: Option<Box<MenuDescriptor>>,
}

impl MenuDescriptor {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            items: Vec::new(),
        }
    }

    pub fn item(mut self, item: MenuItem) -> Self {
        self.items.push(item);
        self
    }

    /// Look up the item addressed by `path`, where `path[0]` names an item of
    /// this menu and every following segment descends into a submenu.
    pub fn find(&self, path: &[String]) -> Option<&MenuItem> {
        let (first, rest) = path.split_first()?;
        let item = self.items.iter().find(|item| &item.id == first)?;
        if rest.is_empty() {
            return Some(item);
        }
        item.submenu.as_deref()?.find(rest)
    }
}

impl MenuItem {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            icon: None,
            action: None,
            submenu: None,
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(IconRef(icon.into()));
        self
    }

    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    pub fn with_submenu(mut self, submenu: MenuDescriptor) -> Self {
        self.submenu = Some(Box::new(submenu));
        self
    }
}
