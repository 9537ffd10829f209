//! Declarative descriptors for the shell: menus, tool compartments and the
//! application header. Pure data; see [`validate`] for the structural rules.

mod compartment;
mod menu;
mod validate;

pub use compartment::{CompartmentDescriptor, ToolEntry};
pub use menu::{IconRef, MenuDescriptor, MenuItem};
pub use validate::{ValidDescriptors, validate};

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::LoadError;

pub const DEFAULT_TOOLBOX_TITLE: &str = "Tool Box";

fn default_toolbox_title() -> String {
    DEFAULT_TOOLBOX_TITLE.to_string()
}

/// The full descriptor model handed to a shell at mount time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Descriptors {
    #[serde(default)]
    pub title: String,
    #[serde(default = "default_toolbox_title")]
    pub toolbox_title: String,
    #[serde(default)]
    pub menus: Vec<MenuDescriptor>,
    #[serde(default)]
    pub compartments: Vec<CompartmentDescriptor>,
}

impl Default for Descriptors {
    fn default() -> Self {
        Self {
            title: String::new(),
            toolbox_title: default_toolbox_title(),
            menus: Vec::new(),
            compartments: Vec::new(),
        }
    }
}

impl Descriptors {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn menu(mut self, menu: MenuDescriptor) -> Self {
        self.menus.push(menu);
        self
    }

    pub fn compartment(mut self, compartment: CompartmentDescriptor) -> Self {
        self.compartments.push(compartment);
        self
    }

    pub fn from_toml_str(source: &str) -> Result<Self, LoadError> {
        Ok(toml::from_str(source)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Find a top-level menu by id.
    pub fn find_menu(&self, id: &str) -> Option<&MenuDescriptor> {
        self.menus.iter().find(|menu| menu.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::WidgetParams;
    use indoc::indoc;
    use std::io::Write;

    const SAMPLE: &str = indoc! {r#"
        title = "candis"

        [[menus]]
        id = "file"
        label = "File"

        [[menus.items]]
        id = "open"
        label = "Open"
        action = "document.open"

        [[compartments]]
        id = "data"
        title = "Data"

        [[compartments.tools]]
        id = "create"
        widget_kind = "button"
        params = { type = "button", label = "Create" }
    "#};

    #[test]
    fn loads_descriptors_from_toml() {
        let desc = Descriptors::from_toml_str(SAMPLE).unwrap();
        assert_eq!(desc.title, "candis");
        assert_eq!(desc.toolbox_title, DEFAULT_TOOLBOX_TITLE);
        let file = desc.find_menu("file").unwrap();
        assert_eq!(file.items[0].action.as_deref(), Some("document.open"));
        assert_eq!(
            desc.compartments[0].tools[0].params,
            WidgetParams::button("Create")
        );
    }

    #[test]
    fn loads_descriptors_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let desc = Descriptors::from_path(file.path()).unwrap();
        assert_eq!(desc.menus.len(), 1);
    }

    #[test]
    fn missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let err = Descriptors::from_path(&path).unwrap_err();
        assert!(matches!(err, LoadError::Io { path: p, .. } if p == path));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = Descriptors::from_toml_str("menus = 3").unwrap_err();
        assert!(matches!(err, LoadError::Parse(_)));
    }
}
