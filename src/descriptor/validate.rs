use std::collections::HashSet;
use std::ops::Deref;

use super::{CompartmentDescriptor, Descriptors, MenuDescriptor};
use crate::constants::MAX_MENU_DEPTH;
use crate::error::ValidationError;

/// Descriptors that passed [`validate`]. Only this type can be mounted or
/// composed, so a malformed descriptor never renders partially.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidDescriptors(Descriptors);

impl ValidDescriptors {
    pub fn into_inner(self) -> Descriptors {
        self.0
    }
}

impl Deref for ValidDescriptors {
    type Target = Descriptors;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Check sibling id uniqueness, finite acyclic submenu nesting and non-empty
/// widget kinds. Pure; the first violation found is returned.
pub fn validate(descriptors: Descriptors) -> Result<ValidDescriptors, ValidationError> {
    let mut menu_ids = HashSet::new();
    for menu in &descriptors.menus {
        let path = format!("menus/{}", menu.id);
        check_id(&menu.id, "menus", &mut menu_ids)?;
        validate_menu(menu, &path, 1)?;
    }

    let mut compartment_ids = HashSet::new();
    for compartment in &descriptors.compartments {
        check_id(&compartment.id, "compartments", &mut compartment_ids)?;
        validate_compartment(compartment)?;
    }

    Ok(ValidDescriptors(descriptors))
}

fn check_id<'a>(
    id: &'a str,
    path: &str,
    seen: &mut HashSet<&'a str>,
) -> Result<(), ValidationError> {
    if id.is_empty() {
        return Err(ValidationError::EmptyId {
            path: path.to_string(),
        });
    }
    if !seen.insert(id) {
        return Err(ValidationError::DuplicateId {
            path: path.to_string(),
            id: id.to_string(),
        });
    }
    Ok(())
}

// Descriptors are owned trees, so a literal cycle cannot be built; a loader
// can still feed absurdly deep nesting, which is what the depth limit stops.
// Menu paths address items by item id, so a submenu's own id may repeat.
fn validate_menu(menu: &MenuDescriptor, path: &str, depth: usize) -> Result<(), ValidationError> {
    if depth > MAX_MENU_DEPTH {
        return Err(ValidationError::NestingTooDeep {
            path: path.to_string(),
            max: MAX_MENU_DEPTH,
        });
    }
    let mut seen = HashSet::new();
    for item in &menu.items {
        check_id(&item.id, path, &mut seen)?;
        if let Some(submenu) = item.submenu.as_deref() {
            let child_path = format!("{}/{}", path, item.id);
            validate_menu(submenu, &child_path, depth + 1)?;
        }
    }
    Ok(())
}

fn validate_compartment(compartment: &CompartmentDescriptor) -> Result<(), ValidationError> {
    let path = format!("compartments/{}", compartment.id);
    let mut seen = HashSet::new();
    for tool in &compartment.tools {
        check_id(&tool.id, &path, &mut seen)?;
        if tool.widget_kind.trim().is_empty() {
            return Err(ValidationError::EmptyWidgetKind {
                path,
                id: tool.id.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{MenuItem, ToolEntry};
    use crate::params::WidgetParams;

    fn file_menu() -> MenuDescriptor {
        MenuDescriptor::new("file", "File")
            .item(MenuItem::new("open", "Open"))
            .item(MenuItem::new("save", "Save"))
    }

    #[test]
    fn accepts_well_formed_descriptors() {
        let desc = Descriptors::new("app").menu(file_menu()).compartment(
            CompartmentDescriptor::new("data", "Data").tool(ToolEntry::new(
                "create",
                "button",
                WidgetParams::Empty,
            )),
        );
        let valid = validate(desc.clone()).unwrap();
        assert_eq!(*valid, desc);
    }

    #[test]
    fn rejects_duplicate_sibling_items() {
        let menu = file_menu().item(MenuItem::new("open", "Open again"));
        let err = validate(Descriptors::new("app").menu(menu)).unwrap_err();
        assert_eq!(
            err,
            ValidationError::DuplicateId {
                path: "menus/file".into(),
                id: "open".into(),
            }
        );
    }

    #[test]
    fn same_item_id_under_different_parents_is_fine() {
        let edit = MenuDescriptor::new("edit", "Edit").item(MenuItem::new("open", "Open"));
        assert!(validate(Descriptors::new("app").menu(file_menu()).menu(edit)).is_ok());
    }

    #[test]
    fn rejects_duplicate_top_level_menus() {
        let err = validate(Descriptors::new("app").menu(file_menu()).menu(file_menu()));
        assert!(matches!(err, Err(ValidationError::DuplicateId { .. })));
    }

    #[test]
    fn submenu_may_reuse_its_parent_menu_id() {
        let inner = MenuDescriptor::new("file", "File").item(MenuItem::new("x", "X"));
        let menu = MenuDescriptor::new("file", "File")
            .item(MenuItem::new("more", "More").with_submenu(inner));
        let valid = validate(Descriptors::new("app").menu(menu)).unwrap();
        let path = ["more".to_string(), "x".to_string()];
        assert_eq!(valid.menus[0].find(&path).unwrap().id, "x");
    }

    #[test]
    fn rejects_runaway_nesting() {
        let mut menu = MenuDescriptor::new("m0", "leaf");
        for depth in 1..=MAX_MENU_DEPTH + 1 {
            menu = MenuDescriptor::new(format!("m{depth}"), "level")
                .item(MenuItem::new("next", "Next").with_submenu(menu));
        }
        let err = validate(Descriptors::new("app").menu(menu)).unwrap_err();
        assert!(matches!(err, ValidationError::NestingTooDeep { .. }));
    }

    #[test]
    fn rejects_empty_widget_kind() {
        let compartment = CompartmentDescriptor::new("data", "Data").tool(ToolEntry::new(
            "t",
            "  ",
            WidgetParams::Empty,
        ));
        let err = validate(Descriptors::new("app").compartment(compartment)).unwrap_err();
        assert!(matches!(err, ValidationError::EmptyWidgetKind { id, .. } if id == "t"));
    }

    #[test]
    fn rejects_empty_ids() {
        let menu = MenuDescriptor::new("", "Nameless");
        assert!(matches!(
            validate(Descriptors::new("app").menu(menu)),
            Err(ValidationError::EmptyId { .. })
        ));
    }
}
