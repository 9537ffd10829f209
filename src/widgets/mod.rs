//! Built-in widget kinds for the terminal host.
//!
//! These cover the tool entries a typical tool box needs. Hosts register
//! them with [`register_builtin`] and may add their own kinds next to them.

mod button;
mod input;
mod select;
mod slider;
mod text;
mod toggle_list;

pub use button::ButtonWidget;
pub use input::InputWidget;
pub use select::SelectWidget;
pub use slider::SliderWidget;
pub use text::TextWidget;
pub use toggle_list::ToggleListWidget;

use std::sync::{Arc, OnceLock};

use crate::error::RegistryError;
use crate::registry::{Registry, WidgetFactory};

pub const TEXT: &str = "text";
pub const BUTTON: &str = "button";
pub const TOGGLE_LIST: &str = "toggle_list";
pub const SELECT: &str = "select";
pub const SLIDER: &str = "slider";
pub const INPUT: &str = "input";

static BUILTIN: OnceLock<Vec<(&'static str, Arc<dyn WidgetFactory>)>> = OnceLock::new();

/// The process-wide built-in factory instances. Handing out the same `Arc`s
/// every time is what makes repeated [`register_builtin`] calls no-ops.
pub fn builtin_factories() -> &'static [(&'static str, Arc<dyn WidgetFactory>)] {
    BUILTIN.get_or_init(|| {
        vec![
            (TEXT, text::factory()),
            (BUTTON, button::factory()),
            (TOGGLE_LIST, toggle_list::factory()),
            (SELECT, select::factory()),
            (SLIDER, slider::factory()),
            (INPUT, input::factory()),
        ]
    })
}

pub fn register_builtin(registry: &Registry) -> Result<(), RegistryError> {
    for (kind, factory) in builtin_factories() {
        registry.register(*kind, Arc::clone(factory))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::WidgetParams;

    #[test]
    fn register_builtin_can_run_twice() {
        let registry = Registry::new();
        register_builtin(&registry).unwrap();
        register_builtin(&registry).unwrap();
        assert_eq!(
            registry.kinds(),
            vec!["button", "input", "select", "slider", "text", "toggle_list"]
        );
    }

    #[test]
    fn every_builtin_builds_from_empty_params() {
        for (kind, factory) in builtin_factories() {
            assert!(
                factory.build(&WidgetParams::Empty).is_ok(),
                "{kind} should fall back to defaults"
            );
        }
    }
}
