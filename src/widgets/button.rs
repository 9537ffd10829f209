use std::sync::Arc;

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use crate::params::{ParamShape, WidgetParams};
use crate::paint::UiFrame;
use crate::registry::{WidgetFactory, factory_fn};
use crate::widget::{Widget, WidgetContext};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonWidget {
    label: String,
    action: Option<String>,
}

impl ButtonWidget {
    pub fn new(label: impl Into<String>, action: Option<String>) -> Self {
        Self {
            label: label.into(),
            action,
        }
    }

    /// Command dispatched by the host when the button is pressed.
    pub fn action(&self) -> Option<&str> {
        self.action.as_deref()
    }
}

impl Widget for ButtonWidget {
    fn render(&self, frame: &mut UiFrame<'_>, area: Rect, ctx: &WidgetContext) {
        let mut style = Style::default().fg(crate::theme::accent());
        if ctx.focused() {
            style = style.add_modifier(Modifier::REVERSED);
        }
        let text = format!("[ {} ]", self.label);
        frame.set_string(area, area.x, area.y, &text, style);
    }
}

pub(super) fn factory() -> Arc<dyn WidgetFactory> {
    factory_fn(ParamShape::Button, |params| {
        let widget = match params {
            WidgetParams::Button { label, action } => {
                ButtonWidget::new(label.clone(), action.clone())
            }
            _ => ButtonWidget::new("OK", None),
        };
        Ok(Arc::new(widget) as Arc<dyn Widget>)
    })
}
