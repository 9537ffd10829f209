use std::sync::Arc;

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use crate::params::{ParamShape, WidgetParams};
use crate::paint::UiFrame;
use crate::registry::{WidgetFactory, factory_fn};
use crate::widget::{Widget, WidgetContext};

/// A single-line text field. Shows the placeholder (dimmed) while empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputWidget {
    placeholder: String,
    value: String,
}

impl InputWidget {
    pub fn new(placeholder: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            placeholder: placeholder.into(),
            value: value.into(),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

impl Widget for InputWidget {
    fn render(&self, frame: &mut UiFrame<'_>, area: Rect, ctx: &WidgetContext) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let mut field = Style::default().add_modifier(Modifier::UNDERLINED);
        if ctx.focused() {
            field = field.add_modifier(Modifier::BOLD);
        }
        let row = Rect { height: 1, ..area };
        frame.fill(row, field);
        let (text, style) = if self.value.is_empty() {
            (self.placeholder.as_str(), field.add_modifier(Modifier::DIM))
        } else {
            (self.value.as_str(), field)
        };
        frame.set_string(row, row.x, row.y, text, style);
    }
}

pub(super) fn factory() -> Arc<dyn WidgetFactory> {
    factory_fn(ParamShape::Input, |params| {
        let widget = match params {
            WidgetParams::Input { placeholder, value } => {
                InputWidget::new(placeholder.clone(), value.clone())
            }
            _ => InputWidget::new("", ""),
        };
        Ok(Arc::new(widget) as Arc<dyn Widget>)
    })
}
