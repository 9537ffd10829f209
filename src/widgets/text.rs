use std::sync::Arc;

use ratatui::layout::Rect;
use ratatui::widgets::{Paragraph, Wrap};

use crate::params::{ParamShape, WidgetParams};
use crate::paint::UiFrame;
use crate::registry::{WidgetFactory, factory_fn};
use crate::widget::{Widget, WidgetContext};

const MAX_ROWS: u16 = 6;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextWidget {
    body: String,
}

impl TextWidget {
    pub fn new(body: impl Into<String>) -> Self {
        Self { body: body.into() }
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

impl Widget for TextWidget {
    fn height(&self) -> u16 {
        (self.body.lines().count() as u16).clamp(1, MAX_ROWS)
    }

    fn render(&self, frame: &mut UiFrame<'_>, area: Rect, _ctx: &WidgetContext) {
        let paragraph = Paragraph::new(self.body.as_str()).wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
    }
}

pub(super) fn factory() -> Arc<dyn WidgetFactory> {
    factory_fn(ParamShape::Text, |params| {
        let body = match params {
            WidgetParams::Text { body } => body.clone(),
            _ => String::new(),
        };
        Ok(Arc::new(TextWidget::new(body)) as Arc<dyn Widget>)
    })
}
