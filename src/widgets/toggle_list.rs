use std::sync::Arc;

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{List, ListItem};

use crate::params::{ParamShape, ToggleOption, WidgetParams};
use crate::paint::UiFrame;
use crate::registry::{WidgetFactory, factory_fn};
use crate::widget::{Widget, WidgetContext};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleListWidget {
    items: Vec<ToggleOption>,
}

impl ToggleListWidget {
    pub fn new(items: Vec<ToggleOption>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[ToggleOption] {
        &self.items
    }

    pub fn checked_ids(&self) -> impl Iterator<Item = &str> {
        self.items
            .iter()
            .filter(|item| item.checked)
            .map(|item| item.id.as_str())
    }
}

impl Widget for ToggleListWidget {
    fn height(&self) -> u16 {
        u16::try_from(self.items.len()).unwrap_or(u16::MAX).max(1)
    }

    fn render(&self, frame: &mut UiFrame<'_>, area: Rect, ctx: &WidgetContext) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let items: Vec<ListItem> = self
            .items
            .iter()
            .take(area.height as usize)
            .map(|item| {
                let marker = if item.checked { "[x]" } else { "[ ]" };
                ListItem::new(format!("{marker} {}", item.label))
            })
            .collect();
        let mut list = List::new(items);
        if ctx.focused() {
            list = list.style(Style::default().add_modifier(Modifier::BOLD));
        }
        frame.render_widget(list, area);
    }
}

pub(super) fn factory() -> Arc<dyn WidgetFactory> {
    factory_fn(ParamShape::ToggleList, |params| {
        let items = match params {
            WidgetParams::ToggleList { items } => items.clone(),
            _ => Vec::new(),
        };
        Ok(Arc::new(ToggleListWidget::new(items)) as Arc<dyn Widget>)
    })
}
