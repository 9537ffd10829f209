use std::sync::Arc;

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use crate::error::FactoryError;
use crate::params::{ParamShape, WidgetParams};
use crate::paint::UiFrame;
use crate::registry::{WidgetFactory, factory_fn};
use crate::widget::{Widget, WidgetContext};

const MAX_ROWS: u16 = 8;

/// A single-choice list showing which option is currently selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectWidget {
    options: Vec<String>,
    selected: usize,
}

impl SelectWidget {
    pub fn new(options: Vec<String>, selected: usize) -> Result<Self, FactoryError> {
        if !options.is_empty() && selected >= options.len() {
            return Err(FactoryError::new(format!(
                "selected index {selected} out of range for {} options",
                options.len()
            )));
        }
        Ok(Self { options, selected })
    }

    pub fn selected(&self) -> Option<&str> {
        self.options.get(self.selected).map(String::as_str)
    }

    /// First visible option so the selection stays inside `view` rows.
    fn offset_for(&self, view: usize) -> usize {
        if view == 0 || self.selected < view {
            0
        } else {
            self.selected + 1 - view
        }
    }
}

impl Widget for SelectWidget {
    fn height(&self) -> u16 {
        u16::try_from(self.options.len())
            .unwrap_or(u16::MAX)
            .clamp(1, MAX_ROWS)
    }

    fn render(&self, frame: &mut UiFrame<'_>, area: Rect, ctx: &WidgetContext) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let view = area.height as usize;
        let offset = self.offset_for(view);
        for (row, (index, option)) in self
            .options
            .iter()
            .enumerate()
            .skip(offset)
            .take(view)
            .enumerate()
        {
            let y = area.y.saturating_add(row as u16);
            let (marker, style) = if index == self.selected {
                let mut style = Style::default().add_modifier(Modifier::BOLD);
                if ctx.focused() {
                    style = style.add_modifier(Modifier::REVERSED);
                }
                ("(*)", style)
            } else {
                ("( )", Style::default())
            };
            frame.set_string(area, area.x, y, &format!("{marker} {option}"), style);
        }
    }
}

pub(super) fn factory() -> Arc<dyn WidgetFactory> {
    factory_fn(ParamShape::Select, |params| {
        let widget = match params {
            WidgetParams::Select { options, selected } => {
                SelectWidget::new(options.clone(), *selected)?
            }
            _ => SelectWidget::new(Vec::new(), 0)?,
        };
        Ok(Arc::new(widget) as Arc<dyn Widget>)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paint::frame::row_text;
    use ratatui::buffer::Buffer;

    fn options(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("opt{i}")).collect()
    }

    #[test]
    fn out_of_range_selection_is_rejected() {
        assert!(SelectWidget::new(options(2), 2).is_err());
        assert!(SelectWidget::new(Vec::new(), 5).is_ok());
    }

    #[test]
    fn height_is_capped_even_past_u16() {
        let widget = SelectWidget::new(options(usize::from(u16::MAX) + 1), 0).unwrap();
        assert_eq!(widget.height(), MAX_ROWS);
    }

    #[test]
    fn keeps_selection_in_view() {
        let widget = SelectWidget::new(options(10), 7).unwrap();
        assert_eq!(widget.offset_for(3), 5);
        assert_eq!(widget.offset_for(10), 0);

        let area = Rect::new(0, 0, 10, 3);
        let mut buffer = Buffer::empty(area);
        let mut frame = UiFrame::from_parts(area, &mut buffer);
        widget.render(&mut frame, area, &WidgetContext::default());
        assert_eq!(row_text(&buffer, 2), "(*) opt7  ");
    }
}
