use std::sync::Arc;

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Gauge;

use crate::error::FactoryError;
use crate::params::{ParamShape, WidgetParams};
use crate::paint::UiFrame;
use crate::registry::{WidgetFactory, factory_fn};
use crate::widget::{Widget, WidgetContext};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SliderWidget {
    min: i64,
    max: i64,
    value: i64,
}

impl SliderWidget {
    pub fn new(min: i64, max: i64, value: i64) -> Result<Self, FactoryError> {
        if min >= max {
            return Err(FactoryError::new(format!("empty range {min}..{max}")));
        }
        if !(min..=max).contains(&value) {
            return Err(FactoryError::new(format!(
                "value {value} outside {min}..={max}"
            )));
        }
        Ok(Self { min, max, value })
    }

    /// Position of the value within the range, in `0.0..=1.0`. Widened to
    /// `i128` so ranges spanning all of `i64` do not overflow.
    pub fn ratio(&self) -> f64 {
        let offset = i128::from(self.value) - i128::from(self.min);
        let width = i128::from(self.max) - i128::from(self.min);
        offset as f64 / width as f64
    }
}

impl Widget for SliderWidget {
    fn render(&self, frame: &mut UiFrame<'_>, area: Rect, ctx: &WidgetContext) {
        let color = if ctx.focused() {
            crate::theme::focus_border()
        } else {
            crate::theme::accent()
        };
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(color))
            .ratio(self.ratio().clamp(0.0, 1.0))
            .label(self.value.to_string());
        frame.render_widget(gauge, area);
    }
}

pub(super) fn factory() -> Arc<dyn WidgetFactory> {
    factory_fn(ParamShape::Slider, |params| {
        let widget = match params {
            WidgetParams::Slider { min, max, value } => SliderWidget::new(*min, *max, *value)?,
            _ => SliderWidget::new(0, 100, 0)?,
        };
        Ok(Arc::new(widget) as Arc<dyn Widget>)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validates_range() {
        assert!(SliderWidget::new(5, 5, 5).is_err());
        assert!(SliderWidget::new(0, 10, 11).is_err());
        let slider = SliderWidget::new(0, 10, 5).unwrap();
        assert!((slider.ratio() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn full_i64_range_paints() {
        let widget = factory()
            .build(&WidgetParams::Slider {
                min: i64::MIN,
                max: i64::MAX,
                value: 0,
            })
            .unwrap();
        let area = Rect::new(0, 0, 10, 1);
        let mut buffer = ratatui::buffer::Buffer::empty(area);
        let mut frame = UiFrame::from_parts(area, &mut buffer);
        widget.render(&mut frame, area, &WidgetContext::default());

        let edge = SliderWidget::new(i64::MIN, i64::MAX, i64::MAX).unwrap();
        assert!((edge.ratio() - 1.0).abs() < 1e-9);
        let low = SliderWidget::new(i64::MIN, i64::MAX, i64::MIN).unwrap();
        assert_eq!(low.ratio(), 0.0);
    }
}
