//! `UiFrame`: a clipped drawing surface over a ratatui buffer.
//!
//! Widget factories hand back widgets that draw through this type instead of
//! a raw `Frame`, so a widget given a rectangle that drifts outside the
//! terminal (tiny viewports, long tool boxes) never writes out of bounds.
use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Widget as RatatuiWidget;

pub struct UiFrame<'a> {
    area: Rect,
    buffer: &'a mut Buffer,
}

impl<'a> UiFrame<'a> {
    pub fn new(frame: &'a mut Frame<'_>) -> Self {
        let area = frame.area();
        let buffer = frame.buffer_mut();
        Self { area, buffer }
    }

    /// Draw into an arbitrary buffer, e.g. an offscreen one in tests or the
    /// benchmark.
    pub fn from_parts(area: Rect, buffer: &'a mut Buffer) -> Self {
        Self { area, buffer }
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn buffer_mut(&mut self) -> &mut Buffer {
        self.buffer
    }

    fn clip_rect(&self, rect: Rect) -> Option<Rect> {
        let clipped = rect.intersection(self.area);
        if clipped.width == 0 || clipped.height == 0 {
            None
        } else {
            Some(clipped)
        }
    }

    pub fn render_widget<W>(&mut self, widget: W, area: Rect)
    where
        W: RatatuiWidget,
    {
        if let Some(clipped) = self.clip_rect(area) {
            widget.render(clipped, self.buffer);
        }
    }

    /// Write `text` at (`x`, `y`), truncated to the visible part of `bounds`.
    pub fn set_string(&mut self, bounds: Rect, x: u16, y: u16, text: &str, style: Style) {
        if let Some(bounds) = self.clip_rect(bounds) {
            safe_set_string(self.buffer, bounds, x, y, text, style);
        }
    }

    pub fn fill(&mut self, area: Rect, style: Style) {
        let Some(area) = self.clip_rect(area) else {
            return;
        };
        for y in area.y..area.y.saturating_add(area.height) {
            for x in area.x..area.x.saturating_add(area.width) {
                if let Some(cell) = self.buffer.cell_mut((x, y)) {
                    cell.set_symbol(" ");
                    cell.set_style(style);
                }
            }
        }
    }

    /// Dim everything already drawn inside `area` (modal backdrop).
    pub fn dim(&mut self, area: Rect) {
        let Some(area) = self.clip_rect(area) else {
            return;
        };
        let dim_style = Style::default().add_modifier(Modifier::DIM);
        for y in area.y..area.y.saturating_add(area.height) {
            for x in area.x..area.x.saturating_add(area.width) {
                if let Some(cell) = self.buffer.cell_mut((x, y)) {
                    cell.set_style(dim_style);
                }
            }
        }
    }
}

pub(crate) fn safe_set_string(
    buffer: &mut Buffer,
    bounds: Rect,
    x: u16,
    y: u16,
    text: &str,
    style: Style,
) {
    if bounds.width == 0 || bounds.height == 0 {
        return;
    }
    let max_x = bounds.x.saturating_add(bounds.width);
    let max_y = bounds.y.saturating_add(bounds.height);
    if x < bounds.x || x >= max_x || y < bounds.y || y >= max_y {
        return;
    }
    let available = max_x.saturating_sub(x);
    let text = truncate_to_width(text, available as usize);
    buffer.set_string(x, y, text, style);
}

pub(crate) fn truncate_to_width(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    value.chars().take(width).collect()
}

#[cfg(test)]
pub(crate) fn row_text(buffer: &Buffer, y: u16) -> String {
    let area = buffer.area;
    (area.x..area.x + area.width)
        .filter_map(|x| buffer.cell((x, y)).map(|c| c.symbol().to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_string_is_clipped_to_frame() {
        let area = Rect::new(0, 0, 6, 1);
        let mut buffer = Buffer::empty(area);
        let mut frame = UiFrame::from_parts(area, &mut buffer);
        frame.set_string(Rect::new(0, 0, 20, 1), 2, 0, "overflowing", Style::default());
        assert_eq!(row_text(&buffer, 0), "  over");
    }

    #[test]
    fn writes_outside_bounds_are_dropped() {
        let area = Rect::new(0, 0, 4, 2);
        let mut buffer = Buffer::empty(area);
        let mut frame = UiFrame::from_parts(area, &mut buffer);
        frame.set_string(Rect::new(0, 5, 4, 1), 0, 5, "nope", Style::default());
        frame.fill(Rect::new(10, 10, 3, 3), Style::default());
        assert_eq!(row_text(&buffer, 0), "    ");
    }

    #[test]
    fn truncate_counts_chars_not_bytes() {
        assert_eq!(truncate_to_width("héllo", 2), "hé");
        assert_eq!(truncate_to_width("ok", 5), "ok");
    }
}
