use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use super::UiFrame;
use crate::compose::DocumentPanelNode;
use crate::document::DocumentSource;
use crate::navigator::{Focus, Pane};

pub(super) fn paint_documents(
    frame: &mut UiFrame<'_>,
    area: Rect,
    panel: &DocumentPanelNode,
    source: &dyn DocumentSource,
    focus: Focus,
) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let mut block = Block::default().borders(Borders::ALL).title("Documents");
    if focus.pane == Pane::Documents {
        block = block.border_style(Style::default().fg(crate::theme::focus_border()));
    }
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.width == 0 || inner.height == 0 {
        return;
    }

    if panel.tabs.is_empty() {
        let hint = Style::default().add_modifier(Modifier::DIM);
        frame.set_string(inner, inner.x, inner.y, "No open documents", hint);
        return;
    }

    let active_tab = Style::default()
        .fg(crate::theme::tab_active_fg())
        .bg(crate::theme::tab_active_bg());
    let mut x = inner.x;
    for tab in &panel.tabs {
        let label = format!(" {} ", tab.title);
        let style = if tab.active {
            active_tab
        } else {
            Style::default()
        };
        frame.set_string(inner, x, inner.y, &label, style);
        x = x.saturating_add(label.chars().count() as u16 + 1);
    }

    let body = Rect {
        y: inner.y.saturating_add(1),
        height: inner.height.saturating_sub(1),
        ..inner
    };
    let Some(active) = panel.active() else {
        return;
    };
    let text = source
        .content(active.handle)
        .unwrap_or_else(|| format!("({} content unavailable)", active.kind));
    frame.render_widget(Paragraph::new(text).wrap(Wrap { trim: false }), body);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::DocumentTab;
    use crate::document::{ContentHandle, InMemoryDocuments};
    use crate::paint::frame::row_text;
    use ratatui::buffer::Buffer;

    #[test]
    fn missing_content_is_reported_not_fatal() {
        let panel = DocumentPanelNode {
            tabs: vec![DocumentTab {
                id: "gone".into(),
                kind: "csv".into(),
                title: "gone.csv".into(),
                handle: ContentHandle(42),
                active: true,
            }],
        };
        let area = Rect::new(0, 0, 40, 5);
        let mut buffer = Buffer::empty(area);
        let mut frame = UiFrame::from_parts(area, &mut buffer);
        paint_documents(&mut frame, area, &panel, &InMemoryDocuments::new(), Focus::default());
        assert!(row_text(&buffer, 1).contains("gone.csv"));
        assert!(row_text(&buffer, 2).contains("(csv content unavailable)"));
    }
}
