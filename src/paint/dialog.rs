use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use super::UiFrame;
use crate::compose::DialogNode;
use crate::constants::{DIALOG_HEIGHT, DIALOG_WIDTH};
use crate::dialog::DialogPayload;

/// Clamp the dialog to the available area so tiny terminals never draw
/// outside the buffer, while keeping a usable minimum when there is room.
pub(super) fn rect_for(area: Rect) -> Rect {
    let mut width = area.width.min(DIALOG_WIDTH).max(1);
    let mut height = area.height.min(DIALOG_HEIGHT).max(1);
    if area.width >= 24 {
        width = width.max(24);
    }
    if area.height >= 5 {
        height = height.max(5);
    }
    let x = area.x.saturating_add(area.width.saturating_sub(width) / 2);
    let y = area
        .y
        .saturating_add(area.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

fn buttons(payload: &DialogPayload) -> &'static str {
    match payload {
        DialogPayload::Message { .. } => "[ OK ]",
        DialogPayload::Confirm { .. } => "[ Yes ] [ No ]",
        DialogPayload::Input { .. } => "[ Submit ] [ Cancel ]",
    }
}

pub(super) fn paint_dialog(frame: &mut UiFrame<'_>, area: Rect, node: &DialogNode) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    frame.dim(area);
    let rect = rect_for(area);
    frame.render_widget(Clear, rect);

    let title = if node.queued > 0 {
        format!("{} (+{})", node.payload.title(), node.queued)
    } else {
        node.payload.title().to_string()
    };
    let style = Style::default()
        .fg(crate::theme::dialog_fg())
        .bg(crate::theme::dialog_bg());
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .style(style);
    let inner = block.inner(rect);
    frame.render_widget(block, rect);
    if inner.width < 2 || inner.height < 3 {
        return;
    }

    let footer_y = inner.y + inner.height - 1;
    let separator_y = footer_y - 1;
    let body = Rect {
        x: inner.x.saturating_add(1),
        y: inner.y,
        width: inner.width.saturating_sub(2),
        height: inner.height - 2,
    };
    frame.render_widget(
        Paragraph::new(node.payload.body())
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true }),
        body,
    );
    if let DialogPayload::Input { default, .. } = &node.payload
        && body.height > 1
    {
        let field_y = body.y + body.height - 1;
        let field = Rect {
            y: field_y,
            height: 1,
            ..body
        };
        let field_style = style.add_modifier(Modifier::UNDERLINED);
        frame.fill(field, field_style);
        frame.set_string(field, field.x, field_y, default, field_style);
    }

    let separator = "─".repeat(inner.width as usize);
    let separator_style = Style::default().fg(crate::theme::dialog_separator());
    frame.set_string(inner, inner.x, separator_y, &separator, separator_style);

    let label = buttons(&node.payload);
    let label_width = label.chars().count() as u16;
    let x = inner
        .x
        .saturating_add(inner.width.saturating_sub(label_width + 1));
    frame.set_string(inner, x, footer_y, label, style.add_modifier(Modifier::BOLD));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_for_clamps_sizes() {
        let tiny = rect_for(Rect::new(0, 0, 10, 2));
        assert!(tiny.width >= 1 && tiny.width <= 10);
        assert!(tiny.height >= 1 && tiny.height <= 2);

        let roomy = rect_for(Rect::new(0, 0, 80, 24));
        assert_eq!(roomy.width, DIALOG_WIDTH);
        assert_eq!(roomy.height, DIALOG_HEIGHT);
        assert_eq!(roomy.x, 10);
    }
}
