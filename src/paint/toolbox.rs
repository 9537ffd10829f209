use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders};

use super::UiFrame;
use crate::compose::{ToolBoxNode, ToolNode};
use crate::navigator::{Focus, Pane};
use crate::widget::WidgetContext;

const TOOL_INDENT: u16 = 2;

pub(super) fn paint_tool_box(
    frame: &mut UiFrame<'_>,
    area: Rect,
    node: &ToolBoxNode,
    focus: Focus,
) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let focused = focus.pane == Pane::ToolBox;
    let mut block = Block::default()
        .borders(Borders::ALL)
        .title(node.title.as_str());
    if focused {
        block = block.border_style(Style::default().fg(crate::theme::focus_border()));
    }
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let bottom = inner.y.saturating_add(inner.height);
    let mut y = inner.y;
    for (index, compartment) in node.compartments.iter().enumerate() {
        if y >= bottom {
            break;
        }
        let marker = if compartment.expanded { "▾" } else { "▸" };
        let current = focused && index == focus.compartment;
        let mut header = Style::default().add_modifier(Modifier::BOLD);
        if current {
            header = header.add_modifier(Modifier::REVERSED);
        }
        let row = Rect {
            y,
            height: 1,
            ..inner
        };
        frame.set_string(row, row.x, y, &format!("{marker} {}", compartment.title), header);
        y += 1;

        for tool in &compartment.tools {
            if y >= bottom {
                break;
            }
            let height = tool.height().min(bottom - y);
            let slot = Rect {
                x: inner.x.saturating_add(TOOL_INDENT),
                y,
                width: inner.width.saturating_sub(TOOL_INDENT),
                height,
            };
            paint_tool(frame, slot, tool, &WidgetContext::new(current));
            y = y.saturating_add(height);
        }
    }
}

fn paint_tool(frame: &mut UiFrame<'_>, slot: Rect, tool: &ToolNode, ctx: &WidgetContext) {
    match tool {
        ToolNode::Widget { widget, .. } => widget.render(frame, slot, ctx),
        ToolNode::Placeholder { id, miss, .. } => {
            let style = Style::default().fg(crate::theme::placeholder_fg());
            frame.set_string(slot, slot.x, slot.y, &format!("! {id}: {miss}"), style);
        }
    }
}
