//! Terminal painting of a [`WidgetTree`].
//!
//! This is the host side of the engine: it turns a composed tree into
//! ratatui draw calls and owns no state of its own. Layout mirrors a
//! classic desktop shell: top bar, menu bar, tool box on the left, document
//! panel on the right, a status line, and drop-downs and the dialog drawn
//! over everything else.

mod dialog;
mod documents;
pub(crate) mod frame;
mod menu;
mod toolbox;

pub use frame::UiFrame;

use ratatui::layout::Rect;
use ratatui::style::Style;

use crate::compose::WidgetTree;
use crate::constants::TOOLBOX_WIDTH_PERCENT;
use crate::document::DocumentSource;
use crate::navigator::Focus;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShellLayout {
    pub app_bar: Rect,
    pub menu_bar: Rect,
    pub tool_box: Rect,
    pub documents: Rect,
    pub status: Rect,
}

/// Split `area` into the shell regions. Rows are taken from the top first,
/// so on very small terminals the body collapses before the bars do.
pub fn layout(area: Rect) -> ShellLayout {
    let row = |y: u16| Rect {
        x: area.x,
        y,
        width: area.width,
        height: u16::from(y < area.y.saturating_add(area.height)),
    };
    let app_bar = row(area.y);
    let menu_bar = row(area.y.saturating_add(1));
    let body_height = area.height.saturating_sub(3);
    let status = if area.height >= 3 {
        row(area.y + area.height - 1)
    } else {
        Rect::default()
    };
    let tool_width = area.width.saturating_mul(TOOLBOX_WIDTH_PERCENT) / 100;
    let body_y = area.y.saturating_add(2);
    ShellLayout {
        app_bar,
        menu_bar,
        tool_box: Rect {
            x: area.x,
            y: body_y,
            width: tool_width,
            height: body_height,
        },
        documents: Rect {
            x: area.x.saturating_add(tool_width),
            y: body_y,
            width: area.width.saturating_sub(tool_width),
            height: body_height,
        },
        status,
    }
}

/// Paint `tree` into `frame`. `status` is shown on the bottom line.
pub fn paint(
    frame: &mut UiFrame<'_>,
    tree: &WidgetTree,
    documents: &dyn DocumentSource,
    focus: Focus,
    status: &str,
) {
    let area = frame.area();
    if area.width == 0 || area.height == 0 {
        return;
    }
    let regions = layout(area);

    let bar_style = Style::default()
        .fg(crate::theme::app_bar_fg())
        .bg(crate::theme::app_bar_bg());
    frame.fill(regions.app_bar, bar_style);
    let title = format!(" {}", tree.app_bar.title);
    frame.set_string(regions.app_bar, regions.app_bar.x, regions.app_bar.y, &title, bar_style);

    let anchors = menu::paint_menu_bar(frame, regions.menu_bar, &tree.menu_bar);
    toolbox::paint_tool_box(frame, regions.tool_box, &tree.tool_box, focus);
    documents::paint_documents(frame, regions.documents, &tree.document_panel, documents, focus);
    frame.set_string(regions.status, regions.status.x, regions.status.y, status, Style::default());

    menu::paint_drop_downs(frame, &tree.menu_bar, &anchors);
    if let Some(node) = tree.dialog.as_deref() {
        dialog::paint_dialog(frame, area, node);
    }
}
