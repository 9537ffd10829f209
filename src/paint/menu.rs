use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders, Clear};

use super::UiFrame;
use crate::compose::{MenuBarNode, MenuNode};

/// Top-left corner where a top-level menu's drop-down hangs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Anchor {
    x: u16,
    y: u16,
}

pub(super) fn paint_menu_bar(
    frame: &mut UiFrame<'_>,
    area: Rect,
    bar: &MenuBarNode,
) -> Vec<Anchor> {
    let base = Style::default()
        .fg(crate::theme::menu_fg())
        .bg(crate::theme::menu_bg());
    let open = Style::default()
        .fg(crate::theme::menu_selected_fg())
        .bg(crate::theme::menu_selected_bg());
    frame.fill(area, base);
    let mut x = area.x;
    let mut anchors = Vec::with_capacity(bar.menus.len());
    for menu in &bar.menus {
        anchors.push(Anchor {
            x,
            y: area.y.saturating_add(1),
        });
        let label = format!(" {} ", menu.label);
        let style = if menu.open { open } else { base };
        frame.set_string(area, x, area.y, &label, style);
        x = x.saturating_add(label.chars().count() as u16);
    }
    anchors
}

pub(super) fn paint_drop_downs(frame: &mut UiFrame<'_>, bar: &MenuBarNode, anchors: &[Anchor]) {
    for (menu, anchor) in bar.menus.iter().zip(anchors) {
        if menu.open {
            paint_menu_box(frame, menu, anchor.x, anchor.y);
        }
    }
}

fn item_text(label: &str, has_submenu: bool, icon: Option<&str>) -> String {
    let icon = icon.map(|i| format!("{i} ")).unwrap_or_default();
    if has_submenu {
        format!(" {icon}{label} ▸ ")
    } else {
        format!(" {icon}{label} ")
    }
}

fn paint_menu_box(frame: &mut UiFrame<'_>, menu: &MenuNode, x: u16, y: u16) {
    if menu.items.is_empty() {
        return;
    }
    let texts: Vec<String> = menu
        .items
        .iter()
        .map(|item| {
            item_text(
                &item.label,
                item.has_submenu,
                item.icon.as_ref().map(|i| i.0.as_str()),
            )
        })
        .collect();
    let inner_width = texts.iter().map(|t| t.chars().count()).max().unwrap_or(0) as u16;
    let rect = Rect {
        x,
        y,
        width: inner_width.saturating_add(2),
        height: (menu.items.len() as u16).saturating_add(2),
    };
    let base = Style::default()
        .fg(crate::theme::menu_fg())
        .bg(crate::theme::menu_bg());
    let selected = Style::default()
        .fg(crate::theme::menu_selected_fg())
        .bg(crate::theme::menu_selected_bg());
    frame.render_widget(Clear, rect);
    frame.render_widget(Block::default().borders(Borders::ALL).style(base), rect);

    let inner = Rect {
        x: rect.x.saturating_add(1),
        y: rect.y.saturating_add(1),
        width: inner_width,
        height: menu.items.len() as u16,
    };
    for (row, (item, text)) in menu.items.iter().zip(&texts).enumerate() {
        let row_y = inner.y.saturating_add(row as u16);
        let style = if item.highlighted { selected } else { base };
        let line = Rect {
            y: row_y,
            height: 1,
            ..inner
        };
        frame.fill(line, style);
        frame.set_string(line, line.x, row_y, text, style);
        if let Some(submenu) = item.submenu.as_deref() {
            paint_menu_box(frame, submenu, rect.x.saturating_add(rect.width), row_y);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::MenuItemNode;
    use crate::paint::frame::row_text;
    use ratatui::buffer::Buffer;
    use std::sync::Arc;

    fn item(id: &str, highlighted: bool, submenu: Option<Arc<MenuNode>>) -> MenuItemNode {
        MenuItemNode {
            id: id.into(),
            label: id.into(),
            icon: None,
            action: None,
            has_submenu: submenu.is_some(),
            highlighted,
            submenu,
        }
    }

    #[test]
    fn anchors_follow_labels() {
        let bar = MenuBarNode {
            menus: vec![
                Arc::new(MenuNode {
                    id: "file".into(),
                    label: "File".into(),
                    open: false,
                    items: Vec::new(),
                }),
                Arc::new(MenuNode {
                    id: "help".into(),
                    label: "Help".into(),
                    open: false,
                    items: Vec::new(),
                }),
            ],
        };
        let area = Rect::new(0, 0, 20, 1);
        let mut buffer = Buffer::empty(area);
        let mut frame = UiFrame::from_parts(area, &mut buffer);
        let anchors = paint_menu_bar(&mut frame, area, &bar);
        assert_eq!(anchors[0], Anchor { x: 0, y: 1 });
        assert_eq!(anchors[1], Anchor { x: 6, y: 1 });
        assert_eq!(row_text(&buffer, 0), " File  Help         ");
    }

    #[test]
    fn nested_submenu_opens_to_the_right() {
        let sub = Arc::new(MenuNode {
            id: "recent".into(),
            label: "Recent".into(),
            open: true,
            items: vec![item("iris", false, None)],
        });
        let menu = MenuNode {
            id: "file".into(),
            label: "File".into(),
            open: true,
            items: vec![item("open", false, None), item("recent", true, Some(sub))],
        };
        let area = Rect::new(0, 0, 30, 6);
        let mut buffer = Buffer::empty(area);
        let mut frame = UiFrame::from_parts(area, &mut buffer);
        paint_menu_box(&mut frame, &menu, 0, 0);
        // "recent" sits on row 2; its submenu box starts on the same row.
        assert!(row_text(&buffer, 2).contains("recent ▸"));
        assert!(row_text(&buffer, 3).contains("iris"));
    }
}
