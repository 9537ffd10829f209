//! The renderable widget interface implemented by registered factories.

use std::fmt;

use ratatui::layout::Rect;

use crate::paint::UiFrame;

/// Per-draw metadata handed to widgets by the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WidgetContext {
    focused: bool,
}

impl WidgetContext {
    pub const fn new(focused: bool) -> Self {
        Self { focused }
    }

    pub const fn focused(&self) -> bool {
        self.focused
    }
}

/// A built, immutable widget instance. Instances are shared between
/// successive widget trees, so rendering takes `&self`.
pub trait Widget: fmt::Debug + Send + Sync {
    /// Rows this widget wants when stacked inside a compartment.
    fn height(&self) -> u16 {
        1
    }

    fn render(&self, frame: &mut UiFrame<'_>, area: Rect, ctx: &WidgetContext);
}
