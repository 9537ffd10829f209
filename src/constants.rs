//! Shared crate-wide constants.

/// Deepest submenu nesting accepted by descriptor validation.
///
/// Counts the top-level menu as level one. Terminal drop-downs become
/// unusable long before this, so anything deeper is treated as a malformed
/// (likely generated) descriptor rather than a real menu.
pub const MAX_MENU_DEPTH: usize = 16;

/// Share of the body width given to the tool box, in percent. The document
/// panel takes the rest.
pub const TOOLBOX_WIDTH_PERCENT: u16 = 25;

/// Preferred dialog size in terminal cells; clamped to the viewport.
pub const DIALOG_WIDTH: u16 = 60;
pub const DIALOG_HEIGHT: u16 = 9;
