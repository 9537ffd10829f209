use ratatui::style::Color;

// Palette for the terminal host. Styling is deliberately flat: the engine
// itself never looks at colors, only the paint layer and built-in widgets do.

pub const ACCENT_RGB: (u8, u8, u8) = (200, 100, 0);

pub fn accent() -> Color {
    let (r, g, b) = ACCENT_RGB;
    Color::Rgb(r, g, b)
}

// Top bar
pub fn app_bar_bg() -> Color {
    Color::Blue
}
pub fn app_bar_fg() -> Color {
    Color::White
}

// Menu bar and drop-downs
pub fn menu_bg() -> Color {
    Color::DarkGray
}
pub fn menu_fg() -> Color {
    Color::White
}
pub fn menu_selected_bg() -> Color {
    Color::Gray
}
pub fn menu_selected_fg() -> Color {
    Color::Black
}

// Tool box
pub fn focus_border() -> Color {
    Color::Green
}
pub fn placeholder_fg() -> Color {
    Color::Red
}

// Documents
pub fn tab_active_bg() -> Color {
    Color::Gray
}
pub fn tab_active_fg() -> Color {
    Color::Black
}

// Dialog
pub fn dialog_bg() -> Color {
    Color::Black
}
pub fn dialog_fg() -> Color {
    Color::White
}
pub fn dialog_separator() -> Color {
    Color::DarkGray
}
