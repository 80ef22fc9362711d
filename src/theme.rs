use ratatui::style::Color;

// Centralized theme colors. Keep these as small helpers so RGB values go
// through `crate::term_color` and degrade on terminals without truecolor.

pub const ACCENT_RGB: (u8, u8, u8) = (0, 120, 215);
pub const DESKTOP_RGB: (u8, u8, u8) = (0, 84, 147);
pub const TASKBAR_RGB: (u8, u8, u8) = (32, 32, 32);
pub const BOOT_RGB: (u8, u8, u8) = (0, 0, 0);

pub fn rgb_to_color(rgb: (u8, u8, u8)) -> Color {
    crate::term_color::map_rgb_to_color(rgb.0, rgb.1, rgb.2)
}

pub fn accent() -> Color {
    rgb_to_color(ACCENT_RGB)
}

// Desktop / boot / lock
pub fn desktop_bg() -> Color {
    rgb_to_color(DESKTOP_RGB)
}
pub fn boot_bg() -> Color {
    rgb_to_color(BOOT_RGB)
}
pub fn boot_fg() -> Color {
    Color::White
}
pub fn lock_bg() -> Color {
    rgb_to_color(DESKTOP_RGB)
}
pub fn lock_fg() -> Color {
    Color::White
}

// Taskbar
pub fn taskbar_bg() -> Color {
    rgb_to_color(TASKBAR_RGB)
}
pub fn taskbar_fg() -> Color {
    Color::White
}
pub fn taskbar_active_bg() -> Color {
    Color::DarkGray
}
pub fn taskbar_indicator() -> Color {
    accent()
}
pub fn taskbar_minimized_fg() -> Color {
    Color::Gray
}

// Start menu
pub fn menu_bg() -> Color {
    Color::DarkGray
}
pub fn menu_fg() -> Color {
    Color::White
}
pub fn menu_selected_bg() -> Color {
    accent()
}
pub fn menu_selected_fg() -> Color {
    Color::White
}

// Window chrome
pub fn decorator_header_bg() -> Color {
    accent()
}
pub fn decorator_inactive_bg() -> Color {
    Color::DarkGray
}
pub fn decorator_header_fg() -> Color {
    Color::White
}
pub fn decorator_border() -> Color {
    Color::Gray
}
pub fn close_button_bg() -> Color {
    Color::Red
}
pub fn window_bg() -> Color {
    Color::Black
}
pub fn window_fg() -> Color {
    Color::White
}

// Application content
pub fn address_bar_bg() -> Color {
    Color::DarkGray
}
pub fn address_bar_fg() -> Color {
    Color::White
}
pub fn selection_bg() -> Color {
    accent()
}
pub fn selection_fg() -> Color {
    Color::White
}
pub fn muted_fg() -> Color {
    Color::Gray
}
