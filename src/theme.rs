use std::sync::atomic::{AtomicU32, Ordering};

use ratatui::style::Color;

// Retro palette. Every colour goes through `rgb_to_color` so the rainbow
// easter egg can rotate the whole desk at once.

pub const DESKTOP_RGB: (u8, u8, u8) = (0, 128, 128);
pub const PATTERN_RGB: (u8, u8, u8) = (0, 96, 96);
pub const PATTERN_GLOW_RGB: (u8, u8, u8) = (64, 200, 200);
pub const SILVER_RGB: (u8, u8, u8) = (192, 192, 192);
pub const NAVY_RGB: (u8, u8, u8) = (0, 0, 128);
pub const GRAY_RGB: (u8, u8, u8) = (128, 128, 128);
pub const WHITE_RGB: (u8, u8, u8) = (255, 255, 255);
pub const BLACK_RGB: (u8, u8, u8) = (0, 0, 0);
pub const PHOSPHOR_RGB: (u8, u8, u8) = (0, 255, 0);
pub const ACCENT_RGB: (u8, u8, u8) = (255, 165, 0);

// hundredths of a degree
static HUE_SHIFT: AtomicU32 = AtomicU32::new(0);

/// Rotate every themed colour by `degrees`. Zero restores the palette.
pub fn set_hue_shift(degrees: f32) {
    let centi = (degrees.rem_euclid(360.0) * 100.0) as u32;
    HUE_SHIFT.store(centi, Ordering::Relaxed);
}

pub fn hue_shift() -> f32 {
    HUE_SHIFT.load(Ordering::Relaxed) as f32 / 100.0
}

pub fn rgb_to_color(rgb: (u8, u8, u8)) -> Color {
    let shift = hue_shift();
    let (r, g, b) = if shift == 0.0 {
        rgb
    } else {
        crate::term_color::hue_rotate(rgb, shift)
    };
    crate::term_color::map_rgb_to_color(r, g, b)
}

pub fn accent() -> Color {
    rgb_to_color(ACCENT_RGB)
}

// Desktop
pub fn desktop_bg() -> Color {
    rgb_to_color(DESKTOP_RGB)
}
pub fn pattern_fg() -> Color {
    rgb_to_color(PATTERN_RGB)
}
pub fn pattern_glow() -> Color {
    rgb_to_color(PATTERN_GLOW_RGB)
}

// Taskbar
pub fn taskbar_bg() -> Color {
    rgb_to_color(SILVER_RGB)
}
pub fn taskbar_fg() -> Color {
    rgb_to_color(BLACK_RGB)
}
pub fn taskbar_active_bg() -> Color {
    rgb_to_color(NAVY_RGB)
}
pub fn taskbar_active_fg() -> Color {
    rgb_to_color(WHITE_RGB)
}
pub fn taskbar_info_fg() -> Color {
    rgb_to_color(GRAY_RGB)
}

// Windows
pub fn window_bg() -> Color {
    rgb_to_color(SILVER_RGB)
}
pub fn window_fg() -> Color {
    rgb_to_color(BLACK_RGB)
}
pub fn console_bg() -> Color {
    rgb_to_color(BLACK_RGB)
}
pub fn console_fg() -> Color {
    rgb_to_color(PHOSPHOR_RGB)
}

// Dialog
pub fn dialog_bg() -> Color {
    rgb_to_color(SILVER_RGB)
}
pub fn dialog_fg() -> Color {
    rgb_to_color(BLACK_RGB)
}
pub fn dialog_separator() -> Color {
    rgb_to_color(GRAY_RGB)
}

// Decorator
pub fn decorator_header_bg() -> Color {
    rgb_to_color(NAVY_RGB)
}
pub fn decorator_inactive_bg() -> Color {
    rgb_to_color(GRAY_RGB)
}
pub fn decorator_header_fg() -> Color {
    rgb_to_color(WHITE_RGB)
}
pub fn decorator_border() -> Color {
    rgb_to_color(GRAY_RGB)
}

// Debug log highlight
pub fn debug_highlight() -> Color {
    accent()
}
