use ratatui::buffer::Buffer;
use ratatui::prelude::Rect;
use ratatui::style::{Modifier, Style};

use super::Geometry;

/// What a pointer-down at a given cell of the window chrome means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderHit {
    None,
    Drag,
    Minimize,
    Maximize,
    Close,
}

const CONTROL_WIDTH: i32 = 3;
const CONTROLS: [(&str, HeaderHit); 3] = [
    ("[_]", HeaderHit::Minimize),
    ("[□]", HeaderHit::Maximize),
    ("[x]", HeaderHit::Close),
];
// left border + at least one title cell + controls + right border
const MIN_WIDTH_FOR_CONTROLS: u16 = 2 + 1 + 3 * CONTROL_WIDTH as u16;

#[derive(Debug, Clone, Copy)]
pub struct WindowChrome<'a> {
    pub title: &'a str,
    pub focused: bool,
    pub minimizing: bool,
    pub maximized: bool,
}

pub trait WindowDecorator: std::fmt::Debug {
    fn render_window(
        &self,
        buffer: &mut Buffer,
        bounds: Rect,
        geometry: Geometry,
        chrome: WindowChrome<'_>,
    );

    fn hit_test(&self, geometry: Geometry, x: i32, y: i32) -> HeaderHit;

    /// Area available to window content, in absolute coordinates.
    fn content_geometry(&self, geometry: Geometry) -> Geometry {
        Geometry {
            left: geometry.left + 1,
            top: geometry.top + 1,
            width: geometry.width.saturating_sub(2),
            height: geometry.height.saturating_sub(2),
        }
    }
}

/// Single-line frame whose top edge doubles as the title bar.
#[derive(Debug, Default)]
pub struct RetroDecorator;

impl RetroDecorator {
    fn control_left(geometry: Geometry, slot: usize) -> i32 {
        let right = geometry.left + geometry.width as i32 - 1;
        right - CONTROL_WIDTH * (CONTROLS.len() - slot) as i32
    }
}

impl WindowDecorator for RetroDecorator {
    fn render_window(
        &self,
        buffer: &mut Buffer,
        bounds: Rect,
        geometry: Geometry,
        chrome: WindowChrome<'_>,
    ) {
        if geometry.width < 2 || geometry.height < 2 {
            return;
        }
        let header_style = if chrome.focused {
            Style::default()
                .bg(crate::theme::decorator_header_bg())
                .fg(crate::theme::decorator_header_fg())
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .bg(crate::theme::decorator_inactive_bg())
                .fg(crate::theme::decorator_header_fg())
        };
        let mut border_style = Style::default()
            .fg(crate::theme::decorator_border())
            .bg(crate::theme::window_bg());
        let mut body_style = Style::default()
            .fg(crate::theme::window_fg())
            .bg(crate::theme::window_bg());
        let header_style = if chrome.minimizing {
            border_style = border_style.add_modifier(Modifier::DIM);
            body_style = body_style.add_modifier(Modifier::DIM);
            header_style.add_modifier(Modifier::DIM)
        } else {
            header_style
        };

        let left = geometry.left;
        let top = geometry.top;
        let right = left + geometry.width as i32 - 1;
        let bottom = top + geometry.height as i32 - 1;

        // Body
        for y in top + 1..bottom {
            for x in left + 1..right {
                put(buffer, bounds, x, y, " ", body_style);
            }
        }

        // Header
        for x in left..=right {
            let symbol = if x == left {
                "┌"
            } else if x == right {
                "┐"
            } else {
                " "
            };
            put(buffer, bounds, x, top, symbol, header_style);
        }
        let with_controls = geometry.width >= MIN_WIDTH_FOR_CONTROLS;
        let title_end = if with_controls {
            Self::control_left(geometry, 0)
        } else {
            right
        };
        let marker = if chrome.maximized { "▣ " } else { "" };
        let mut x = left + 2;
        for ch in marker.chars().chain(chrome.title.chars()) {
            if x >= title_end - 1 {
                break;
            }
            put(buffer, bounds, x, top, &ch.to_string(), header_style);
            x += 1;
        }
        if with_controls {
            for (slot, (label, _)) in CONTROLS.iter().enumerate() {
                let start = Self::control_left(geometry, slot);
                for (idx, ch) in label.chars().enumerate() {
                    put(
                        buffer,
                        bounds,
                        start + idx as i32,
                        top,
                        &ch.to_string(),
                        header_style,
                    );
                }
            }
        }

        // Sides and bottom
        for y in top + 1..bottom {
            put(buffer, bounds, left, y, "│", border_style);
            put(buffer, bounds, right, y, "│", border_style);
        }
        for x in left..=right {
            let symbol = if x == left {
                "└"
            } else if x == right {
                "┘"
            } else {
                "─"
            };
            put(buffer, bounds, x, bottom, symbol, border_style);
        }
    }

    fn hit_test(&self, geometry: Geometry, x: i32, y: i32) -> HeaderHit {
        if !geometry.contains(x, y) {
            return HeaderHit::None;
        }
        if y != geometry.top {
            return HeaderHit::None;
        }
        if geometry.width >= MIN_WIDTH_FOR_CONTROLS {
            for (slot, (_, hit)) in CONTROLS.iter().enumerate() {
                let start = Self::control_left(geometry, slot);
                if x >= start && x < start + CONTROL_WIDTH {
                    return *hit;
                }
            }
        }
        HeaderHit::Drag
    }
}

fn put(buffer: &mut Buffer, bounds: Rect, x: i32, y: i32, symbol: &str, style: Style) {
    if x < bounds.x as i32
        || y < bounds.y as i32
        || x >= bounds.x as i32 + bounds.width as i32
        || y >= bounds.y as i32 + bounds.height as i32
    {
        return;
    }
    if let Some(cell) = buffer.cell_mut((x as u16, y as u16)) {
        cell.set_symbol(symbol);
        cell.set_style(style);
    }
}
