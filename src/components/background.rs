use crossterm::event::{Event, MouseEventKind};
use ratatui::layout::Rect;
use ratatui::style::Style;

use crate::components::{Component, ComponentContext};
use crate::ui::{UiFrame, fill};

const DOT_SPACING_X: u16 = 4;
const DOT_SPACING_Y: u16 = 2;
// glow radius in rows; columns are scaled by 2 for the cell aspect ratio
const GLOW_RADIUS: f32 = 6.0;

/// Desktop backdrop: a dotted grid with a soft glow that follows the pointer.
/// The pointer is stored as a percentage of the viewport so the glow keeps
/// its relative position across resizes.
#[derive(Debug, Default)]
pub struct BackgroundComponent {
    pointer: Option<(f32, f32)>,
    viewport: Rect,
}

impl BackgroundComponent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last pointer position as `(x%, y%)` of the viewport.
    pub fn pointer_percent(&self) -> Option<(f32, f32)> {
        self.pointer
    }

    /// Record a raw pointer position. A zero-sized viewport maps to 0%.
    pub fn track_pointer(&mut self, column: u16, row: u16, viewport: Rect) -> (f32, f32) {
        let percent = |pos: u16, origin: u16, len: u16| {
            if len == 0 {
                0.0
            } else {
                (pos.saturating_sub(origin) as f32 / len as f32) * 100.0
            }
        };
        let value = (
            percent(column, viewport.x, viewport.width),
            percent(row, viewport.y, viewport.height),
        );
        self.pointer = Some(value);
        value
    }

    fn glow_center(&self, area: Rect) -> Option<(f32, f32)> {
        let (px, py) = self.pointer?;
        Some((
            area.x as f32 + area.width as f32 * px / 100.0,
            area.y as f32 + area.height as f32 * py / 100.0,
        ))
    }
}

impl Component for BackgroundComponent {
    fn resize(&mut self, area: Rect, _ctx: &ComponentContext) {
        self.viewport = area;
    }

    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, _ctx: &ComponentContext) {
        let buffer = frame.buffer_mut();
        let area = area.intersection(buffer.area);
        if area.width == 0 || area.height == 0 {
            return;
        }
        let bg = crate::theme::desktop_bg();
        fill(buffer, area, Style::default().bg(bg));
        let dot = Style::default().bg(bg).fg(crate::theme::pattern_fg());
        let glow = Style::default().bg(bg).fg(crate::theme::pattern_glow());
        let center = self.glow_center(area);

        for y in area.y..area.y + area.height {
            for x in area.x..area.x + area.width {
                let on_grid =
                    (x - area.x) % DOT_SPACING_X == 0 && (y - area.y) % DOT_SPACING_Y == 0;
                let distance = center.map(|(cx, cy)| {
                    let dx = (x as f32 - cx) / 2.0;
                    let dy = y as f32 - cy;
                    (dx * dx + dy * dy).sqrt()
                });
                let (symbol, style) = match distance {
                    Some(d) if d < GLOW_RADIUS / 2.0 => {
                        (if on_grid { "●" } else { "·" }, glow)
                    }
                    Some(d) if d < GLOW_RADIUS && on_grid => ("•", glow),
                    _ if on_grid => ("·", dot),
                    _ => continue,
                };
                if let Some(cell) = buffer.cell_mut((x, y)) {
                    cell.set_symbol(symbol);
                    cell.set_style(style);
                }
            }
        }
    }

    /// Tracks every pointer movement. Never consumes the event.
    fn handle_event(&mut self, event: &Event, _ctx: &ComponentContext) -> bool {
        if let Event::Mouse(mouse) = event
            && matches!(
                mouse.kind,
                MouseEventKind::Moved | MouseEventKind::Drag(_) | MouseEventKind::Down(_)
            )
        {
            self.track_pointer(mouse.column, mouse.row, self.viewport);
        }
        false
    }
}
