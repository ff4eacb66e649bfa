use std::time::Instant;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEventKind};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
};

use crate::ui::{UiFrame, fill, safe_set_string, truncate_to_width};
use crate::window::{Visibility, WindowId, WindowManager};

#[derive(Debug, Clone)]
pub struct TaskbarEntry {
    id: WindowId,
    label: String,
    highlighted: bool,
}

impl TaskbarEntry {
    pub fn id(&self) -> &WindowId {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }
}

#[derive(Debug, Clone, Copy)]
struct EntryHit {
    index: usize,
    rect: Rect,
}

/// Bottom strip with one entry per window. Entry highlighting mirrors the
/// window manager's active window; clicking an entry shows, minimizes or
/// raises its window.
#[derive(Debug)]
pub struct Taskbar {
    entries: Vec<TaskbarEntry>,
    hits: Vec<EntryHit>,
    hostname: Option<String>,
}

impl Taskbar {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (WindowId, S)>,
        S: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(id, label)| TaskbarEntry {
                    id,
                    label: label.into(),
                    highlighted: false,
                })
                .collect(),
            hits: Vec::new(),
            hostname: None,
        }
    }

    pub fn entries(&self) -> &[TaskbarEntry] {
        &self.entries
    }

    pub fn is_highlighted(&self, id: &str) -> bool {
        self.entries
            .iter()
            .any(|entry| entry.highlighted && entry.id == id)
    }

    /// Highlight the entry of `active` and clear every other entry.
    pub fn sync(&mut self, active: Option<&WindowId>) {
        for entry in &mut self.entries {
            entry.highlighted = active.is_some_and(|id| *id == entry.id);
        }
    }

    pub fn click(&mut self, id: &str, wm: &mut WindowManager) {
        self.click_at(id, wm, Instant::now());
    }

    /// Hidden (or still animating out) windows are shown, the active window
    /// is minimized, any other window is raised.
    pub fn click_at(&mut self, id: &str, wm: &mut WindowManager, now: Instant) {
        let Some(visibility) = wm.window(id).map(|w| w.visibility()) else {
            return;
        };
        if visibility.is_hidden() || visibility == Visibility::Minimizing {
            wm.show_window(id);
        } else if wm.is_active(id) {
            wm.minimize_window_at(id, now);
        } else {
            wm.bring_to_front(id);
        }
        tracing::debug!(window_id = id, ?visibility, "taskbar entry clicked");
        self.sync(wm.active_id());
    }

    /// Click the `n`-th entry (zero based). Returns false when out of range.
    pub fn click_nth(&mut self, n: usize, wm: &mut WindowManager) -> bool {
        let Some(id) = self.entries.get(n).map(|entry| entry.id.clone()) else {
            return false;
        };
        self.click(id.as_str(), wm);
        true
    }

    /// Alt+1..Alt+9 click the matching entry.
    pub fn handle_key(&mut self, key: &KeyEvent, wm: &mut WindowManager) -> bool {
        if !key.modifiers.contains(KeyModifiers::ALT) {
            return false;
        }
        let KeyCode::Char(ch) = key.code else {
            return false;
        };
        match ch.to_digit(10) {
            Some(digit @ 1..=9) => self.click_nth(digit as usize - 1, wm),
            _ => false,
        }
    }

    /// Entry under a left-button press, if any.
    pub fn hit_test(&self, event: &Event) -> Option<WindowId> {
        let Event::Mouse(mouse) = event else {
            return None;
        };
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return None;
        }
        self.hits
            .iter()
            .find(|hit| rect_contains(hit.rect, mouse.column, mouse.row))
            .map(|hit| self.entries[hit.index].id.clone())
    }

    pub fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect) {
        self.hits.clear();
        let buffer = frame.buffer_mut();
        let bounds = area.intersection(buffer.area);
        if bounds.width == 0 || bounds.height == 0 {
            return;
        }
        let base = Style::default()
            .bg(crate::theme::taskbar_bg())
            .fg(crate::theme::taskbar_fg());
        fill(buffer, bounds, base);

        let y = bounds.y;
        let max_x = bounds.x.saturating_add(bounds.width);
        let start = " ≡ Start ";
        safe_set_string(
            buffer,
            bounds,
            bounds.x,
            y,
            start,
            base.add_modifier(Modifier::BOLD),
        );
        let mut x = bounds.x.saturating_add(start.chars().count() as u16);

        for (index, entry) in self.entries.iter().enumerate() {
            let max_label = max_x.saturating_sub(x).saturating_sub(3) as usize;
            if max_label == 0 {
                break;
            }
            let chunk = format!(" {} ", truncate_to_width(&entry.label, max_label));
            let chunk_width = chunk.chars().count() as u16;
            if x.saturating_add(chunk_width) > max_x {
                break;
            }
            let style = if entry.highlighted {
                Style::default()
                    .bg(crate::theme::taskbar_active_bg())
                    .fg(crate::theme::taskbar_active_fg())
                    .add_modifier(Modifier::BOLD)
            } else {
                base
            };
            safe_set_string(buffer, bounds, x, y, &chunk, style);
            self.hits.push(EntryHit {
                index,
                rect: Rect {
                    x,
                    y,
                    width: chunk_width,
                    height: 1,
                },
            });
            x = x.saturating_add(chunk_width + 1);
        }

        // Info label right-aligned in whatever room the entries left.
        let info = self.info_label();
        let room = max_x.saturating_sub(x) as usize;
        let info_width = info.chars().count();
        if room > info_width {
            let info_x = max_x.saturating_sub(info_width as u16);
            safe_set_string(
                buffer,
                bounds,
                info_x,
                y,
                &info,
                base.fg(crate::theme::taskbar_info_fg()),
            );
        }
    }

    fn info_label(&mut self) -> String {
        const PKG_NAME: &str = env!("CARGO_PKG_NAME");
        const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");
        let platform = std::env::consts::OS;
        let hostname = self
            .hostname
            .get_or_insert_with(|| {
                hostname::get()
                    .ok()
                    .and_then(|s| s.into_string().ok())
                    .unwrap_or_else(|| "unknown-host".to_string())
            })
            .clone();
        format!("{PKG_NAME} {PKG_VERSION} · {platform} · {hostname} ")
    }
}

fn rect_contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && row >= rect.y
        && column < rect.x.saturating_add(rect.width)
        && row < rect.y.saturating_add(rect.height)
}
