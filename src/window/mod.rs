pub mod decorator;

mod window_manager;

use std::borrow::Borrow;
use std::fmt;
use std::time::Duration;

use ratatui::prelude::Rect;

use crate::constants::{
    DEFAULT_RESTORE_HEIGHT, DEFAULT_RESTORE_WIDTH, MINIMIZE_DELAY, TASKBAR_HEIGHT,
    TERMINAL_RESTORE_HEIGHT, TERMINAL_RESTORE_WIDTH, TERMINAL_TASKBAR_HEIGHT,
};
use crate::scheduler::TaskHandle;

pub use window_manager::{DragState, WindowManager};

/// Stable identifier of a declared window, e.g. `"projects-window"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WindowId(String);

impl WindowId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for WindowId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for WindowId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl PartialEq<str> for WindowId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for WindowId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Signed origin with unsigned size, so windows can be described at
/// positions the viewport does not (yet) contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Geometry {
    pub left: i32,
    pub top: i32,
    pub width: u16,
    pub height: u16,
}

impl Geometry {
    pub const fn new(left: i32, top: i32, width: u16, height: u16) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.left
            && y >= self.top
            && x < self.left + self.width as i32
            && y < self.top + self.height as i32
    }

    /// Portion of this geometry inside `bounds`; empty when they do not
    /// overlap.
    pub fn visible_rect(&self, bounds: Rect) -> Rect {
        let x0 = self.left.max(bounds.x as i32);
        let y0 = self.top.max(bounds.y as i32);
        let x1 = (self.left + self.width as i32).min(bounds.x as i32 + bounds.width as i32);
        let y1 = (self.top + self.height as i32).min(bounds.y as i32 + bounds.height as i32);
        if x1 <= x0 || y1 <= y0 {
            return Rect::default();
        }
        Rect {
            x: x0 as u16,
            y: y0 as u16,
            width: (x1 - x0) as u16,
            height: (y1 - y0) as u16,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

impl From<Rect> for Viewport {
    fn from(rect: Rect) -> Self {
        Self::new(rect.width, rect.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Shown,
    Hidden,
    /// Minimize animation in progress; still drawn.
    Minimizing,
    /// Hidden by a completed minimize.
    Minimized,
}

impl Visibility {
    pub fn is_hidden(self) -> bool {
        matches!(self, Visibility::Hidden | Visibility::Minimized)
    }

    pub fn is_drawn(self) -> bool {
        matches!(self, Visibility::Shown | Visibility::Minimizing)
    }
}

/// Static declaration of a window, consumed once by [`WindowManager::new`].
/// Declared windows start hidden.
#[derive(Debug, Clone)]
pub struct WindowSpec {
    pub id: WindowId,
    pub title: String,
    pub geometry: Geometry,
    pub explicit_size: bool,
}

impl WindowSpec {
    pub fn new(id: impl Into<String>, title: impl Into<String>, width: u16, height: u16) -> Self {
        Self {
            id: WindowId::new(id),
            title: title.into(),
            geometry: Geometry::new(0, 0, width, height),
            explicit_size: false,
        }
    }

    pub fn at(mut self, left: i32, top: i32) -> Self {
        self.geometry.left = left;
        self.geometry.top = top;
        self
    }

    pub fn with_explicit_size(mut self) -> Self {
        self.explicit_size = true;
        self
    }
}

#[derive(Debug, Clone)]
pub struct Window {
    id: WindowId,
    title: String,
    geometry: Geometry,
    explicit_size: bool,
    z_order: u64,
    visibility: Visibility,
    maximized: bool,
    saved_geometry: Option<Geometry>,
    positioned: bool,
    pending_hide: Option<TaskHandle>,
}

impl Window {
    fn from_spec(spec: WindowSpec) -> Self {
        Self {
            id: spec.id,
            title: spec.title,
            geometry: spec.geometry,
            explicit_size: spec.explicit_size,
            z_order: 0,
            visibility: Visibility::Hidden,
            maximized: false,
            saved_geometry: None,
            positioned: false,
            pending_hide: None,
        }
    }

    pub fn id(&self) -> &WindowId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    pub fn has_explicit_size(&self) -> bool {
        self.explicit_size
    }

    pub fn z_order(&self) -> u64 {
        self.z_order
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn is_maximized(&self) -> bool {
        self.maximized
    }

    pub fn is_positioned(&self) -> bool {
        self.positioned
    }

    pub fn has_pending_hide(&self) -> bool {
        self.pending_hide.is_some()
    }
}

/// Tunables of the window manager. The default carries the pixel values of
/// the web layout; [`WmConfig::terminal`] is scaled to character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WmConfig {
    pub taskbar_height: u16,
    pub minimize_delay: Duration,
    pub default_restore_width: u16,
    pub default_restore_height: u16,
}

impl Default for WmConfig {
    fn default() -> Self {
        Self {
            taskbar_height: TASKBAR_HEIGHT,
            minimize_delay: MINIMIZE_DELAY,
            default_restore_width: DEFAULT_RESTORE_WIDTH,
            default_restore_height: DEFAULT_RESTORE_HEIGHT,
        }
    }
}

impl WmConfig {
    pub fn terminal() -> Self {
        Self {
            taskbar_height: TERMINAL_TASKBAR_HEIGHT,
            minimize_delay: MINIMIZE_DELAY,
            default_restore_width: TERMINAL_RESTORE_WIDTH,
            default_restore_height: TERMINAL_RESTORE_HEIGHT,
        }
    }

    pub fn with_minimize_delay(mut self, delay: Duration) -> Self {
        self.minimize_delay = delay;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visible_rect_clips_negative_offsets() {
        let bounds = Rect {
            x: 0,
            y: 0,
            width: 80,
            height: 24,
        };
        let g = Geometry::new(-5, 3, 20, 6);
        let visible = g.visible_rect(bounds);
        assert_eq!(visible.x, 0);
        assert_eq!(visible.y, 3);
        assert_eq!(visible.width, 15);
        assert_eq!(visible.height, 6);

        let outside = Geometry::new(100, 100, 4, 4);
        assert_eq!(outside.visible_rect(bounds), Rect::default());
    }

    #[test]
    fn geometry_contains_is_half_open() {
        let g = Geometry::new(2, 2, 3, 3);
        assert!(g.contains(2, 2));
        assert!(g.contains(4, 4));
        assert!(!g.contains(5, 4));
        assert!(!g.contains(1, 2));
    }

    #[test]
    fn minimized_counts_as_hidden() {
        assert!(Visibility::Minimized.is_hidden());
        assert!(Visibility::Hidden.is_hidden());
        assert!(!Visibility::Minimizing.is_hidden());
        assert!(Visibility::Minimizing.is_drawn());
    }
}
