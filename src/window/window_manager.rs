use std::collections::BTreeMap;
use std::time::Instant;

use crossterm::event::{Event, MouseButton, MouseEventKind};
use ratatui::prelude::Rect;

use super::decorator::{HeaderHit, RetroDecorator, WindowChrome, WindowDecorator};
use super::{Geometry, Viewport, Visibility, Window, WindowId, WindowSpec, WmConfig};
use crate::error::DeskError;
use crate::scheduler::{Scheduler, TaskHandle};
use crate::ui::UiFrame;

/// An in-progress header drag. `grab_x`/`grab_y` is the pointer offset from
/// the window origin at the moment the drag started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragState {
    pub window: WindowId,
    pub grab_x: i32,
    pub grab_y: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum DeferredTask {
    FinishMinimize(WindowId),
}

/// Owns every declared window plus focus, stacking and drag state.
///
/// Windows are declared once at construction and never created or destroyed
/// afterwards; operations only mutate visibility, geometry, stacking and the
/// maximize/positioned flags. Every operation naming an unknown window is a
/// no-op.
#[derive(Debug)]
pub struct WindowManager {
    windows: Vec<Window>,
    index: BTreeMap<WindowId, usize>,
    active: Option<WindowId>,
    drag: Option<DragState>,
    z_counter: u64,
    viewport: Viewport,
    config: WmConfig,
    scheduler: Scheduler<DeferredTask>,
    // set whenever `active` changes; the taskbar drains it via `take_active_change`
    active_dirty: bool,
    decorator: RetroDecorator,
}

impl WindowManager {
    pub fn new(
        specs: impl IntoIterator<Item = WindowSpec>,
        viewport: Viewport,
        config: WmConfig,
    ) -> Result<Self, DeskError> {
        let mut windows = Vec::new();
        let mut index = BTreeMap::new();
        for spec in specs {
            if index.contains_key(&spec.id) {
                return Err(DeskError::DuplicateWindow(spec.id.to_string()));
            }
            index.insert(spec.id.clone(), windows.len());
            windows.push(Window::from_spec(spec));
        }
        Ok(Self {
            windows,
            index,
            active: None,
            drag: None,
            z_counter: 0,
            viewport,
            config,
            scheduler: Scheduler::new(),
            active_dirty: false,
            decorator: RetroDecorator,
        })
    }

    pub fn config(&self) -> WmConfig {
        self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Update the viewport size. Maximized windows are refitted so they keep
    /// covering the desktop area.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        if self.viewport == viewport {
            return;
        }
        self.viewport = viewport;
        let full = self.maximized_geometry();
        for window in self.windows.iter_mut().filter(|w| w.maximized) {
            window.geometry = full;
        }
    }

    /// Desktop area above the taskbar strip.
    pub fn desktop_area(&self) -> Rect {
        Rect {
            x: 0,
            y: 0,
            width: self.viewport.width,
            height: self
                .viewport
                .height
                .saturating_sub(self.config.taskbar_height),
        }
    }

    pub fn taskbar_area(&self) -> Rect {
        let height = self.config.taskbar_height.min(self.viewport.height);
        Rect {
            x: 0,
            y: self.viewport.height.saturating_sub(height),
            width: self.viewport.width,
            height,
        }
    }

    fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn window(&self, id: &str) -> Option<&Window> {
        self.index_of(id).map(|idx| &self.windows[idx])
    }

    /// All windows in declaration order.
    pub fn windows(&self) -> impl Iterator<Item = &Window> {
        self.windows.iter()
    }

    pub fn active_id(&self) -> Option<&WindowId> {
        self.active.as_ref()
    }

    pub fn is_active(&self, id: &str) -> bool {
        self.active.as_ref().is_some_and(|active| active == id)
    }

    pub fn drag_state(&self) -> Option<&DragState> {
        self.drag.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Returns the new active window if it changed since the last call.
    pub fn take_active_change(&mut self) -> Option<Option<WindowId>> {
        if self.active_dirty {
            self.active_dirty = false;
            Some(self.active.clone())
        } else {
            None
        }
    }

    /// Windows that are drawn, bottom-most first.
    pub fn draw_order(&self) -> Vec<&Window> {
        let mut order: Vec<&Window> = self
            .windows
            .iter()
            .filter(|w| w.visibility.is_drawn())
            .collect();
        order.sort_by_key(|w| w.z_order);
        order
    }

    /// Topmost shown window containing the point.
    pub fn window_at(&self, x: i32, y: i32) -> Option<&WindowId> {
        self.windows
            .iter()
            .filter(|w| w.visibility == Visibility::Shown && w.geometry.contains(x, y))
            .max_by_key(|w| w.z_order)
            .map(|w| &w.id)
    }

    fn deactivate(&mut self, idx: usize) {
        if self.active.as_ref() == Some(&self.windows[idx].id) {
            self.active = None;
            self.active_dirty = true;
        }
    }

    fn focus_index(&mut self, idx: usize) {
        let id = self.windows[idx].id.clone();
        if self.active.as_ref() != Some(&id) {
            if let Some(prev) = self.active.take() {
                tracing::debug!(window_id = %prev, "deactivated window");
            }
            self.active = Some(id);
        }
        self.z_counter += 1;
        self.windows[idx].z_order = self.z_counter;
        self.active_dirty = true;
        tracing::debug!(
            window_id = %self.windows[idx].id,
            z = self.z_counter,
            "focused window"
        );
    }

    /// Focus: make the window active and stack it above everything else.
    /// Only shown windows can take focus; use [`WindowManager::show_window`]
    /// for hidden or minimizing ones.
    pub fn bring_to_front(&mut self, id: &str) {
        if let Some(idx) = self.index_of(id)
            && self.windows[idx].visibility == Visibility::Shown
        {
            self.focus_index(idx);
        }
    }

    /// Show, focus and (the first time only) center a window.
    pub fn show_window(&mut self, id: &str) {
        let Some(idx) = self.index_of(id) else {
            tracing::debug!(window_id = id, "ignored show for unknown window");
            return;
        };
        if let Some(handle) = self.windows[idx].pending_hide.take() {
            self.scheduler.cancel(handle);
            tracing::debug!(window_id = id, "cancelled pending minimize");
        }
        self.windows[idx].visibility = Visibility::Shown;
        self.focus_index(idx);
        if !self.windows[idx].positioned {
            let desktop = self.desktop_area();
            let window = &mut self.windows[idx];
            let left = (desktop.width as i32 - window.geometry.width as i32) / 2;
            let top = (desktop.height as i32 - window.geometry.height as i32) / 2;
            window.geometry.left = left.max(0);
            window.geometry.top = top.max(0);
            window.positioned = true;
        }
        tracing::debug!(window_id = id, "showed window");
    }

    pub fn close_window(&mut self, id: &str) {
        let Some(idx) = self.index_of(id) else {
            return;
        };
        if let Some(handle) = self.windows[idx].pending_hide.take() {
            self.scheduler.cancel(handle);
        }
        self.windows[idx].visibility = Visibility::Hidden;
        self.release_drag(idx);
        self.deactivate(idx);
        tracing::debug!(window_id = id, "closed window");
    }

    pub fn minimize_window(&mut self, id: &str) {
        self.minimize_window_at(id, Instant::now());
    }

    /// Start the minimize animation at `now`; the window is hidden once
    /// [`WindowManager::tick`] runs past `now + minimize_delay`.
    pub fn minimize_window_at(&mut self, id: &str, now: Instant) {
        let Some(idx) = self.index_of(id) else {
            return;
        };
        if self.windows[idx].visibility != Visibility::Shown {
            return;
        }
        self.windows[idx].visibility = Visibility::Minimizing;
        let deadline = now + self.config.minimize_delay;
        let handle = self
            .scheduler
            .schedule(deadline, DeferredTask::FinishMinimize(self.windows[idx].id.clone()));
        self.windows[idx].pending_hide = Some(handle);
        self.release_drag(idx);
        self.deactivate(idx);
        tracing::debug!(window_id = id, "minimizing window");
    }

    /// Run deferred work that is due at `now`.
    pub fn tick(&mut self, now: Instant) {
        for (handle, task) in self.scheduler.take_due(now) {
            match task {
                DeferredTask::FinishMinimize(id) => self.finish_minimize(id.as_str(), handle),
            }
        }
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.scheduler.next_deadline()
    }

    fn finish_minimize(&mut self, id: &str, handle: TaskHandle) {
        let Some(idx) = self.index_of(id) else {
            return;
        };
        let window = &mut self.windows[idx];
        if window.pending_hide != Some(handle) {
            return;
        }
        window.pending_hide = None;
        window.visibility = Visibility::Minimized;
        tracing::debug!(window_id = id, "minimized window");
    }

    fn maximized_geometry(&self) -> Geometry {
        let desktop = self.desktop_area();
        Geometry::new(0, 0, desktop.width, desktop.height)
    }

    /// Maximize to the desktop area, or restore the saved geometry when
    /// already maximized.
    pub fn toggle_maximize(&mut self, id: &str) {
        let Some(idx) = self.index_of(id) else {
            return;
        };
        let full = self.maximized_geometry();
        let config = self.config;
        let window = &mut self.windows[idx];
        if window.maximized {
            if let Some(saved) = window.saved_geometry.take() {
                window.geometry = saved;
            }
            window.maximized = false;
            tracing::debug!(window_id = id, "restored window");
        } else {
            let (width, height) = if window.explicit_size {
                (window.geometry.width, window.geometry.height)
            } else {
                (config.default_restore_width, config.default_restore_height)
            };
            window.saved_geometry = Some(Geometry {
                width,
                height,
                ..window.geometry
            });
            window.geometry = full;
            window.explicit_size = true;
            window.maximized = true;
            tracing::debug!(window_id = id, "maximized window");
        }
    }

    /// Start dragging `id` by its header with the pointer at `(x, y)`.
    pub fn begin_drag(&mut self, id: &str, x: i32, y: i32) {
        let Some(idx) = self.index_of(id) else {
            return;
        };
        if self.windows[idx].visibility != Visibility::Shown {
            return;
        }
        let geometry = self.windows[idx].geometry;
        self.drag = Some(DragState {
            window: self.windows[idx].id.clone(),
            grab_x: x - geometry.left,
            grab_y: y - geometry.top,
        });
        self.focus_index(idx);
        tracing::debug!(window_id = id, "drag started");
    }

    /// Move the dragged window so the grab point follows the pointer,
    /// clamped to the viewport above the taskbar.
    pub fn drag_to(&mut self, x: i32, y: i32) -> bool {
        let Some(drag) = self.drag.as_ref() else {
            return false;
        };
        let Some(idx) = self.index_of(drag.window.as_str()) else {
            return false;
        };
        let (left, top) = (x - drag.grab_x, y - drag.grab_y);
        let viewport = self.viewport;
        let taskbar = self.config.taskbar_height as i32;
        let geometry = &mut self.windows[idx].geometry;
        let max_left = viewport.width as i32 - geometry.width as i32;
        let max_top = viewport.height as i32 - geometry.height as i32 - taskbar;
        geometry.left = left.min(max_left).max(0);
        geometry.top = top.min(max_top).max(0);
        true
    }

    pub fn end_drag(&mut self) -> bool {
        match self.drag.take() {
            Some(drag) => {
                tracing::debug!(window_id = %drag.window, "drag ended");
                true
            }
            None => false,
        }
    }

    fn release_drag(&mut self, idx: usize) {
        if self
            .drag
            .as_ref()
            .is_some_and(|drag| drag.window == self.windows[idx].id)
        {
            self.drag = None;
        }
    }

    /// Route a pointer event through the window chrome. Returns `true` when
    /// the event was consumed by the window manager.
    pub fn handle_pointer_event(&mut self, event: &Event) -> bool {
        let Event::Mouse(mouse) = event else {
            return false;
        };
        let (x, y) = (mouse.column as i32, mouse.row as i32);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let Some(id) = self.window_at(x, y).cloned() else {
                    return false;
                };
                let Some(geometry) = self.window(id.as_str()).map(Window::geometry) else {
                    return false;
                };
                let hit = self.decorator.hit_test(geometry, x, y);
                if hit == HeaderHit::Drag {
                    self.begin_drag(id.as_str(), x, y);
                    return true;
                }
                self.bring_to_front(id.as_str());
                match hit {
                    HeaderHit::Close => self.close_window(id.as_str()),
                    HeaderHit::Minimize => self.minimize_window(id.as_str()),
                    HeaderHit::Maximize => self.toggle_maximize(id.as_str()),
                    HeaderHit::Drag | HeaderHit::None => {}
                }
                true
            }
            MouseEventKind::Drag(_) | MouseEventKind::Moved => self.drag_to(x, y),
            MouseEventKind::Up(_) => self.end_drag(),
            _ => false,
        }
    }

    /// Draw every visible window bottom-most first. `content` is called
    /// after each frame is drawn with the window and its visible content
    /// rectangle.
    pub fn render_windows<F>(&self, frame: &mut UiFrame<'_>, mut content: F)
    where
        F: FnMut(&mut UiFrame<'_>, &Window, Rect, bool),
    {
        let bounds = self.desktop_area().intersection(frame.area());
        for window in self.draw_order() {
            let focused = self.is_active(window.id.as_str());
            let chrome = WindowChrome {
                title: &window.title,
                focused,
                minimizing: window.visibility == Visibility::Minimizing,
                maximized: window.maximized,
            };
            self.decorator
                .render_window(frame.buffer_mut(), bounds, window.geometry, chrome);
            let inner = self
                .decorator
                .content_geometry(window.geometry)
                .visible_rect(bounds);
            if inner.width > 0 && inner.height > 0 {
                content(frame, window, inner, focused);
            }
        }
    }
}
