//! The desk: every window, the taskbar, the backdrop and the modal dialog,
//! plus the routing of terminal events between them.
//!
//! `Desk` never touches the terminal itself. The runner feeds it events and
//! clock ticks and asks it to draw into a `UiFrame`, which keeps the whole
//! interaction model testable against an offscreen buffer.
use std::collections::BTreeMap;
use std::time::Instant;

use crossterm::event::{Event, KeyEvent, MouseEventKind};
use ratatui::layout::Rect;
use ratatui::style::Style;

use crate::components::{
    BackgroundComponent, Component, ComponentContext, ConsoleComponent, DebugLogComponent,
    DebugLogHandle, DialogOverlayComponent, TextViewComponent,
};
use crate::config::DeskConfig;
use crate::constants::{DEBUG_WINDOW_ID, INTRO_WINDOW_ID};
use crate::easter_egg::{ACHIEVEMENT_MESSAGE, ACHIEVEMENT_TITLE, KonamiTracker};
use crate::error::Result;
use crate::event_loop::ControlFlow;
use crate::keybindings::{Action, KeyBindings};
use crate::portfolio::{self, PageContent};
use crate::state::AppState;
use crate::taskbar::Taskbar;
use crate::theme;
use crate::ui::{UiFrame, fill};
use crate::window::{Viewport, WindowId, WindowManager};

/// What a window draws inside its frame.
#[derive(Debug)]
pub enum WindowContent {
    Text(TextViewComponent),
    Console(ConsoleComponent),
    DebugLog(DebugLogComponent),
}

impl Component for WindowContent {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext) {
        match self {
            WindowContent::Text(view) => {
                let style = Style::default()
                    .bg(theme::window_bg())
                    .fg(theme::window_fg());
                fill(frame.buffer_mut(), area, style);
                view.set_style(style);
                view.render(frame, area, ctx);
            }
            WindowContent::Console(console) => console.render(frame, area, ctx),
            WindowContent::DebugLog(log) => log.render(frame, area, ctx),
        }
    }

    fn handle_event(&mut self, event: &Event, ctx: &ComponentContext) -> bool {
        match self {
            WindowContent::Text(view) => view.handle_event(event, ctx),
            WindowContent::Console(console) => console.handle_event(event, ctx),
            WindowContent::DebugLog(log) => log.handle_event(event, ctx),
        }
    }
}

#[derive(Debug)]
pub struct Desk {
    wm: WindowManager,
    taskbar: Taskbar,
    background: BackgroundComponent,
    contents: BTreeMap<WindowId, WindowContent>,
    dialog: DialogOverlayComponent,
    konami: KonamiTracker,
    state: AppState,
    keybindings: KeyBindings,
}

impl Desk {
    /// Declare every page window and open the intro. The debug log window
    /// only exists when a log handle is passed.
    pub fn new(
        config: &DeskConfig,
        viewport: Viewport,
        debug_log: Option<DebugLogHandle>,
    ) -> Result<Self> {
        let pages = portfolio::pages(debug_log.is_some());
        let wm = WindowManager::new(portfolio::window_specs(&pages), viewport, config.wm)?;

        let mut contents = BTreeMap::new();
        for page in &pages {
            let content = match page.content {
                PageContent::Text(text) => {
                    let mut view = TextViewComponent::new();
                    view.set_text(text);
                    WindowContent::Text(view)
                }
                PageContent::Console => WindowContent::Console(ConsoleComponent::new()),
                PageContent::DebugLog => match &debug_log {
                    Some(handle) => WindowContent::DebugLog(DebugLogComponent::new(handle.clone())),
                    None => continue,
                },
            };
            contents.insert(WindowId::from(page.id), content);
        }

        let mut desk = Self {
            wm,
            taskbar: Taskbar::new(portfolio::taskbar_entries(&pages)),
            background: BackgroundComponent::new(),
            contents,
            dialog: DialogOverlayComponent::new(),
            konami: KonamiTracker::new(),
            state: AppState::new(config.mouse_capture),
            keybindings: KeyBindings::default(),
        };
        desk.resize(viewport);
        desk.wm.show_window(INTRO_WINDOW_ID);
        desk.sync_taskbar();
        tracing::info!(windows = pages.len(), "desk ready");
        Ok(desk)
    }

    pub fn window_manager(&self) -> &WindowManager {
        &self.wm
    }

    pub fn window_manager_mut(&mut self) -> &mut WindowManager {
        &mut self.wm
    }

    pub fn taskbar(&self) -> &Taskbar {
        &self.taskbar
    }

    pub fn background(&self) -> &BackgroundComponent {
        &self.background
    }

    pub fn dialog(&self) -> &DialogOverlayComponent {
        &self.dialog
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    pub fn content(&self, id: &str) -> Option<&WindowContent> {
        self.contents.get(id)
    }

    pub fn console(&self) -> Option<&ConsoleComponent> {
        self.contents.values().find_map(|content| match content {
            WindowContent::Console(console) => Some(console),
            _ => None,
        })
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.wm.set_viewport(viewport);
        let area = Rect::new(0, 0, viewport.width, viewport.height);
        self.background.resize(area, &ComponentContext::default());
    }

    /// Advance time-driven state: finish minimize animations, refresh the
    /// taskbar highlight and the rainbow hue.
    pub fn tick(&mut self, now: Instant) {
        self.wm.tick(now);
        self.sync_taskbar();
        if self.state.rainbow_enabled() {
            theme::set_hue_shift(self.state.hue_shift(now));
        }
    }

    /// Route one terminal event. Only the quit binding stops the desk.
    pub fn handle_event(&mut self, event: &Event, now: Instant) -> ControlFlow {
        let flow = match event {
            Event::Resize(width, height) => {
                self.resize(Viewport::new(*width, *height));
                ControlFlow::Continue
            }
            Event::Key(key) => self.handle_key(key, event, now),
            Event::Mouse(_) => {
                self.handle_mouse(event, now);
                ControlFlow::Continue
            }
            _ => ControlFlow::Continue,
        };
        self.sync_taskbar();
        flow
    }

    fn handle_key(&mut self, key: &KeyEvent, event: &Event, now: Instant) -> ControlFlow {
        if self.konami.feed_event(key) {
            tracing::info!("konami code entered");
            self.wm.end_drag();
            self.dialog.show(ACHIEVEMENT_TITLE, ACHIEVEMENT_MESSAGE);
            self.state.enable_rainbow(now);
            return ControlFlow::Continue;
        }
        let action = self.keybindings.action_for_key(key);
        if action == Some(Action::Quit) {
            tracing::info!("quit requested");
            return ControlFlow::Quit;
        }
        if self.dialog.handle_event(event, &ComponentContext::new(true).with_overlay(true)) {
            return ControlFlow::Continue;
        }

        match action {
            Some(Action::ToggleMouseCapture) => {
                self.state.toggle_mouse_capture();
                return ControlFlow::Continue;
            }
            Some(Action::ToggleDebugLog) => {
                self.toggle_debug_log(now);
                return ControlFlow::Continue;
            }
            Some(Action::Quit) | None => {}
        }

        if self.taskbar.handle_key(key, &mut self.wm) {
            return ControlFlow::Continue;
        }

        let Some(active) = self.wm.active_id().cloned() else {
            return ControlFlow::Continue;
        };
        let ctx = ComponentContext::new(true);
        match self.contents.get_mut(active.as_str()) {
            Some(WindowContent::Console(console)) => {
                if !console.handle_key(key, &mut self.wm) {
                    console.handle_event(event, &ctx);
                }
            }
            Some(content) => {
                content.handle_event(event, &ctx);
            }
            None => {}
        }
        ControlFlow::Continue
    }

    fn handle_mouse(&mut self, event: &Event, now: Instant) {
        // the glow follows the pointer even under windows and dialogs
        self.background
            .handle_event(event, &ComponentContext::default());

        // a release always ends a drag, even when the dialog swallows it
        if let Event::Mouse(mouse) = event
            && matches!(mouse.kind, MouseEventKind::Up(_))
        {
            self.wm.end_drag();
        }
        if self.dialog.handle_event(event, &ComponentContext::new(true).with_overlay(true)) {
            return;
        }
        if let Some(id) = self.taskbar.hit_test(event) {
            self.taskbar.click_at(id.as_str(), &mut self.wm, now);
            return;
        }
        if self.wm.handle_pointer_event(event) {
            return;
        }

        let Event::Mouse(mouse) = event else {
            return;
        };
        if matches!(
            mouse.kind,
            MouseEventKind::ScrollUp | MouseEventKind::ScrollDown
        ) && let Some(id) = self
            .wm
            .window_at(mouse.column as i32, mouse.row as i32)
            .cloned()
            && let Some(content) = self.contents.get_mut(id.as_str())
        {
            let ctx = ComponentContext::new(self.wm.is_active(id.as_str()));
            content.handle_event(event, &ctx);
        }
    }

    fn toggle_debug_log(&mut self, now: Instant) {
        let Some(visibility) = self.wm.window(DEBUG_WINDOW_ID).map(|w| w.visibility()) else {
            return;
        };
        if visibility.is_drawn() && self.wm.is_active(DEBUG_WINDOW_ID) {
            self.wm.minimize_window_at(DEBUG_WINDOW_ID, now);
        } else {
            self.wm.show_window(DEBUG_WINDOW_ID);
        }
    }

    fn sync_taskbar(&mut self) {
        if let Some(active) = self.wm.take_active_change() {
            self.taskbar.sync(active.as_ref());
        }
    }

    /// Draw the whole desk bottom-up: backdrop, windows, taskbar, dialog.
    pub fn render(&mut self, frame: &mut UiFrame<'_>) {
        let area = frame.area();
        if Viewport::from(area) != self.wm.viewport() {
            self.resize(Viewport::from(area));
        }
        let Self {
            wm,
            taskbar,
            background,
            contents,
            dialog,
            ..
        } = self;

        background.render(frame, wm.desktop_area(), &ComponentContext::default());
        wm.render_windows(frame, |frame, window, inner, focused| {
            if let Some(content) = contents.get_mut(window.id().as_str()) {
                content.render(frame, inner, &ComponentContext::new(focused));
            }
        });
        taskbar.render(frame, wm.taskbar_area());
        dialog.render(frame, area, &ComponentContext::new(true).with_overlay(true));
    }

    /// Earliest pending timer, so the loop can wake up for it.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.wm.next_deadline()
    }

    /// Drain a pending mouse capture change for the input driver.
    pub fn take_mouse_capture_change(&mut self) -> Option<bool> {
        self.state.take_mouse_capture_change()
    }
}
