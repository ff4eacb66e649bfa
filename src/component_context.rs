//! Per-call UI state handed to every `Component` method.

/// `focused` is set for the content of the active window (and for modal
/// overlays); only focused components react to keys. `overlay` marks
/// components drawn above the whole desk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComponentContext {
    focused: bool,
    overlay: bool,
}

impl ComponentContext {
    pub const fn new(focused: bool) -> Self {
        Self {
            focused,
            overlay: false,
        }
    }

    pub const fn focused(&self) -> bool {
        self.focused
    }

    pub const fn overlay(&self) -> bool {
        self.overlay
    }

    pub const fn with_focus(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub const fn with_overlay(mut self, overlay: bool) -> Self {
        self.overlay = overlay;
        self
    }
}
