use std::time::Instant;

use crate::constants::RAINBOW_PERIOD;
use crate::easter_egg::Rainbow;

/// Desk-wide UI flags that are not owned by a single window.
#[derive(Debug, Default, Clone, Copy)]
pub struct AppState {
    mouse_capture_enabled: bool,
    mouse_capture_dirty: bool,
    rainbow: Option<Rainbow>,
}

impl AppState {
    pub fn new(mouse_capture_enabled: bool) -> Self {
        Self {
            mouse_capture_enabled,
            // the runner applies the initial mode on its first iteration
            mouse_capture_dirty: true,
            rainbow: None,
        }
    }

    pub fn mouse_capture_enabled(&self) -> bool {
        self.mouse_capture_enabled
    }

    pub fn set_mouse_capture_enabled(&mut self, enabled: bool) {
        if self.mouse_capture_enabled == enabled {
            return;
        }
        self.mouse_capture_enabled = enabled;
        self.mouse_capture_dirty = true;
    }

    pub fn toggle_mouse_capture(&mut self) {
        let enabled = !self.mouse_capture_enabled;
        self.set_mouse_capture_enabled(enabled);
    }

    pub fn take_mouse_capture_change(&mut self) -> Option<bool> {
        if self.mouse_capture_dirty {
            self.mouse_capture_dirty = false;
            Some(self.mouse_capture_enabled)
        } else {
            None
        }
    }

    pub fn rainbow_enabled(&self) -> bool {
        self.rainbow.is_some()
    }

    /// Start the rainbow hue animation. Already running animations keep
    /// their phase.
    pub fn enable_rainbow(&mut self, now: Instant) {
        if self.rainbow.is_none() {
            self.rainbow = Some(Rainbow::start(now, RAINBOW_PERIOD));
        }
    }

    /// Current hue shift in degrees, zero while the rainbow is off.
    pub fn hue_shift(&self, now: Instant) -> f32 {
        self.rainbow.map_or(0.0, |rainbow| rainbow.hue_at(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn mouse_capture_toggle_and_take_change() {
        let mut s = AppState::new(true);
        // initial mode is reported once
        assert_eq!(s.take_mouse_capture_change(), Some(true));
        s.set_mouse_capture_enabled(true);
        assert!(s.take_mouse_capture_change().is_none());
        s.set_mouse_capture_enabled(false);
        assert_eq!(s.take_mouse_capture_change(), Some(false));
        assert!(s.take_mouse_capture_change().is_none());
        s.toggle_mouse_capture();
        assert!(s.mouse_capture_enabled());
    }

    #[test]
    fn rainbow_keeps_phase_when_reenabled() {
        let mut s = AppState::new(false);
        let t0 = Instant::now();
        assert_eq!(s.hue_shift(t0), 0.0);
        s.enable_rainbow(t0);
        s.enable_rainbow(t0 + Duration::from_millis(500));
        assert!(s.rainbow_enabled());
        assert!((s.hue_shift(t0 + Duration::from_millis(500)) - 90.0).abs() < 0.01);
    }
}
