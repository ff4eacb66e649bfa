use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

pub const ACHIEVEMENT_TITLE: &str = "Achievement Unlocked";
pub const ACHIEVEMENT_MESSAGE: &str = "🎮 Achievement Unlocked: Retro Master! 🎮";

/// Up Up Down Down Left Right Left Right b a
pub const KONAMI_CODE: [KeyCode; 10] = [
    KeyCode::Up,
    KeyCode::Up,
    KeyCode::Down,
    KeyCode::Down,
    KeyCode::Left,
    KeyCode::Right,
    KeyCode::Left,
    KeyCode::Right,
    KeyCode::Char('b'),
    KeyCode::Char('a'),
];

/// Watches every key press for the Konami sequence.
///
/// A key that is not the expected next one drops progress back to zero and
/// is not re-checked as the start of a new attempt, so `Up Up Up Down ...`
/// never matches.
#[derive(Debug, Default, Clone)]
pub struct KonamiTracker {
    progress: usize,
}

impl KonamiTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn progress(&self) -> usize {
        self.progress
    }

    /// Feed one key. Returns `true` when this key completes the sequence;
    /// progress then starts over.
    pub fn feed(&mut self, code: KeyCode) -> bool {
        if code == KONAMI_CODE[self.progress] {
            self.progress += 1;
            if self.progress == KONAMI_CODE.len() {
                self.progress = 0;
                tracing::debug!("konami code completed");
                return true;
            }
        } else {
            self.progress = 0;
        }
        false
    }

    /// Key events as delivered by the terminal; releases are ignored.
    pub fn feed_event(&mut self, key: &KeyEvent) -> bool {
        if key.kind == KeyEventKind::Release {
            return false;
        }
        self.feed(key.code)
    }
}

/// Hue rotation driving the rainbow theme after the code is entered: one
/// full turn every `period`.
#[derive(Debug, Clone, Copy)]
pub struct Rainbow {
    started: std::time::Instant,
    period: std::time::Duration,
}

impl Rainbow {
    pub fn start(now: std::time::Instant, period: std::time::Duration) -> Self {
        Self {
            started: now,
            period,
        }
    }

    pub fn hue_at(&self, now: std::time::Instant) -> f32 {
        let period = self.period.as_secs_f32();
        if period <= 0.0 {
            return 0.0;
        }
        let elapsed = now.saturating_duration_since(self.started).as_secs_f32();
        (elapsed % period) / period * 360.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn feed_all(tracker: &mut KonamiTracker, codes: &[KeyCode]) -> bool {
        codes.iter().fold(false, |_, code| tracker.feed(*code))
    }

    #[test]
    fn full_sequence_completes_and_resets() {
        let mut t = KonamiTracker::new();
        assert!(feed_all(&mut t, &KONAMI_CODE));
        assert_eq!(t.progress(), 0);
        assert!(feed_all(&mut t, &KONAMI_CODE));
    }

    #[test]
    fn mismatch_resets_without_retesting_key() {
        let mut t = KonamiTracker::new();
        t.feed(KeyCode::Up);
        t.feed(KeyCode::Up);
        // a third Up is wrong (Down expected) and does not count as a new start
        assert!(!t.feed(KeyCode::Up));
        assert_eq!(t.progress(), 0);

        let mut t = KonamiTracker::new();
        let mut codes = vec![KeyCode::Up];
        codes.extend_from_slice(&KONAMI_CODE);
        // Up, then Up Up Down...: the second Up is progress 2, third Up breaks
        assert!(!feed_all(&mut t, &codes));
    }

    #[test]
    fn uppercase_letters_do_not_match() {
        let mut t = KonamiTracker::new();
        let mut codes = KONAMI_CODE.to_vec();
        codes[8] = KeyCode::Char('B');
        assert!(!feed_all(&mut t, &codes));
    }

    #[test]
    fn rainbow_hue_wraps_each_period() {
        let t0 = Instant::now();
        let rainbow = Rainbow::start(t0, Duration::from_secs(2));
        assert_eq!(rainbow.hue_at(t0), 0.0);
        assert!((rainbow.hue_at(t0 + Duration::from_millis(500)) - 90.0).abs() < 0.01);
        assert!((rainbow.hue_at(t0 + Duration::from_millis(2500)) - 90.0).abs() < 0.01);
    }
}
