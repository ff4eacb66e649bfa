use std::io;
use std::time::{Duration, Instant};

use ratatui::Terminal;
use ratatui::backend::Backend;

use crate::desk::Desk;
use crate::drivers::InputDriver;
use crate::event_loop::{ControlFlow, EventLoop};
use crate::ui::UiFrame;

/// Drive `desk` until it asks to quit.
///
/// Every loop iteration advances the desk clock and redraws; queued input
/// is routed in between. A pending minimize wakes the loop early. Mouse capture changes requested by the desk are
/// forwarded to the input driver after each step.
pub fn run_desk<B, D>(
    terminal: &mut Terminal<B>,
    driver: &mut D,
    desk: &mut Desk,
    poll_interval: Duration,
) -> io::Result<()>
where
    B: Backend,
    D: InputDriver,
{
    let mut event_loop = EventLoop::new(driver, poll_interval);
    event_loop.run(|driver, event| {
        let now = Instant::now();
        let flow = match event {
            Some(event) => desk.handle_event(&event, now),
            None => {
                desk.tick(now);
                terminal
                    .draw(|frame| {
                        let mut ui = UiFrame::new(frame);
                        desk.render(&mut ui);
                    })
                    .map_err(|err| io::Error::other(err.to_string()))?;
                match desk.next_deadline() {
                    Some(deadline) => ControlFlow::WaitUntil(deadline),
                    None => ControlFlow::Continue,
                }
            }
        };
        if let Some(enabled) = desk.take_mouse_capture_change() {
            tracing::debug!(enabled, "mouse capture changed");
            driver.set_mouse_capture(enabled)?;
        }
        Ok(flow)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DeskConfig;
    use crate::constants::CONSOLE_WINDOW_ID;
    use crate::window::Viewport;
    use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
    use ratatui::backend::TestBackend;
    use std::collections::VecDeque;

    #[derive(Default)]
    struct Scripted {
        events: VecDeque<Event>,
        capture: Vec<bool>,
    }

    impl InputDriver for Scripted {
        fn poll(&mut self, _timeout: Duration) -> io::Result<bool> {
            Ok(!self.events.is_empty())
        }

        fn read(&mut self) -> io::Result<Event> {
            self.events
                .pop_front()
                .ok_or_else(|| io::Error::other("script exhausted"))
        }

        fn set_mouse_capture(&mut self, enabled: bool) -> io::Result<()> {
            self.capture.push(enabled);
            Ok(())
        }
    }

    fn key(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn scripted_session_runs_a_console_command_and_quits() {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        let mut desk = Desk::new(&DeskConfig::default(), Viewport::new(100, 30), None).unwrap();
        let mut driver = Scripted::default();
        driver
            .events
            .push_back(key(KeyCode::Char('6'), KeyModifiers::ALT));
        for ch in "help".chars() {
            driver
                .events
                .push_back(key(KeyCode::Char(ch), KeyModifiers::NONE));
        }
        driver
            .events
            .push_back(key(KeyCode::Enter, KeyModifiers::NONE));
        driver.events.push_back(key(KeyCode::F(2), KeyModifiers::NONE));
        driver
            .events
            .push_back(key(KeyCode::Char('q'), KeyModifiers::CONTROL));

        run_desk(&mut terminal, &mut driver, &mut desk, Duration::ZERO).unwrap();

        assert!(desk.window_manager().is_active(CONSOLE_WINDOW_ID));
        assert!(
            desk.console()
                .unwrap()
                .output()
                .contains("Available commands")
        );
        // initial mode, then the F2 toggle
        assert_eq!(driver.capture, vec![true, false]);
    }
}
