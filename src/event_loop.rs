use std::io;
use std::time::{Duration, Instant};

use crossterm::event::Event;

use crate::drivers::InputDriver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlFlow {
    Continue,
    /// Keep going, but wake no later than this instant even without input.
    WaitUntil(Instant),
    Quit,
}

/// The single loop that drives the desk.
///
/// It is the only place that polls the input driver. Each iteration first
/// calls the handler with `None` (advance timers, draw) and then hands over
/// every event that is already queued. Minimize animations and the rainbow
/// hue are time driven, so the `None` call happens at least once per poll
/// interval even when no input arrives.
pub struct EventLoop<D> {
    driver: D,
    poll_interval: Duration,
}

impl<D: InputDriver> EventLoop<D> {
    pub fn new(driver: D, poll_interval: Duration) -> Self {
        Self {
            driver,
            poll_interval,
        }
    }

    pub fn poll(&mut self) -> io::Result<Option<Event>> {
        if self.driver.poll(self.poll_interval)? {
            Ok(Some(self.driver.read()?))
        } else {
            Ok(None)
        }
    }

    pub fn driver(&mut self) -> &mut D {
        &mut self.driver
    }

    fn timeout_until(&self, deadline: Instant, now: Instant) -> Duration {
        deadline.saturating_duration_since(now).min(self.poll_interval)
    }

    /// Run until the handler returns `ControlFlow::Quit`.
    ///
    /// The handler is called with `Some(event)` for input and `None` once
    /// per iteration before polling. A `WaitUntil` from the `None` call
    /// shortens the next poll so timers fire on time.
    pub fn run<F>(&mut self, mut handler: F) -> io::Result<()>
    where
        F: FnMut(&mut D, Option<Event>) -> io::Result<ControlFlow>,
    {
        loop {
            let timeout = match handler(&mut self.driver, None)? {
                ControlFlow::Quit => break,
                ControlFlow::WaitUntil(deadline) => self.timeout_until(deadline, Instant::now()),
                ControlFlow::Continue => self.poll_interval,
            };

            if self.driver.poll(timeout)? {
                // drain bursts (drags, wheel) before the next redraw
                loop {
                    let event = self.driver.read()?;
                    if let ControlFlow::Quit = handler(&mut self.driver, Some(event))? {
                        return Ok(());
                    }
                    if !self.driver.poll(Duration::from_millis(0))? {
                        break;
                    }
                }
            }
        }
        Ok(())
    }
}
