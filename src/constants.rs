//! Shared crate-wide constants.

use std::time::Duration;

/// Height of the taskbar strip reserved at the bottom of the viewport.
///
/// Units match the viewport the window manager is configured with. The
/// default configuration is expressed in pixels; the terminal preset uses
/// [`TERMINAL_TASKBAR_HEIGHT`].
pub const TASKBAR_HEIGHT: u16 = 50;

/// Taskbar height, in rows, for the terminal front end.
pub const TERMINAL_TASKBAR_HEIGHT: u16 = 1;

/// How long the minimize animation runs before the window is hidden.
pub const MINIMIZE_DELAY: Duration = Duration::from_millis(300);

/// Size assumed as the pre-maximize size of a window that never had an
/// explicit width/height.
pub const DEFAULT_RESTORE_WIDTH: u16 = 400;
pub const DEFAULT_RESTORE_HEIGHT: u16 = 300;

/// Restore size for the terminal front end, in cells.
pub const TERMINAL_RESTORE_WIDTH: u16 = 48;
pub const TERMINAL_RESTORE_HEIGHT: u16 = 14;

/// Default poll interval of the main loop.
pub const DEFAULT_TICK: Duration = Duration::from_millis(16);

/// Window opened by the console's `open projects` command.
pub const PROJECTS_WINDOW_ID: &str = "projects-window";

/// Window shown on startup.
pub const INTRO_WINDOW_ID: &str = "intro-window";

pub const CONSOLE_WINDOW_ID: &str = "console-window";

pub const DEBUG_WINDOW_ID: &str = "debug-window";

pub const ABOUT_WINDOW_ID: &str = "about-window";

pub const SKILLS_WINDOW_ID: &str = "skills-window";

pub const CONTACT_WINDOW_ID: &str = "contact-window";

/// One full turn of the rainbow hue rotation.
pub const RAINBOW_PERIOD: Duration = Duration::from_secs(2);
