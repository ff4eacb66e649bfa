use std::time::Duration;

use clap::Parser;

use crate::constants::{DEFAULT_TICK, MINIMIZE_DELAY};
use crate::error::DeskError;
use crate::window::WmConfig;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "retro-desk",
    version = env!("CARGO_PKG_VERSION"),
    about = "A retro desktop portfolio that runs in your terminal"
)]
pub struct Cli {
    /// Main loop poll interval.
    #[arg(long = "tick-ms", value_name = "MS", default_value_t = DEFAULT_TICK.as_millis() as u64)]
    pub tick_ms: u64,

    /// Length of the minimize animation before a window is hidden.
    #[arg(
        long = "minimize-delay-ms",
        value_name = "MS",
        default_value_t = MINIMIZE_DELAY.as_millis() as u64
    )]
    pub minimize_delay_ms: u64,

    /// Capture tracing output and show it in a "Debug Log" window.
    #[arg(long)]
    pub debug: bool,

    /// Start without mouse capture (toggle later with F2).
    #[arg(long = "no-mouse")]
    pub no_mouse: bool,
}

/// Validated runtime configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeskConfig {
    pub tick: Duration,
    pub wm: WmConfig,
    pub debug: bool,
    pub mouse_capture: bool,
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self {
            tick: DEFAULT_TICK,
            wm: WmConfig::terminal(),
            debug: false,
            mouse_capture: true,
        }
    }
}

impl TryFrom<&Cli> for DeskConfig {
    type Error = DeskError;

    fn try_from(cli: &Cli) -> Result<Self, Self::Error> {
        if !(1..=1000).contains(&cli.tick_ms) {
            return Err(DeskError::Config(
                "tick-ms must be between 1 and 1000".to_string(),
            ));
        }
        if cli.minimize_delay_ms > 10_000 {
            return Err(DeskError::Config(
                "minimize-delay-ms must be at most 10000".to_string(),
            ));
        }
        Ok(Self {
            tick: Duration::from_millis(cli.tick_ms),
            wm: WmConfig::terminal()
                .with_minimize_delay(Duration::from_millis(cli.minimize_delay_ms)),
            debug: cli.debug,
            mouse_capture: !cli.no_mouse,
        })
    }
}
