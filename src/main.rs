use std::process::ExitCode;

use clap::Parser;

use retro_desk::components::debug_log::{
    DEFAULT_MAX_LINES, install_panic_hook, set_global_debug_log,
};
use retro_desk::components::DebugLogHandle;
use retro_desk::config::{Cli, DeskConfig};
use retro_desk::desk::Desk;
use retro_desk::drivers::OutputDriver;
use retro_desk::drivers::console::{ConsoleInputDriver, ConsoleOutputDriver};
use retro_desk::error::DeskError;
use retro_desk::runner::run_desk;
use retro_desk::tracing_sub;
use retro_desk::window::Viewport;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("retro-desk: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), DeskError> {
    let config = DeskConfig::try_from(cli)?;

    let debug_log = config.debug.then(|| {
        let handle = DebugLogHandle::new(DEFAULT_MAX_LINES);
        set_global_debug_log(handle.clone());
        install_panic_hook();
        handle
    });
    tracing_sub::init_default();
    tracing::info!(?config, "starting");

    let mut output = ConsoleOutputDriver::new()?;
    output.enter()?;
    let size = output.terminal_mut().size()?;
    let mut desk = Desk::new(&config, Viewport::new(size.width, size.height), debug_log)?;
    let mut input = ConsoleInputDriver::new();

    let result = run_desk(output.terminal_mut(), &mut input, &mut desk, config.tick);
    output.exit()?;
    result?;
    Ok(())
}
