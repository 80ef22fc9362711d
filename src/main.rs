use std::time::Instant;

use clap::Parser;

use term_desk::config::{Cli, DesktopConfig};
use term_desk::debug_log::{DebugLogHandle, install_panic_hook, set_global_debug_log};
use term_desk::desktop::Desktop;
use term_desk::drivers::{ConsoleInputDriver, ConsoleOutputDriver, OutputDriver};
use term_desk::error::DeskError;
use term_desk::runner::run_desktop;
use term_desk::tracing_sub;
use term_desk::window::ConsoleGeometry;

fn main() -> Result<(), DeskError> {
    let cli = Cli::parse();
    let config = DesktopConfig::try_from(&cli)?;

    let log = DebugLogHandle::default();
    set_global_debug_log(log.clone());
    install_panic_hook();
    tracing_sub::init_default();
    tracing::info!(?config, "starting desktop");

    let mut desktop = Desktop::new(&config, ConsoleGeometry, Instant::now());
    let mut output = ConsoleOutputDriver::new()?;
    output.enter()?;
    let result = run_desktop(
        &mut output,
        ConsoleInputDriver::new(),
        &mut desktop,
        config.poll_interval,
    );
    output.exit()?;

    if let Err(err) = &result {
        tracing::error!(%err, "desktop stopped");
    }
    if config.dump_log {
        for line in log.snapshot() {
            eprintln!("{line}");
        }
    }
    result
}
