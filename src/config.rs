//! Command-line options and the runtime configuration derived from them.

use std::time::Duration;

use clap::Parser;

use crate::apps::AppId;
use crate::constants::DEFAULT_POLL_INTERVAL;
use crate::error::DeskError;

#[derive(Parser, Debug, Default)]
#[command(
    name = "term-desk",
    version = env!("CARGO_PKG_VERSION"),
    about = "A simulated desktop with draggable windows, in your terminal"
)]
pub struct Cli {
    /// Skip the boot splash and lock screen.
    #[arg(long)]
    pub skip_boot: bool,

    /// Input poll interval; also the animation tick.
    #[arg(long = "tick-ms", value_name = "MS")]
    pub tick_ms: Option<u64>,

    /// Open an application once the desktop is shown (notepad, explorer, chrome).
    #[arg(long, value_name = "APP")]
    pub open: Option<String>,

    /// Print the captured log to stderr after the terminal is restored.
    #[arg(long)]
    pub dump_log: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesktopConfig {
    pub skip_boot: bool,
    pub poll_interval: Duration,
    pub initial_app: Option<AppId>,
    pub dump_log: bool,
}

impl Default for DesktopConfig {
    fn default() -> Self {
        Self {
            skip_boot: false,
            poll_interval: DEFAULT_POLL_INTERVAL,
            initial_app: None,
            dump_log: false,
        }
    }
}

impl TryFrom<&Cli> for DesktopConfig {
    type Error = DeskError;

    fn try_from(cli: &Cli) -> Result<Self, Self::Error> {
        let initial_app = cli.open.as_deref().map(str::parse).transpose()?;
        let poll_interval = cli
            .tick_ms
            .map(|ms| Duration::from_millis(ms.clamp(1, 1000)))
            .unwrap_or(DEFAULT_POLL_INTERVAL);
        Ok(Self {
            skip_boot: cli.skip_boot,
            poll_interval,
            initial_app,
            dump_log: cli.dump_log,
        })
    }
}
