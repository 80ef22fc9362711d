//! Wall clock labels for the taskbar and the lock screen.

use std::time::{Duration, Instant};

use chrono::{DateTime, Local};

const REFRESH_INTERVAL: Duration = Duration::from_secs(1);

pub trait TimeSource {
    fn now(&self) -> DateTime<Local>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl TimeSource for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Always reports the same instant; used for deterministic rendering.
#[derive(Debug, Clone, Copy)]
pub struct FixedTime(pub DateTime<Local>);

impl TimeSource for FixedTime {
    fn now(&self) -> DateTime<Local> {
        self.0
    }
}

pub fn time_label(at: &DateTime<Local>) -> String {
    at.format("%H:%M").to_string()
}

/// e.g. `Monday, January 5`.
pub fn date_label(at: &DateTime<Local>) -> String {
    at.format("%A, %B %-d").to_string()
}

/// Cached time and date labels, refreshed at most once per second.
pub struct Clock {
    source: Box<dyn TimeSource>,
    time: String,
    date: String,
    refreshed_at: Option<Instant>,
}

impl Clock {
    pub fn new(source: impl TimeSource + 'static) -> Self {
        let mut clock = Self {
            source: Box::new(source),
            time: String::new(),
            date: String::new(),
            refreshed_at: None,
        };
        clock.reload();
        clock
    }

    pub fn system() -> Self {
        Self::new(SystemClock)
    }

    fn reload(&mut self) {
        let now = self.source.now();
        self.time = time_label(&now);
        self.date = date_label(&now);
    }

    /// Reload the labels if a second has passed since the last refresh.
    /// Returns whether they were reloaded.
    pub fn refresh(&mut self, now: Instant) -> bool {
        let due = self
            .refreshed_at
            .is_none_or(|at| now.saturating_duration_since(at) >= REFRESH_INTERVAL);
        if due {
            self.reload();
            self.refreshed_at = Some(now);
        }
        due
    }

    pub fn time(&self) -> &str {
        &self.time
    }

    pub fn date(&self) -> &str {
        &self.date
    }
}
