//! Boot splash and sign-in sequencing.
//!
//! Booting (3.5 s) → Fading (0.5 s) → Locked, waiting for a click or key →
//! Unlocking (0.5 s slide) → Desktop.

use std::time::{Duration, Instant};

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use crate::constants::{BOOT_DURATION, BOOT_FADE_DURATION, LOCK_SLIDE_DURATION};
use crate::theme;
use crate::ui::UiFrame;

const SPINNER: [&str; 8] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧"];
const SPINNER_STEP: Duration = Duration::from_millis(120);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootPhase {
    Booting,
    Fading,
    Locked,
    Unlocking,
    Desktop,
}

#[derive(Debug, Clone, Copy)]
pub struct BootSequence {
    phase: BootPhase,
    started: Instant,
    phase_started: Instant,
}

impl BootSequence {
    pub fn new(now: Instant) -> Self {
        Self {
            phase: BootPhase::Booting,
            started: now,
            phase_started: now,
        }
    }

    /// Sequence that starts on the desktop.
    pub fn skipped(now: Instant) -> Self {
        Self {
            phase: BootPhase::Desktop,
            started: now,
            phase_started: now,
        }
    }

    pub fn phase(&self) -> BootPhase {
        self.phase
    }

    /// The desktop is interactive only once the lock screen is gone.
    pub fn is_desktop(&self) -> bool {
        self.phase == BootPhase::Desktop
    }

    fn phase_duration(phase: BootPhase) -> Option<Duration> {
        match phase {
            BootPhase::Booting => Some(BOOT_DURATION),
            BootPhase::Fading => Some(BOOT_FADE_DURATION),
            BootPhase::Unlocking => Some(LOCK_SLIDE_DURATION),
            BootPhase::Locked | BootPhase::Desktop => None,
        }
    }

    fn next_phase(phase: BootPhase) -> BootPhase {
        match phase {
            BootPhase::Booting => BootPhase::Fading,
            BootPhase::Fading => BootPhase::Locked,
            BootPhase::Unlocking => BootPhase::Desktop,
            other => other,
        }
    }

    /// Advance through every phase whose time is up. Returns whether the
    /// phase changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let before = self.phase;
        while let Some(len) = Self::phase_duration(self.phase) {
            let due = self.phase_started + len;
            if now < due {
                break;
            }
            self.phase = Self::next_phase(self.phase);
            self.phase_started = due;
            tracing::debug!(phase = ?self.phase, "boot phase");
        }
        self.phase != before
    }

    /// Start the slide-away. Only valid from the lock screen.
    pub fn unlock(&mut self, now: Instant) -> bool {
        if self.phase != BootPhase::Locked {
            return false;
        }
        self.phase = BootPhase::Unlocking;
        self.phase_started = now;
        tracing::debug!("unlocking");
        true
    }

    /// Fraction of the current timed phase that has elapsed, in `0.0..=1.0`.
    pub fn progress(&self, now: Instant) -> f32 {
        match Self::phase_duration(self.phase) {
            Some(len) if !len.is_zero() => {
                let elapsed = now.saturating_duration_since(self.phase_started);
                (elapsed.as_secs_f32() / len.as_secs_f32()).clamp(0.0, 1.0)
            }
            _ => 1.0,
        }
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        Self::phase_duration(self.phase).map(|len| self.phase_started + len)
    }

    pub fn render_splash(&self, frame: &mut UiFrame<'_>, area: Rect, now: Instant) {
        let mut style = Style::default().bg(theme::boot_bg()).fg(theme::boot_fg());
        if self.phase == BootPhase::Fading && self.progress(now) >= 0.5 {
            style = style.add_modifier(Modifier::DIM);
        }
        frame.fill(area, Style::default().bg(theme::boot_bg()));
        if area.height < 2 {
            return;
        }
        let logo = "◆ term-desk";
        let mid = area.y + area.height / 2;
        let x = centered_x(area, logo);
        frame.set_string(area, x, mid.saturating_sub(1), logo, style.add_modifier(Modifier::BOLD));

        let step = (now.saturating_duration_since(self.started).as_millis()
            / SPINNER_STEP.as_millis()) as usize;
        let spinner = SPINNER[step % SPINNER.len()];
        let x = centered_x(area, spinner);
        frame.set_string(area, x, mid.saturating_add(1), spinner, style);
    }
}

pub(crate) fn centered_x(area: Rect, text: &str) -> u16 {
    let width = text.chars().count() as u16;
    area.x + area.width.saturating_sub(width) / 2
}
