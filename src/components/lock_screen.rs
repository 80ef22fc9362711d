use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use super::boot::centered_x;
use super::clock::Clock;
use crate::theme;
use crate::ui::UiFrame;

const HINT: &str = "Click or press Enter to sign in";

/// Sign-in screen shown after boot: clock, date and the user label.
#[derive(Debug, Clone)]
pub struct LockScreen {
    user: String,
}

impl LockScreen {
    pub fn new(user: impl Into<String>) -> Self {
        Self { user: user.into() }
    }

    /// Labels the screen with the machine's host name.
    pub fn from_host() -> Self {
        let user = match hostname::get() {
            Ok(name) => name.to_string_lossy().into_owned(),
            Err(err) => {
                tracing::debug!(%err, "hostname unavailable");
                "Guest".to_string()
            }
        };
        Self::new(user)
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    /// Draw the lock screen shifted `lift` rows upward; rows uncovered at the
    /// bottom are left to whatever was drawn underneath.
    pub fn render(&self, frame: &mut UiFrame<'_>, area: Rect, clock: &Clock, lift: u16) {
        let height = area.height.saturating_sub(lift);
        if height == 0 || area.width == 0 {
            return;
        }
        let visible = Rect { height, ..area };
        let style = Style::default().bg(theme::lock_bg()).fg(theme::lock_fg());
        frame.fill(visible, style);

        // Content is laid out against the full screen, then shifted up.
        let top = i32::from(area.y) - i32::from(lift);
        let third = i32::from(area.height) / 3;
        let lines: [(i32, &str, Style); 4] = [
            (third, clock.time(), style.add_modifier(Modifier::BOLD)),
            (third + 1, clock.date(), style),
            (third * 2, self.user.as_str(), style.add_modifier(Modifier::BOLD)),
            (third * 2 + 1, HINT, style.fg(theme::muted_fg())),
        ];
        for (offset, text, line_style) in lines {
            let y = top + offset;
            if y < i32::from(visible.y) || y >= i32::from(visible.y + visible.height) {
                continue;
            }
            frame.set_string(visible, centered_x(area, text), y as u16, text, line_style);
        }
    }
}
