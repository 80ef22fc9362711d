use chrono::DateTime;
use crossterm::event::{Event, KeyCode, MouseEventKind};
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Paragraph;

use super::{AppPanel, Component, ComponentContext};
use crate::content::{ABOUT_ME, EmbeddedDocument};
use crate::theme;
use crate::ui::UiFrame;

const MENU: &str = " File  Edit  Format  View  Help";

/// Read-only text viewer for an embedded document.
pub struct NotepadPanel {
    document: &'static EmbeddedDocument,
    scroll: usize,
    view_height: usize,
}

impl std::fmt::Debug for NotepadPanel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotepadPanel")
            .field("document", &self.document.name)
            .field("scroll", &self.scroll)
            .finish()
    }
}

impl Default for NotepadPanel {
    fn default() -> Self {
        Self::new(&ABOUT_ME)
    }
}

impl NotepadPanel {
    pub fn new(document: &'static EmbeddedDocument) -> Self {
        Self {
            document,
            scroll: 0,
            view_height: 0,
        }
    }

    pub fn scroll(&self) -> usize {
        self.scroll
    }

    fn line_count(&self) -> usize {
        self.document.content.lines().count()
    }

    fn max_scroll(&self) -> usize {
        self.line_count().saturating_sub(self.view_height.max(1))
    }

    pub fn scroll_by(&mut self, delta: isize) {
        self.scroll = self.scroll.saturating_add_signed(delta).min(self.max_scroll());
    }

    /// `Last saved` stamp derived from the document's modification time.
    pub fn saved_label(&self) -> Option<String> {
        let parsed = DateTime::parse_from_rfc3339(self.document.modified_rfc3339).ok()?;
        Some(format!("Last saved {}", parsed.format("%b %-d, %Y")))
    }
}

impl Component for NotepadPanel {
    fn resize(&mut self, area: Rect, _ctx: &ComponentContext) {
        // menu row and status row
        self.view_height = area.height.saturating_sub(2) as usize;
        self.scroll = self.scroll.min(self.max_scroll());
    }

    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        self.resize(area, ctx);
        let base = Style::default().bg(theme::window_bg()).fg(theme::window_fg());
        frame.fill(area, base);
        let menu_style = Style::default()
            .bg(theme::address_bar_bg())
            .fg(theme::address_bar_fg());
        frame.fill(Rect { height: 1, ..area }, menu_style);
        frame.set_string(area, area.x, area.y, MENU, menu_style);

        let body = Rect {
            x: area.x + 1,
            y: area.y + 1,
            width: area.width.saturating_sub(1),
            height: self.view_height as u16,
        };
        let scroll = u16::try_from(self.scroll).unwrap_or(u16::MAX);
        frame.render_widget(
            Paragraph::new(self.document.content)
                .style(base)
                .scroll((scroll, 0)),
            body,
        );

        if area.height >= 2 {
            let status = match self.saved_label() {
                Some(saved) => format!("{}  ·  {}", self.document.name, saved),
                None => self.document.name.to_string(),
            };
            let y = area.y + area.height - 1;
            frame.set_string(area, area.x + 1, y, &status, base.fg(theme::muted_fg()));
        }
    }

    fn handle_event(&mut self, event: &Event, _ctx: &ComponentContext) -> bool {
        let page = self.view_height.max(1) as isize;
        match event {
            Event::Key(key) => match key.code {
                KeyCode::Up => self.scroll_by(-1),
                KeyCode::Down => self.scroll_by(1),
                KeyCode::PageUp => self.scroll_by(-page),
                KeyCode::PageDown => self.scroll_by(page),
                KeyCode::Home => self.scroll = 0,
                KeyCode::End => self.scroll = self.max_scroll(),
                _ => return false,
            },
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::ScrollUp => self.scroll_by(-3),
                MouseEventKind::ScrollDown => self.scroll_by(3),
                _ => return false,
            },
            _ => return false,
        }
        true
    }
}

impl AppPanel for NotepadPanel {
    fn init(&mut self, _arg: Option<&str>) {
        self.scroll = 0;
    }
}
