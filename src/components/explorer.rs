//! File explorer over the built-in virtual file system.

use std::time::Instant;

use crossterm::event::{Event, KeyCode, MouseButton, MouseEventKind};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{List, ListItem, ListState};

use super::{AppPanel, Component, ComponentContext, PanelRequest, mouse_in};
use crate::constants::DOUBLE_CLICK_WINDOW;
use crate::content::{EntryKind, FsEntry, ROOT_FOLDER, list_folder, parent_of};
use crate::theme;
use crate::ui::UiFrame;

const UP_LABEL: &str = " ↑ ";

#[derive(Debug)]
pub struct ExplorerPanel {
    folder: String,
    selected: usize,
    last_click: Option<(usize, Instant)>,
    up_rect: Option<Rect>,
    item_hits: Vec<(usize, Rect)>,
    list_state: ListState,
    requests: Vec<PanelRequest>,
}

impl Default for ExplorerPanel {
    fn default() -> Self {
        Self {
            folder: ROOT_FOLDER.to_string(),
            selected: 0,
            last_click: None,
            up_rect: None,
            item_hits: Vec::new(),
            list_state: ListState::default(),
            requests: Vec::new(),
        }
    }
}

impl ExplorerPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn folder(&self) -> &str {
        &self.folder
    }

    pub fn entries(&self) -> &'static [FsEntry] {
        list_folder(&self.folder)
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn navigate(&mut self, folder: &str) {
        self.folder = folder.to_string();
        self.selected = 0;
        self.last_click = None;
        self.list_state = ListState::default();
        tracing::debug!(folder, "explorer navigated");
    }

    /// Go to the parent folder. Returns false at the top.
    pub fn go_up(&mut self) -> bool {
        match parent_of(&self.folder) {
            Some(parent) => {
                self.navigate(parent);
                true
            }
            None => false,
        }
    }

    /// Open the entry at `index`: descend into drives and folders, launch
    /// the owning application for files.
    pub fn activate(&mut self, index: usize) {
        let Some(entry) = self.entries().get(index).copied() else {
            return;
        };
        match entry.kind {
            EntryKind::Drive | EntryKind::Folder => self.navigate(entry.name),
            EntryKind::File { app, arg } => {
                self.requests.push(PanelRequest::Launch {
                    app,
                    arg: arg.map(str::to_string),
                });
            }
        }
    }

    /// Single click selects; a second click on the same entry within the
    /// double-click window activates it.
    pub fn click(&mut self, index: usize, now: Instant) {
        if index >= self.entries().len() {
            return;
        }
        let double = self.last_click.is_some_and(|(prev, at)| {
            prev == index && now.saturating_duration_since(at) <= DOUBLE_CLICK_WINDOW
        });
        self.selected = index;
        if double {
            self.last_click = None;
            self.activate(index);
        } else {
            self.last_click = Some((index, now));
        }
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.entries().len();
        if len == 0 {
            self.selected = 0;
            return;
        }
        self.selected = self.selected.saturating_add_signed(delta).min(len - 1);
    }
}

impl Component for ExplorerPanel {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext) {
        self.up_rect = None;
        self.item_hits.clear();
        if area.width == 0 || area.height == 0 {
            return;
        }
        let base = Style::default().bg(theme::window_bg()).fg(theme::window_fg());
        frame.fill(area, base);

        let bar = Rect { height: 1, ..area };
        let bar_style = Style::default()
            .bg(theme::address_bar_bg())
            .fg(theme::address_bar_fg());
        frame.fill(bar, bar_style);
        let up_width = UP_LABEL.chars().count() as u16;
        let up_style = if parent_of(&self.folder).is_some() {
            bar_style.add_modifier(Modifier::BOLD)
        } else {
            bar_style.fg(theme::muted_fg())
        };
        frame.set_string(bar, bar.x, bar.y, UP_LABEL, up_style);
        self.up_rect = Some(Rect {
            width: up_width.min(bar.width),
            ..bar
        });
        let path = format!("│ {}", self.folder);
        frame.set_string(bar, bar.x + up_width, bar.y, &path, bar_style);

        let entries = self.entries();
        let list_area = Rect {
            y: area.y + 1,
            height: area.height.saturating_sub(2),
            ..area
        };
        let list_bottom = list_area.y + list_area.height;
        let highlight = if ctx.focused() {
            Style::default()
                .bg(theme::selection_bg())
                .fg(theme::selection_fg())
        } else {
            base.add_modifier(Modifier::REVERSED)
        };
        let items: Vec<ListItem> = entries
            .iter()
            .map(|entry| ListItem::new(format!(" {} {}", entry.glyph(), entry.name)))
            .collect();
        self.list_state
            .select((!entries.is_empty()).then_some(self.selected));
        frame.render_stateful_widget(
            List::new(items).style(base).highlight_style(highlight),
            list_area,
            &mut self.list_state,
        );
        let offset = self.list_state.offset();
        for (row, idx) in (offset..entries.len())
            .enumerate()
            .take(usize::from(list_area.height))
        {
            let rect = Rect {
                y: list_area.y + row as u16,
                height: 1,
                ..list_area
            };
            self.item_hits.push((idx, rect));
        }

        if area.height >= 3 {
            let status = match entries.len() {
                1 => "1 item".to_string(),
                n => format!("{n} items"),
            };
            frame.set_string(area, area.x + 1, list_bottom, &status, base.fg(theme::muted_fg()));
        }
    }

    fn handle_event(&mut self, event: &Event, ctx: &ComponentContext) -> bool {
        match event {
            Event::Key(key) => match key.code {
                KeyCode::Up => {
                    self.move_selection(-1);
                    true
                }
                KeyCode::Down => {
                    self.move_selection(1);
                    true
                }
                KeyCode::Enter => {
                    self.activate(self.selected);
                    true
                }
                KeyCode::Backspace | KeyCode::Left => {
                    self.go_up();
                    true
                }
                _ => false,
            },
            Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                if self
                    .up_rect
                    .is_some_and(|r| mouse_in(r, mouse.column, mouse.row))
                {
                    self.go_up();
                    return true;
                }
                let hit = self
                    .item_hits
                    .iter()
                    .find(|(_, rect)| mouse_in(*rect, mouse.column, mouse.row))
                    .map(|(idx, _)| *idx);
                match hit {
                    Some(idx) => {
                        self.click(idx, ctx.now());
                        true
                    }
                    None => false,
                }
            }
            _ => false,
        }
    }
}

impl AppPanel for ExplorerPanel {
    fn init(&mut self, arg: Option<&str>) {
        self.navigate(arg.unwrap_or(ROOT_FOLDER));
    }

    fn take_requests(&mut self) -> Vec<PanelRequest> {
        std::mem::take(&mut self.requests)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apps::AppId;
    use crossterm::event::{KeyModifiers, MouseEvent};
    use ratatui::buffer::Buffer;
    use std::time::Duration;

    fn left_click(column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn render(panel: &mut ExplorerPanel) {
        let area = Rect::new(0, 0, 40, 8);
        let mut buffer = Buffer::empty(area);
        let mut frame = UiFrame::from_parts(area, &mut buffer);
        panel.render(&mut frame, area, &ComponentContext::new(true));
    }

    #[test]
    fn init_defaults_to_this_pc() {
        let mut panel = ExplorerPanel::new();
        panel.init(Some("Projects"));
        assert_eq!(panel.folder(), "Projects");
        panel.init(None);
        assert_eq!(panel.folder(), "This PC");
    }

    #[test]
    fn unknown_folder_is_empty() {
        let mut panel = ExplorerPanel::new();
        panel.init(Some("Nowhere"));
        assert!(panel.entries().is_empty());
        panel.activate(0);
        assert!(panel.take_requests().is_empty());
        assert!(!panel.go_up());
    }

    #[test]
    fn double_click_descends_and_launches() {
        let t0 = Instant::now();
        let mut panel = ExplorerPanel::new();
        panel.init(None);
        panel.click(0, t0);
        assert_eq!(panel.folder(), "This PC");
        panel.click(0, t0 + Duration::from_millis(200));
        assert_eq!(panel.folder(), "Local Disk (C:)");
        panel.click(1, t0 + Duration::from_secs(1));
        panel.click(1, t0 + Duration::from_millis(1100));
        assert_eq!(panel.folder(), "Projects");
        panel.click(0, t0 + Duration::from_secs(2));
        panel.click(0, t0 + Duration::from_millis(2100));
        assert_eq!(
            panel.take_requests(),
            vec![PanelRequest::Launch {
                app: AppId::Chrome,
                arg: Some("projects".to_string())
            }]
        );
    }

    #[test]
    fn slow_clicks_only_select() {
        let t0 = Instant::now();
        let mut panel = ExplorerPanel::new();
        panel.init(Some("Local Disk (C:)"));
        panel.click(1, t0);
        panel.click(1, t0 + Duration::from_millis(800));
        assert_eq!(panel.folder(), "Local Disk (C:)");
        assert_eq!(panel.selected(), 1);
    }

    #[test]
    fn up_button_and_mouse_rows() {
        let t0 = Instant::now();
        let mut panel = ExplorerPanel::new();
        panel.init(Some("About Me"));
        render(&mut panel);
        let ctx = ComponentContext::new(true).with_now(t0);
        assert!(panel.handle_event(&left_click(1, 0), &ctx));
        assert_eq!(panel.folder(), "Local Disk (C:)");

        render(&mut panel);
        // row 1 is "About Me"
        panel.handle_event(&left_click(5, 1), &ctx);
        panel.handle_event(&left_click(5, 1), &ctx.with_now(t0 + Duration::from_millis(100)));
        assert_eq!(panel.folder(), "About Me");
        panel.handle_event(&Event::Key(crossterm::event::KeyEvent::new(
            KeyCode::Enter,
            KeyModifiers::NONE,
        )), &ctx);
        assert_eq!(
            panel.take_requests(),
            vec![PanelRequest::Launch {
                app: AppId::Notepad,
                arg: None
            }]
        );
    }
}
