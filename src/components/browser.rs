//! Simulated web browser: a search page and the project showcase.

use crossterm::event::{Event, KeyCode, KeyModifiers, MouseButton, MouseEventKind};
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use url::{Url, form_urlencoded};

use super::boot::centered_x;
use super::{AppPanel, Component, ComponentContext, PanelRequest, mouse_in};
use crate::content::{PROJECTS, Project};
use crate::error::Result;
use crate::theme;
use crate::ui::{UiFrame, truncate_to_width};

const SEARCH_ENDPOINT: &str = "https://www.google.com/search";
const PROJECTS_URL: &str = "localhost:3000/projects.html";
const CARD_HEIGHT: u16 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BrowserMode {
    #[default]
    NewTab,
    Projects,
}

/// Search URL for `query`. Spaces encode as `%20`, like a URI component.
pub fn search_url(query: &str) -> Result<Url> {
    let encoded: String = form_urlencoded::byte_serialize(query.as_bytes()).collect();
    // byte_serialize has already escaped literal '+' as %2B
    let url = Url::parse(&format!("{SEARCH_ENDPOINT}?q={}", encoded.replace('+', "%20")))?;
    Ok(url)
}

#[derive(Debug, Default)]
pub struct BrowserPanel {
    mode: BrowserMode,
    query: String,
    selected: usize,
    card_hits: Vec<(usize, Rect)>,
    requests: Vec<PanelRequest>,
}

impl BrowserPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> BrowserMode {
        self.mode
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn url_bar(&self) -> &'static str {
        match self.mode {
            BrowserMode::NewTab => "New Tab",
            BrowserMode::Projects => PROJECTS_URL,
        }
    }

    fn submit_search(&mut self) {
        if self.query.is_empty() {
            return;
        }
        match search_url(&self.query) {
            Ok(url) => self.requests.push(PanelRequest::OpenUrl(url.into())),
            Err(err) => tracing::warn!(%err, "could not build search url"),
        }
    }

    fn open_project(&mut self, index: usize) {
        if let Some(project) = PROJECTS.get(index) {
            self.selected = index;
            self.requests
                .push(PanelRequest::OpenUrl(project.link.to_string()));
        }
    }

    fn handle_new_tab_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        match code {
            KeyCode::Enter => {
                self.submit_search();
                true
            }
            KeyCode::Backspace => {
                self.query.pop();
                true
            }
            KeyCode::Esc => {
                self.query.clear();
                true
            }
            KeyCode::Char(c) if !modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
                self.query.push(c);
                true
            }
            _ => false,
        }
    }

    fn handle_projects_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
                true
            }
            KeyCode::Down => {
                self.selected = (self.selected + 1).min(PROJECTS.len().saturating_sub(1));
                true
            }
            KeyCode::Enter => {
                self.open_project(self.selected);
                true
            }
            _ => false,
        }
    }

    fn render_new_tab(&self, frame: &mut UiFrame<'_>, body: Rect, ctx: &ComponentContext) {
        let base = Style::default().bg(theme::window_bg()).fg(theme::window_fg());
        let top = body.y + body.height / 3;
        let logo = "Google";
        frame.set_string(body, centered_x(body, logo), top, logo, base.add_modifier(Modifier::BOLD));

        let box_width = body.width.saturating_sub(4).min(40);
        if box_width < 4 || top + 2 >= body.y + body.height {
            return;
        }
        let x = body.x + (body.width - box_width) / 2;
        let field = Rect {
            x,
            y: top + 2,
            width: box_width,
            height: 1,
        };
        let field_style = Style::default()
            .bg(theme::address_bar_bg())
            .fg(theme::address_bar_fg());
        frame.fill(field, field_style);
        let inner = box_width.saturating_sub(3) as usize;
        let text = if self.query.is_empty() {
            "Search Google or type a URL".to_string()
        } else {
            // keep the tail visible while typing
            let skip = self.query.chars().count().saturating_sub(inner);
            self.query.chars().skip(skip).collect()
        };
        let text_style = if self.query.is_empty() {
            field_style.fg(theme::muted_fg())
        } else {
            field_style
        };
        frame.set_string(field, x + 1, field.y, &truncate_to_width(&text, inner), text_style);
        if ctx.focused() && !self.query.is_empty() {
            let cursor_x = x + 1 + text.chars().count().min(inner) as u16;
            frame.set_string(field, cursor_x, field.y, "▏", field_style);
        }
    }

    fn render_projects(&mut self, frame: &mut UiFrame<'_>, body: Rect) {
        let base = Style::default().bg(theme::window_bg()).fg(theme::window_fg());
        let mut y = body.y;
        for (idx, Project { title, description, .. }) in PROJECTS.iter().enumerate() {
            if y + CARD_HEIGHT > body.y + body.height {
                break;
            }
            let card = Rect {
                x: body.x,
                y,
                width: body.width,
                height: CARD_HEIGHT,
            };
            let style = if idx == self.selected {
                Style::default()
                    .bg(theme::selection_bg())
                    .fg(theme::selection_fg())
            } else {
                base
            };
            frame.fill(Rect { height: 2, ..card }, style);
            frame.set_string(card, card.x + 1, y, title, style.add_modifier(Modifier::BOLD));
            frame.set_string(card, card.x + 1, y + 1, description, style.fg(theme::muted_fg()));
            self.card_hits.push((idx, card));
            y += CARD_HEIGHT;
        }
    }
}

impl Component for BrowserPanel {
    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext) {
        self.card_hits.clear();
        if area.width == 0 || area.height == 0 {
            return;
        }
        frame.fill(area, Style::default().bg(theme::window_bg()));
        let bar = Rect { height: 1, ..area };
        let bar_style = Style::default()
            .bg(theme::address_bar_bg())
            .fg(theme::address_bar_fg());
        frame.fill(bar, bar_style);
        let label = format!(" ← → ⟳  {}", self.url_bar());
        frame.set_string(bar, bar.x, bar.y, &label, bar_style);

        if area.height < 2 {
            return;
        }
        let body = Rect {
            y: area.y + 1,
            height: area.height - 1,
            ..area
        };
        match self.mode {
            BrowserMode::NewTab => self.render_new_tab(frame, body, ctx),
            BrowserMode::Projects => self.render_projects(frame, body),
        }
    }

    fn handle_event(&mut self, event: &Event, _ctx: &ComponentContext) -> bool {
        match event {
            Event::Key(key) => match self.mode {
                BrowserMode::NewTab => self.handle_new_tab_key(key.code, key.modifiers),
                BrowserMode::Projects => self.handle_projects_key(key.code),
            },
            Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                let hit = self
                    .card_hits
                    .iter()
                    .find(|(_, rect)| mouse_in(*rect, mouse.column, mouse.row))
                    .map(|(idx, _)| *idx);
                match hit {
                    Some(idx) => {
                        self.open_project(idx);
                        true
                    }
                    None => false,
                }
            }
            Event::Paste(text) if self.mode == BrowserMode::NewTab => {
                self.query.push_str(text.trim_end_matches(['\r', '\n']));
                true
            }
            _ => false,
        }
    }
}

impl AppPanel for BrowserPanel {
    fn init(&mut self, arg: Option<&str>) {
        self.mode = match arg {
            Some("projects") => BrowserMode::Projects,
            _ => BrowserMode::NewTab,
        };
        self.selected = 0;
        tracing::debug!(mode = ?self.mode, "browser initialized");
    }

    fn take_requests(&mut self) -> Vec<PanelRequest> {
        std::mem::take(&mut self.requests)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, MouseEvent};
    use ratatui::buffer::Buffer;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_text(panel: &mut BrowserPanel, text: &str) {
        for c in text.chars() {
            panel.handle_event(&key(KeyCode::Char(c)), &ComponentContext::default());
        }
    }

    #[test]
    fn search_url_encodes_like_a_uri_component() {
        let url = search_url("rust & ratatui").unwrap();
        assert_eq!(
            url.as_str(),
            "https://www.google.com/search?q=rust%20%26%20ratatui"
        );
        assert_eq!(
            search_url("c++ tips").unwrap().as_str(),
            "https://www.google.com/search?q=c%2B%2B%20tips"
        );
    }

    #[test]
    fn init_selects_mode_and_url_bar() {
        let mut panel = BrowserPanel::new();
        panel.init(Some("projects"));
        assert_eq!(panel.mode(), BrowserMode::Projects);
        assert_eq!(panel.url_bar(), "localhost:3000/projects.html");
        panel.init(Some("anything"));
        assert_eq!(panel.mode(), BrowserMode::NewTab);
        panel.init(None);
        assert_eq!(panel.url_bar(), "New Tab");
    }

    #[test]
    fn enter_submits_non_empty_query() {
        let mut panel = BrowserPanel::new();
        panel.init(None);
        let ctx = ComponentContext::default();
        panel.handle_event(&key(KeyCode::Enter), &ctx);
        assert!(panel.take_requests().is_empty());
        type_text(&mut panel, "cats");
        panel.handle_event(&key(KeyCode::Backspace), &ctx);
        assert_eq!(panel.query(), "cat");
        panel.handle_event(&key(KeyCode::Enter), &ctx);
        assert_eq!(
            panel.take_requests(),
            vec![PanelRequest::OpenUrl(
                "https://www.google.com/search?q=cat".to_string()
            )]
        );
        assert!(panel.take_requests().is_empty());
    }

    #[test]
    fn clicking_a_project_card_opens_its_link() {
        let mut panel = BrowserPanel::new();
        panel.init(Some("projects"));
        let area = Rect::new(0, 0, 40, 12);
        let mut buffer = Buffer::empty(area);
        let mut frame = UiFrame::from_parts(area, &mut buffer);
        panel.render(&mut frame, area, &ComponentContext::default());
        // second card starts at row 1 + CARD_HEIGHT
        let click = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 5,
            row: 1 + CARD_HEIGHT,
            modifiers: KeyModifiers::NONE,
        });
        assert!(panel.handle_event(&click, &ComponentContext::default()));
        assert_eq!(
            panel.take_requests(),
            vec![PanelRequest::OpenUrl(PROJECTS[1].link.to_string())]
        );
    }

    #[test]
    fn new_tab_renders_url_bar_and_placeholder() {
        let mut panel = BrowserPanel::new();
        panel.init(None);
        let area = Rect::new(0, 0, 50, 10);
        let mut buffer = Buffer::empty(area);
        let mut frame = UiFrame::from_parts(area, &mut buffer);
        panel.render(&mut frame, area, &ComponentContext::default());
        let top: String = (0..50)
            .map(|x| buffer.cell((x, 0)).unwrap().symbol().to_string())
            .collect();
        assert!(top.contains("New Tab"));
    }
}
