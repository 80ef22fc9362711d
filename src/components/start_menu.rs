use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use super::mouse_in;
use crate::apps::AppId;
use crate::theme;
use crate::ui::UiFrame;

const MENU_WIDTH: u16 = 26;
const HEADER: &str = "Pinned";

/// Application launcher that pops up above the start button.
#[derive(Debug, Default)]
pub struct StartMenu {
    rect: Option<Rect>,
    item_hits: Vec<(AppId, Rect)>,
}

impl StartMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_frame(&mut self) {
        self.rect = None;
        self.item_hits.clear();
    }

    /// Items in display order.
    pub fn items() -> &'static [AppId] {
        &AppId::ALL
    }

    pub fn contains(&self, column: u16, row: u16) -> bool {
        self.rect.is_some_and(|r| mouse_in(r, column, row))
    }

    pub fn hit_test(&self, column: u16, row: u16) -> Option<AppId> {
        self.item_hits
            .iter()
            .find(|(_, rect)| mouse_in(*rect, column, row))
            .map(|(app, _)| *app)
    }

    /// Draw the menu anchored to the bottom-left corner of `desktop` (the
    /// area above the taskbar).
    pub fn render(&mut self, frame: &mut UiFrame<'_>, desktop: Rect, selected: usize, user: &str) {
        let items = Self::items();
        let height = (items.len() as u16 + 4).min(desktop.height);
        let width = MENU_WIDTH.min(desktop.width);
        if height < 3 || width < 4 {
            return;
        }
        let rect = Rect {
            x: desktop.x,
            y: desktop.y + desktop.height - height,
            width,
            height,
        };
        let base = Style::default().bg(theme::menu_bg()).fg(theme::menu_fg());
        frame.fill(rect, base);
        self.rect = Some(rect);

        frame.set_string(rect, rect.x + 2, rect.y, HEADER, base.add_modifier(Modifier::BOLD));
        for (idx, app) in items.iter().enumerate() {
            let y = rect.y + 2 + idx as u16;
            if y >= rect.y + rect.height - 1 {
                break;
            }
            let row = Rect {
                x: rect.x,
                y,
                width: rect.width,
                height: 1,
            };
            let style = if idx == selected {
                Style::default()
                    .bg(theme::menu_selected_bg())
                    .fg(theme::menu_selected_fg())
            } else {
                base
            };
            frame.fill(row, style);
            let label = format!("{}{}", app.glyph(), app.label());
            frame.set_string(row, row.x + 2, y, &label, style);
            self.item_hits.push((*app, row));
        }
        let footer_y = rect.y + rect.height - 1;
        frame.set_string(rect, rect.x + 2, footer_y, user, base.fg(theme::muted_fg()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::buffer::Buffer;

    #[test]
    fn items_are_hit_testable_after_render() {
        let area = Rect::new(0, 0, 40, 20);
        let mut buffer = Buffer::empty(area);
        let mut frame = UiFrame::from_parts(area, &mut buffer);
        let mut menu = StartMenu::new();
        menu.render(&mut frame, Rect::new(0, 0, 40, 17), 0, "host");
        // menu is 7 rows tall, anchored at the bottom: rows 10..17
        assert!(menu.contains(0, 10));
        assert!(!menu.contains(0, 9));
        assert_eq!(menu.hit_test(3, 12), Some(AppId::ALL[0]));
        assert_eq!(menu.hit_test(3, 14), Some(AppId::ALL[2]));
        assert_eq!(menu.hit_test(3, 10), None);
        menu.begin_frame();
        assert!(!menu.contains(0, 10));
    }
}
