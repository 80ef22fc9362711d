use ratatui::prelude::Rect;
use ratatui::style::{Modifier, Style};

use super::geometry::CellRect;
use crate::theme;
use crate::ui::UiFrame;

/// Width in cells of each title-bar button.
const BUTTON_WIDTH: i32 = 3;
const BUTTONS: [(HeaderAction, &str); 3] = [
    (HeaderAction::Minimize, " _ "),
    (HeaderAction::Maximize, " □ "),
    (HeaderAction::Close, " × "),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderAction {
    None,
    Drag,
    Minimize,
    Maximize,
    Close,
}

/// How strongly the window chrome is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChromeEmphasis {
    Normal,
    /// Opening or closing transition in progress.
    Transient,
}

pub trait WindowDecorator: std::fmt::Debug {
    /// Area left for the application once the chrome is drawn.
    fn content_rect(&self, rect: CellRect) -> CellRect;

    fn hit_test(&self, rect: CellRect, column: u16, row: u16) -> HeaderAction;

    fn render_window(
        &self,
        frame: &mut UiFrame<'_>,
        rect: CellRect,
        title: &str,
        focused: bool,
        emphasis: ChromeEmphasis,
    );
}

/// Single-row title bar with minimize / maximize / close buttons on the
/// right and a thin border around the content.
#[derive(Debug, Default)]
pub struct DefaultDecorator;

impl DefaultDecorator {
    fn button_start(rect: CellRect) -> i32 {
        rect.x + rect.width - BUTTON_WIDTH * BUTTONS.len() as i32 - 1
    }
}

impl WindowDecorator for DefaultDecorator {
    fn content_rect(&self, rect: CellRect) -> CellRect {
        CellRect {
            x: rect.x + 1,
            y: rect.y + 1,
            width: (rect.width - 2).max(0),
            height: (rect.height - 2).max(0),
        }
    }

    fn hit_test(&self, rect: CellRect, column: u16, row: u16) -> HeaderAction {
        let (col, row) = (i32::from(column), i32::from(row));
        if row != rect.y || col < rect.x || col >= rect.x + rect.width {
            return HeaderAction::None;
        }
        let start = Self::button_start(rect);
        if col >= start && start > rect.x {
            let idx = ((col - start) / BUTTON_WIDTH) as usize;
            if let Some((action, _)) = BUTTONS.get(idx) {
                return *action;
            }
        }
        HeaderAction::Drag
    }

    fn render_window(
        &self,
        frame: &mut UiFrame<'_>,
        rect: CellRect,
        title: &str,
        focused: bool,
        emphasis: ChromeEmphasis,
    ) {
        let bounds = frame.area();
        let visible = rect.clip(bounds);
        if visible.width == 0 || visible.height == 0 {
            return;
        }

        let mut header_style = if focused {
            Style::default()
                .bg(theme::decorator_header_bg())
                .fg(theme::decorator_header_fg())
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .bg(theme::decorator_inactive_bg())
                .fg(theme::decorator_header_fg())
        };
        let mut border_style = Style::default().fg(theme::decorator_border());
        let body_style = Style::default()
            .bg(theme::window_bg())
            .fg(theme::window_fg());
        if emphasis == ChromeEmphasis::Transient {
            header_style = header_style.add_modifier(Modifier::DIM);
            border_style = border_style.add_modifier(Modifier::DIM);
        }

        let buffer = frame.buffer_mut();
        let right = rect.x + rect.width - 1;
        let bottom = rect.y + rect.height - 1;
        let mut put = |x: i32, y: i32, symbol: &str, style: Style| {
            if x < i32::from(visible.x)
                || y < i32::from(visible.y)
                || x >= i32::from(visible.x) + i32::from(visible.width)
                || y >= i32::from(visible.y) + i32::from(visible.height)
            {
                return;
            }
            if let Some(cell) = buffer.cell_mut((x as u16, y as u16)) {
                cell.set_symbol(symbol);
                cell.set_style(style);
            }
        };

        for y in rect.y..=bottom {
            for x in rect.x..=right {
                let (symbol, style) = if y == rect.y {
                    (" ", header_style)
                } else if y == bottom {
                    let s = if x == rect.x {
                        "└"
                    } else if x == right {
                        "┘"
                    } else {
                        "─"
                    };
                    (s, border_style)
                } else if x == rect.x || x == right {
                    ("│", border_style)
                } else {
                    (" ", body_style)
                };
                put(x, y, symbol, style);
            }
        }

        let start = Self::button_start(rect);
        let title_room = (start - rect.x - 2).max(0) as usize;
        for (idx, ch) in title.chars().take(title_room).enumerate() {
            put(rect.x + 1 + idx as i32, rect.y, &ch.to_string(), header_style);
        }
        if start > rect.x {
            for (idx, (action, label)) in BUTTONS.iter().enumerate() {
                let style = if *action == HeaderAction::Close && focused {
                    header_style.bg(theme::close_button_bg())
                } else {
                    header_style
                };
                let x0 = start + idx as i32 * BUTTON_WIDTH;
                for (offset, ch) in label.chars().enumerate() {
                    put(x0 + offset as i32, rect.y, &ch.to_string(), style);
                }
            }
        }
    }
}

/// Convenience for callers that only need the visible content area.
pub fn visible_content(decorator: &dyn WindowDecorator, rect: CellRect, bounds: Rect) -> Rect {
    decorator.content_rect(rect).clip(bounds)
}
