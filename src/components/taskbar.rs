use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use super::mouse_in;
use crate::apps::AppId;
use crate::theme;
use crate::ui::UiFrame;
use crate::window::TaskbarIconState;

const START_LABEL: &str = " ⊞ ";
const SEARCH_LABEL: &str = " ⌕ Search ";
const ICON_WIDTH: u16 = 4;

/// What a taskbar click landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskbarHit {
    Start,
    Search,
    App(AppId),
}

/// One application icon as the taskbar should show it this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskbarIcon {
    pub app: AppId,
    pub state: TaskbarIconState,
    pub focused: bool,
}

/// Bottom bar: start and search buttons, application icons and the clock.
///
/// Hit rectangles are recorded during `render` and cleared by
/// `begin_frame`, so clicks are always tested against what was last drawn.
#[derive(Debug, Default)]
pub struct Taskbar {
    area: Rect,
    start_rect: Option<Rect>,
    search_rect: Option<Rect>,
    icon_hits: Vec<(AppId, Rect)>,
}

impl Taskbar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_frame(&mut self) {
        self.start_rect = None;
        self.search_rect = None;
        self.icon_hits.clear();
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn contains(&self, column: u16, row: u16) -> bool {
        mouse_in(self.area, column, row)
    }

    /// True when the point is on the start or search button; clicks there
    /// never count as "outside" the start menu.
    pub fn is_menu_button(&self, column: u16, row: u16) -> bool {
        matches!(
            self.hit_test(column, row),
            Some(TaskbarHit::Start | TaskbarHit::Search)
        )
    }

    pub fn hit_test(&self, column: u16, row: u16) -> Option<TaskbarHit> {
        if self.start_rect.is_some_and(|r| mouse_in(r, column, row)) {
            return Some(TaskbarHit::Start);
        }
        if self.search_rect.is_some_and(|r| mouse_in(r, column, row)) {
            return Some(TaskbarHit::Search);
        }
        self.icon_hits
            .iter()
            .find(|(_, rect)| mouse_in(*rect, column, row))
            .map(|(app, _)| TaskbarHit::App(*app))
    }

    pub fn render(
        &mut self,
        frame: &mut UiFrame<'_>,
        area: Rect,
        icons: &[TaskbarIcon],
        menu_open: bool,
        clock: &str,
    ) {
        self.area = area;
        if area.width == 0 || area.height == 0 {
            return;
        }
        let base = Style::default().bg(theme::taskbar_bg()).fg(theme::taskbar_fg());
        frame.fill(area, base);
        let mid = area.y + area.height / 2;
        let max_x = area.x.saturating_add(area.width);
        let button_rect = |x: u16, width: u16| Rect {
            x,
            y: area.y,
            width: width.min(max_x.saturating_sub(x)),
            height: area.height,
        };

        let mut x = area.x;
        let start_width = START_LABEL.chars().count() as u16;
        let start_style = if menu_open {
            base.bg(theme::taskbar_active_bg()).fg(theme::accent())
        } else {
            base.fg(theme::accent())
        };
        let start = button_rect(x, start_width);
        frame.fill(start, start_style);
        frame.set_string(area, x, mid, START_LABEL, start_style.add_modifier(Modifier::BOLD));
        self.start_rect = Some(start);
        x = x.saturating_add(start_width + 1);

        let search_width = SEARCH_LABEL.chars().count() as u16;
        if x.saturating_add(search_width) <= max_x {
            let search = button_rect(x, search_width);
            let style = base.bg(theme::taskbar_active_bg());
            frame.fill(search, style);
            frame.set_string(area, x, mid, SEARCH_LABEL, style);
            self.search_rect = Some(search);
            x = x.saturating_add(search_width + 1);
        }

        let clock_width = clock.chars().count() as u16 + 2;
        let icons_end = max_x.saturating_sub(clock_width);
        for icon in icons {
            if x.saturating_add(ICON_WIDTH) > icons_end {
                break;
            }
            let rect = button_rect(x, ICON_WIDTH);
            let style = if icon.focused {
                base.bg(theme::taskbar_active_bg())
            } else {
                base
            };
            frame.fill(rect, style);
            let glyph_style = if icon.state.minimized {
                style.fg(theme::taskbar_minimized_fg())
            } else {
                style
            };
            frame.set_string(area, x + 1, mid, icon.app.glyph(), glyph_style);
            let bottom = area.y + area.height - 1;
            if bottom > mid {
                if icon.state.active {
                    frame.set_string(area, x, bottom, " ━━ ", style.fg(theme::taskbar_indicator()));
                } else if icon.state.minimized {
                    frame.set_string(area, x, bottom, " ── ", style.fg(theme::taskbar_minimized_fg()));
                }
            }
            self.icon_hits.push((icon.app, rect));
            x = x.saturating_add(ICON_WIDTH);
        }

        if area.width > clock_width {
            frame.set_string(area, max_x - clock_width + 1, mid, clock, base);
        }
    }
}
