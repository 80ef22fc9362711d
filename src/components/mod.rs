use crossterm::event::Event;
use ratatui::layout::Rect;

use crate::apps::AppId;
use crate::ui::UiFrame;

pub mod boot;
pub mod browser;
pub mod clock;
pub mod explorer;
pub mod lock_screen;
pub mod notepad;
pub mod start_menu;
pub mod taskbar;

pub use boot::{BootPhase, BootSequence};
pub use browser::{BrowserMode, BrowserPanel};
pub use clock::{Clock, FixedTime, SystemClock, TimeSource};
pub use explorer::ExplorerPanel;
pub use lock_screen::LockScreen;
pub use notepad::NotepadPanel;
pub use start_menu::StartMenu;
pub use taskbar::{Taskbar, TaskbarHit, TaskbarIcon};

pub use crate::component_context::ComponentContext;

pub trait Component {
    fn resize(&mut self, _area: Rect, _ctx: &ComponentContext) {}

    fn render(&mut self, frame: &mut UiFrame<'_>, area: Rect, ctx: &ComponentContext);

    fn handle_event(&mut self, _event: &Event, _ctx: &ComponentContext) -> bool {
        false
    }
}

/// Something an application asks the shell to do on its behalf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelRequest {
    /// Hand a URL to the host browser.
    OpenUrl(String),
    /// Open another application window.
    Launch { app: AppId, arg: Option<String> },
}

/// The content of an application window.
pub trait AppPanel: Component {
    /// Application-specific initialization, run each time the window opens.
    fn init(&mut self, arg: Option<&str>);

    /// Drain requests raised since the last call.
    fn take_requests(&mut self) -> Vec<PanelRequest> {
        Vec::new()
    }
}

/// Whether the mouse event lands inside `area`.
pub(crate) fn mouse_in(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x
        && column < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::UiFrame;
    use crossterm::event::Event;
    use ratatui::prelude::Rect;

    struct DummyComp;
    impl Component for DummyComp {
        fn render(&mut self, _frame: &mut UiFrame<'_>, _area: Rect, _ctx: &ComponentContext) {}
    }

    #[test]
    fn default_handle_event_returns_false() {
        let mut d = DummyComp;
        assert!(!d.handle_event(
            &Event::Key(crossterm::event::KeyEvent::new(
                crossterm::event::KeyCode::Char('a'),
                crossterm::event::KeyModifiers::NONE
            )),
            &ComponentContext::default()
        ));
    }

    #[test]
    fn mouse_in_is_half_open() {
        let area = Rect::new(2, 2, 3, 2);
        assert!(mouse_in(area, 2, 2));
        assert!(mouse_in(area, 4, 3));
        assert!(!mouse_in(area, 5, 3));
        assert!(!mouse_in(area, 4, 4));
    }
}
