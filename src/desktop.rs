//! The desktop shell: owns the window manager and every on-screen surface,
//! routes input to them and paints a frame.

use std::time::Instant;

use crossterm::event::{Event, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use ratatui::style::Style;

use crate::actions::Action;
use crate::apps::AppId;
use crate::components::{
    AppPanel, BootPhase, BootSequence, BrowserPanel, Clock, ComponentContext,
    ExplorerPanel, LockScreen, NotepadPanel, PanelRequest, StartMenu, Taskbar, TaskbarHit,
    TaskbarIcon,
};
use crate::config::DesktopConfig;
use crate::constants::{CELL_HEIGHT_PX, CELL_WIDTH_PX};
use crate::host::{LinkOpener, SystemBrowser};
use crate::keybindings::KeyBindings;
use crate::state::AppState;
use crate::theme;
use crate::ui::UiFrame;
use crate::window::decorator::visible_content;
use crate::window::{
    ChromeEmphasis, DefaultDecorator, DragController, GeometryProvider, HeaderAction, Point,
    WindowDecorator, WindowManager, WindowVisual, WmEvent, cell_to_point, px_rect_to_cells,
};

/// Upper bound on event/request feedback rounds per update. Each round is
/// triggered by a panel launching another application.
const MAX_DISPATCH_ROUNDS: usize = 4;

pub struct Desktop {
    wm: WindowManager<AppId>,
    drag: DragController<AppId>,
    decorator: Box<dyn WindowDecorator>,
    notepad: NotepadPanel,
    explorer: ExplorerPanel,
    browser: BrowserPanel,
    taskbar: Taskbar,
    start_menu: StartMenu,
    lock: LockScreen,
    clock: Clock,
    boot: BootSequence,
    state: AppState,
    keys: KeyBindings,
    opener: Box<dyn LinkOpener>,
    pending_open: Option<AppId>,
}

impl Desktop {
    pub fn new(config: &DesktopConfig, geometry: impl GeometryProvider + 'static, now: Instant) -> Self {
        let wm = WindowManager::with_windows(
            geometry,
            AppId::ALL.map(|app| (app, app.default_size())),
        );
        let boot = if config.skip_boot {
            BootSequence::skipped(now)
        } else {
            BootSequence::new(now)
        };
        let mut desktop = Self {
            wm,
            drag: DragController::new(),
            decorator: Box::new(DefaultDecorator),
            notepad: NotepadPanel::default(),
            explorer: ExplorerPanel::new(),
            browser: BrowserPanel::new(),
            taskbar: Taskbar::new(),
            start_menu: StartMenu::new(),
            lock: LockScreen::from_host(),
            clock: Clock::system(),
            boot,
            state: AppState::new(),
            keys: KeyBindings::default(),
            opener: Box::new(SystemBrowser),
            pending_open: config.initial_app,
        };
        desktop.open_pending(now);
        desktop
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_lock_screen(mut self, lock: LockScreen) -> Self {
        self.lock = lock;
        self
    }

    pub fn with_link_opener(mut self, opener: impl LinkOpener + 'static) -> Self {
        self.opener = Box::new(opener);
        self
    }

    pub fn wm(&self) -> &WindowManager<AppId> {
        &self.wm
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn boot_phase(&self) -> BootPhase {
        self.boot.phase()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    pub fn explorer(&self) -> &ExplorerPanel {
        &self.explorer
    }

    pub fn browser(&self) -> &BrowserPanel {
        &self.browser
    }

    pub fn notepad(&self) -> &NotepadPanel {
        &self.notepad
    }

    pub fn should_quit(&self) -> bool {
        self.state.quit_requested()
    }

    /// Earliest instant at which a timer (boot phase or window transition)
    /// needs servicing.
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.boot.next_deadline(), self.wm.next_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Open an application from outside the shell (e.g. at startup). Waits
    /// for the desktop to be shown if it is not yet.
    pub fn launch(&mut self, app: AppId, now: Instant) {
        self.pending_open = Some(app);
        self.open_pending(now);
    }

    fn open_pending(&mut self, now: Instant) {
        if !self.boot.is_desktop() {
            return;
        }
        if let Some(app) = self.pending_open.take() {
            self.wm.open_at(app, None, now);
            self.dispatch(now);
        }
    }

    fn panel_mut(&mut self, app: AppId) -> &mut dyn AppPanel {
        match app {
            AppId::Notepad => &mut self.notepad,
            AppId::Explorer => &mut self.explorer,
            AppId::Chrome => &mut self.browser,
        }
    }

    /// Advance timers: boot phases, window transitions and the clock.
    pub fn tick(&mut self, now: Instant) {
        if self.boot.tick(now) && self.boot.is_desktop() {
            self.open_pending(now);
        }
        self.clock.refresh(now);
        self.wm.tick(now);
        self.dispatch(now);
    }

    /// Apply window-manager intents and panel requests until both queues
    /// are empty.
    fn dispatch(&mut self, now: Instant) {
        for _ in 0..MAX_DISPATCH_ROUNDS {
            let events = self.wm.take_events();
            let mut requests = Vec::new();
            for event in &events {
                match event {
                    WmEvent::InitApp { id, arg } => self.panel_mut(*id).init(arg.as_deref()),
                    WmEvent::DismissStartMenu => self.state.set_start_menu_visible(false),
                    other => tracing::trace!(event = ?other, "wm event"),
                }
            }
            for app in AppId::ALL {
                requests.extend(self.panel_mut(app).take_requests());
            }
            if events.is_empty() && requests.is_empty() {
                return;
            }
            for request in requests {
                match request {
                    PanelRequest::OpenUrl(url) => {
                        tracing::debug!(%url, "opening link");
                        if let Err(err) = self.opener.open(&url) {
                            tracing::warn!(%err, "host browser unavailable");
                        }
                    }
                    PanelRequest::Launch { app, arg } => self.wm.open_at(app, arg.as_deref(), now),
                }
            }
        }
    }

    /// Route one input event. Returns whether anything consumed it.
    pub fn handle_event(&mut self, event: &Event, now: Instant) -> bool {
        if let Event::Key(key) = event
            && key.kind != KeyEventKind::Release
            && self.keys.matches(Action::Quit, key)
        {
            self.state.request_quit();
            return true;
        }
        let handled = match self.boot.phase() {
            BootPhase::Booting | BootPhase::Fading | BootPhase::Unlocking => false,
            BootPhase::Locked => self.handle_locked(event, now),
            BootPhase::Desktop => match event {
                Event::Key(key) if key.kind != KeyEventKind::Release => self.handle_key(key, now),
                Event::Mouse(mouse) => self.handle_mouse(event, mouse, now),
                Event::Paste(_) => self.forward_to_focused(event, now),
                _ => false,
            },
        };
        self.dispatch(now);
        handled
    }

    fn handle_locked(&mut self, event: &Event, now: Instant) -> bool {
        let unlock = match event {
            Event::Key(key) => self.keys.matches(Action::Unlock, key),
            Event::Mouse(mouse) => matches!(mouse.kind, MouseEventKind::Down(_)),
            _ => false,
        };
        unlock && self.boot.unlock(now)
    }

    fn handle_key(&mut self, key: &KeyEvent, now: Instant) -> bool {
        if self.keys.matches(Action::ToggleStartMenu, key) {
            self.state.toggle_start_menu();
            return true;
        }
        if self.state.start_menu_visible() {
            let items = StartMenu::items();
            if self.keys.matches(Action::CloseStartMenu, key) {
                self.state.set_start_menu_visible(false);
                return true;
            }
            if self.keys.matches(Action::MenuUp, key) {
                self.state.move_menu_selection(-1, items.len());
                return true;
            }
            if self.keys.matches(Action::MenuDown, key) {
                self.state.move_menu_selection(1, items.len());
                return true;
            }
            if self.keys.matches(Action::MenuSelect, key) {
                if let Some(app) = items.get(self.state.menu_selected()) {
                    self.wm.open_at(*app, None, now);
                }
                return true;
            }
        }
        self.forward_to_focused(&Event::Key(*key), now)
    }

    fn forward_to_focused(&mut self, event: &Event, now: Instant) -> bool {
        let Some(focused) = self.wm.focused() else {
            return false;
        };
        let ctx = ComponentContext::new(true).with_now(now);
        self.panel_mut(focused).handle_event(event, &ctx)
    }

    /// Center of the terminal cell, in virtual pixels.
    fn pointer(mouse: &MouseEvent) -> Point {
        cell_to_point(mouse.column, mouse.row) + Point::new(CELL_WIDTH_PX / 2, CELL_HEIGHT_PX / 2)
    }

    fn handle_mouse(&mut self, event: &Event, mouse: &MouseEvent, now: Instant) -> bool {
        let pointer = Self::pointer(mouse);
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.handle_press(event, mouse, now),
            MouseEventKind::Drag(MouseButton::Left) => {
                self.drag.drag_to(&mut self.wm, pointer).is_some()
            }
            MouseEventKind::Up(MouseButton::Left) => self.drag.release(),
            MouseEventKind::ScrollUp | MouseEventKind::ScrollDown => {
                let Some(id) = self.wm.hit_test(pointer) else {
                    return false;
                };
                let ctx = ComponentContext::new(self.wm.focused() == Some(id)).with_now(now);
                self.panel_mut(id).handle_event(event, &ctx)
            }
            _ => false,
        }
    }

    fn handle_press(&mut self, event: &Event, mouse: &MouseEvent, now: Instant) -> bool {
        let (column, row) = (mouse.column, mouse.row);
        if self.state.start_menu_visible() {
            if let Some(app) = self.start_menu.hit_test(column, row) {
                self.wm.open_at(app, None, now);
                return true;
            }
            if !self.start_menu.contains(column, row) && !self.taskbar.is_menu_button(column, row) {
                self.state.set_start_menu_visible(false);
            }
        }

        if self.taskbar.contains(column, row) {
            match self.taskbar.hit_test(column, row) {
                Some(TaskbarHit::Start | TaskbarHit::Search) => self.state.toggle_start_menu(),
                Some(TaskbarHit::App(app)) => self.wm.toggle_at(app, now),
                None => {}
            }
            return true;
        }
        if self.start_menu.contains(column, row) {
            return true;
        }

        let pointer = Self::pointer(mouse);
        let Some(id) = self.wm.hit_test(pointer) else {
            return false;
        };
        let rect = match self.wm.frame_of(id) {
            Some(frame) => px_rect_to_cells(frame),
            None => return false,
        };
        match self.decorator.hit_test(rect, column, row) {
            HeaderAction::Minimize => {
                self.wm.bring_to_front(id);
                self.wm.minimize(id);
            }
            HeaderAction::Maximize => {
                self.wm.bring_to_front(id);
                self.wm.maximize(id);
            }
            HeaderAction::Close => {
                self.wm.bring_to_front(id);
                self.wm.close_at(id, now);
            }
            HeaderAction::Drag => {
                self.drag.press(&mut self.wm, pointer);
            }
            HeaderAction::None => {
                self.drag.press(&mut self.wm, pointer);
                let ctx = ComponentContext::new(true).with_now(now);
                self.panel_mut(id).handle_event(event, &ctx);
            }
        }
        true
    }

    /// Paint the whole screen for the current phase.
    pub fn render(&mut self, frame: &mut UiFrame<'_>, now: Instant) {
        let area = frame.area();
        self.taskbar.begin_frame();
        self.start_menu.begin_frame();
        match self.boot.phase() {
            BootPhase::Booting | BootPhase::Fading => self.boot.render_splash(frame, area, now),
            BootPhase::Locked => self.lock.render(frame, area, &self.clock, 0),
            BootPhase::Unlocking => {
                self.render_desktop(frame, area, now);
                let lift = (f32::from(area.height) * self.boot.progress(now)).round() as u16;
                self.lock.render(frame, area, &self.clock, lift);
            }
            BootPhase::Desktop => self.render_desktop(frame, area, now),
        }
    }

    fn taskbar_rows(&self, area: Rect) -> u16 {
        let rows = self.wm.geometry().taskbar_height() / CELL_HEIGHT_PX;
        u16::try_from(rows.max(1)).unwrap_or(1).min(area.height)
    }

    fn render_desktop(&mut self, frame: &mut UiFrame<'_>, area: Rect, now: Instant) {
        let taskbar_rows = self.taskbar_rows(area);
        let desk = Rect {
            height: area.height - taskbar_rows,
            ..area
        };
        let bar = Rect {
            y: area.y + desk.height,
            height: taskbar_rows,
            ..area
        };
        frame.fill(desk, Style::default().bg(theme::desktop_bg()));

        for draw in self.wm.draw_list() {
            let rect = px_rect_to_cells(draw.frame);
            let emphasis = match draw.visual {
                WindowVisual::Opening | WindowVisual::Closing { .. } => ChromeEmphasis::Transient,
                WindowVisual::Shown | WindowVisual::Hidden => ChromeEmphasis::Normal,
            };
            self.decorator
                .render_window(frame, rect, draw.id.title(), draw.focused, emphasis);
            if matches!(draw.visual, WindowVisual::Closing { .. }) {
                continue;
            }
            let content = visible_content(self.decorator.as_ref(), rect, desk);
            if content.width == 0 || content.height == 0 {
                continue;
            }
            let ctx = ComponentContext::new(draw.focused).with_now(now);
            self.panel_mut(draw.id).render(frame, content, &ctx);
        }

        let focused = self.wm.focused();
        let icons: Vec<TaskbarIcon> = AppId::ALL
            .iter()
            .map(|&app| TaskbarIcon {
                app,
                state: self.wm.icon_state(app),
                focused: focused == Some(app),
            })
            .collect();
        let menu_open = self.state.start_menu_visible();
        self.taskbar
            .render(frame, bar, &icons, menu_open, self.clock.time());
        if menu_open {
            self.start_menu
                .render(frame, desk, self.state.menu_selected(), self.lock.user());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::RecordingOpener;
    use crate::window::FixedGeometry;
    use crossterm::event::{KeyCode, KeyModifiers};
    use ratatui::buffer::Buffer;

    fn desktop(now: Instant) -> Desktop {
        let config = DesktopConfig {
            skip_boot: true,
            ..DesktopConfig::default()
        };
        Desktop::new(&config, FixedGeometry::from_cells(100, 30), now)
            .with_lock_screen(LockScreen::new("tester"))
    }

    fn draw(desktop: &mut Desktop, now: Instant) -> Buffer {
        let area = Rect::new(0, 0, 100, 30);
        let mut buffer = Buffer::empty(area);
        let mut frame = UiFrame::from_parts(area, &mut buffer);
        desktop.render(&mut frame, now);
        buffer
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn ctrl_q_requests_quit_in_any_phase() {
        let now = Instant::now();
        let mut desktop = Desktop::new(&DesktopConfig::default(), FixedGeometry::from_cells(80, 24), now);
        assert_eq!(desktop.boot_phase(), BootPhase::Booting);
        let quit = Event::Key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL));
        assert!(desktop.handle_event(&quit, now));
        assert!(desktop.should_quit());
    }

    #[test]
    fn start_menu_keyboard_flow_opens_selected_app() {
        let now = Instant::now();
        let mut desktop = desktop(now);
        desktop.handle_event(&key(KeyCode::F(1)), now);
        assert!(desktop.state().start_menu_visible());
        desktop.handle_event(&key(KeyCode::Down), now);
        desktop.handle_event(&key(KeyCode::Enter), now);
        assert!(!desktop.state().start_menu_visible());
        assert!(desktop.wm().is_open(AppId::ALL[1]));
    }

    #[test]
    fn esc_closes_the_start_menu() {
        let now = Instant::now();
        let mut desktop = desktop(now);
        desktop.handle_event(&key(KeyCode::F(1)), now);
        desktop.handle_event(&key(KeyCode::Esc), now);
        assert!(!desktop.state().start_menu_visible());
    }

    #[test]
    fn explorer_file_launch_initializes_target_panel() {
        let now = Instant::now();
        let mut desktop = desktop(now);
        desktop.launch(AppId::Explorer, now);
        assert_eq!(desktop.explorer().folder(), "This PC");
        desktop.explorer.init(Some("Projects"));
        desktop.handle_event(&key(KeyCode::Enter), now);
        assert!(desktop.wm().is_open(AppId::Chrome));
        assert_eq!(
            desktop.browser().mode(),
            crate::components::BrowserMode::Projects
        );
        assert_eq!(desktop.wm().focused(), Some(AppId::Chrome));
    }

    #[test]
    fn browser_search_goes_to_link_opener() {
        let now = Instant::now();
        let recorder = RecordingOpener::new();
        let mut desktop = desktop(now).with_link_opener(recorder.clone());
        desktop.launch(AppId::Chrome, now);
        for c in "ferris".chars() {
            desktop.handle_event(&key(KeyCode::Char(c)), now);
        }
        desktop.handle_event(&key(KeyCode::Enter), now);
        assert_eq!(
            recorder.opened(),
            vec!["https://www.google.com/search?q=ferris".to_string()]
        );
    }

    #[test]
    fn window_chrome_is_mouse_only() {
        let now = Instant::now();
        let mut desktop = desktop(now);
        desktop.launch(AppId::Notepad, now);
        let ctrl_w = Event::Key(KeyEvent::new(KeyCode::Char('w'), KeyModifiers::CONTROL));
        for event in [key(KeyCode::F(11)), key(KeyCode::F(9)), ctrl_w] {
            assert!(!desktop.handle_event(&event, now));
        }
        assert!(desktop.wm().is_open(AppId::Notepad));
        assert!(!desktop.wm().is_fullscreen(AppId::Notepad));
        assert_eq!(desktop.wm().focused(), Some(AppId::Notepad));

        // other keys still reach the focused panel
        assert!(desktop.handle_event(&key(KeyCode::Down), now));
    }

    #[test]
    fn render_draws_taskbar_and_window_title() {
        let now = Instant::now();
        let mut desktop = desktop(now);
        desktop.launch(AppId::Notepad, now);
        let buffer = draw(&mut desktop, now);
        let rect = px_rect_to_cells(desktop.wm().frame_of(AppId::Notepad).unwrap());
        let title_row: String = (0..100)
            .map(|x| buffer.cell((x, rect.y as u16)).unwrap().symbol().to_string())
            .collect();
        assert!(title_row.contains("aboutme.txt - Notepad"));
        assert_eq!(buffer.cell((1, 28)).unwrap().symbol(), "⊞");
    }
}
