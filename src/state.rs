/// Shell-level UI state that is not owned by the window manager.
#[derive(Debug, Default, Clone, Copy)]
pub struct AppState {
    start_menu_visible: bool,
    menu_selected: usize,
    quit_requested: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start_menu_visible(&self) -> bool {
        self.start_menu_visible
    }

    pub fn set_start_menu_visible(&mut self, visible: bool) {
        if visible && !self.start_menu_visible {
            self.menu_selected = 0;
        }
        self.start_menu_visible = visible;
    }

    pub fn toggle_start_menu(&mut self) {
        let visible = !self.start_menu_visible;
        self.set_start_menu_visible(visible);
    }

    pub fn menu_selected(&self) -> usize {
        self.menu_selected
    }

    /// Move the start-menu selection by `delta`, wrapping within `len` items.
    pub fn move_menu_selection(&mut self, delta: isize, len: usize) {
        if len == 0 {
            self.menu_selected = 0;
            return;
        }
        let len = len as isize;
        let next = (self.menu_selected as isize + delta).rem_euclid(len);
        self.menu_selected = next as usize;
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    pub fn request_quit(&mut self) {
        self.quit_requested = true;
    }
}
