use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Quit,
    // Start menu
    ToggleStartMenu,
    CloseStartMenu,
    MenuUp,
    MenuDown,
    MenuSelect,
    // Lock screen
    Unlock,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Action::Quit => "Quit",
            Action::ToggleStartMenu => "Toggle start menu",
            Action::CloseStartMenu => "Close start menu",
            Action::MenuUp => "Menu up",
            Action::MenuDown => "Menu down",
            Action::MenuSelect => "Menu select",
            Action::Unlock => "Unlock",
        };
        write!(f, "{}", s)
    }
}
