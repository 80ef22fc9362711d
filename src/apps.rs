//! The fixed set of simulated applications.

use std::fmt;
use std::str::FromStr;

use crate::error::DeskError;
use crate::window::Size;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AppId {
    Notepad,
    Explorer,
    Chrome,
}

impl AppId {
    /// Taskbar and start-menu order.
    pub const ALL: [AppId; 3] = [AppId::Explorer, AppId::Chrome, AppId::Notepad];

    pub fn as_str(self) -> &'static str {
        match self {
            AppId::Notepad => "notepad",
            AppId::Explorer => "explorer",
            AppId::Chrome => "chrome",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            AppId::Notepad => "aboutme.txt - Notepad",
            AppId::Explorer => "File Explorer",
            AppId::Chrome => "Google Chrome",
        }
    }

    /// Label used by the start menu.
    pub fn label(self) -> &'static str {
        match self {
            AppId::Notepad => "Notepad",
            AppId::Explorer => "File Explorer",
            AppId::Chrome => "Chrome",
        }
    }

    /// Two-cell glyph drawn on the taskbar icon.
    pub fn glyph(self) -> &'static str {
        match self {
            AppId::Notepad => "✎ ",
            AppId::Explorer => "▤ ",
            AppId::Chrome => "◉ ",
        }
    }

    /// Fixed window size in virtual pixels.
    pub fn default_size(self) -> Size {
        match self {
            AppId::Notepad => Size::new(400, 224),
            AppId::Explorer => Size::new(480, 256),
            AppId::Chrome => Size::new(560, 288),
        }
    }
}

impl fmt::Display for AppId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppId {
    type Err = DeskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "notepad" => Ok(AppId::Notepad),
            "explorer" => Ok(AppId::Explorer),
            "chrome" => Ok(AppId::Chrome),
            _ => Err(DeskError::UnknownApp(s.to_string())),
        }
    }
}
