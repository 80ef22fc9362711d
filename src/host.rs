//! Hand-off to the host system's web browser.

use crate::error::DeskError;

pub trait LinkOpener {
    fn open(&mut self, url: &str) -> Result<(), DeskError>;
}

/// Opens links with the platform's default browser.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemBrowser;

impl LinkOpener for SystemBrowser {
    fn open(&mut self, url: &str) -> Result<(), DeskError> {
        webbrowser::open(url).map_err(|source| DeskError::Browser {
            url: url.to_string(),
            source,
        })
    }
}

/// Keeps every requested URL instead of opening it.
#[derive(Debug, Clone, Default)]
pub struct RecordingOpener {
    opened: std::sync::Arc<std::sync::Mutex<Vec<String>>>,
}

impl RecordingOpener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().map(|v| v.clone()).unwrap_or_default()
    }
}

impl LinkOpener for RecordingOpener {
    fn open(&mut self, url: &str) -> Result<(), DeskError> {
        if let Ok(mut opened) = self.opened.lock() {
            opened.push(url.to_string());
        }
        Ok(())
    }
}
