use std::io;

use thiserror::Error;

/// Errors surfaced by the desktop shell outside the window core.
///
/// Window-manager operations never fail; unknown ids are silently ignored.
#[derive(Debug, Error)]
pub enum DeskError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("unknown application `{0}` (expected notepad, explorer or chrome)")]
    UnknownApp(String),
    #[error("failed to open `{url}` in the host browser: {source}")]
    Browser {
        url: String,
        #[source]
        source: io::Error,
    },
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),
}

pub type Result<T, E = DeskError> = std::result::Result<T, E>;
