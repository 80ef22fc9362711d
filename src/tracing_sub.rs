//! Tracing subscriber wiring.

use std::io::{self, Write};

use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;

use crate::debug_log::{DebugLogWriter, global_debug_log};

/// Destination picked per event: the global log buffer once it is
/// registered, stderr before that.
pub enum LogWriter {
    Buffer(DebugLogWriter),
    Stderr(io::Stderr),
}

impl LogWriter {
    fn current() -> Self {
        match global_debug_log() {
            Some(handle) => LogWriter::Buffer(handle.writer()),
            None => LogWriter::Stderr(io::stderr()),
        }
    }
}

impl Write for LogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            LogWriter::Buffer(w) => w.write(buf),
            LogWriter::Stderr(s) => s.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            LogWriter::Buffer(w) => w.flush(),
            LogWriter::Stderr(s) => s.flush(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct LogSink;

impl<'a> MakeWriter<'a> for LogSink {
    type Writer = LogWriter;

    fn make_writer(&'a self) -> Self::Writer {
        LogWriter::current()
    }
}

/// Install the global subscriber at `DEBUG`. Later calls are no-ops.
pub fn init_default() {
    init_with_level(Level::DEBUG);
}

pub fn init_with_level(level: Level) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(false)
        .with_writer(LogSink)
        .with_target(false)
        .with_thread_names(false)
        .try_init();
}
