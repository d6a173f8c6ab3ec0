//! Destinations a [`BaseLogger`](crate::BaseLogger) fans records out to. The two built-in
//! outputs are the terminal and the size-bounded rotating file; the [`Output`] trait lets
//! callers attach their own.

mod file;
mod terminal;

pub use file::{DEFAULT_FILE_TEMPLATE, DEFAULT_TIMESTAMP_FORMAT, RotatingFileSink};
pub use terminal::TerminalOutput;

use crate::fmt::{FormatTemplate, FormatValues, Placeholder};
use crate::level::Level;
use chrono::{DateTime, Local};

/// Everything an output needs to render one line. The timestamp is taken once at
/// emit time so every output attached to a logger agrees on it.
#[derive(Debug, Clone, Copy)]
pub struct LogRecord<'a> {
    pub level: Level,
    /// Name of the logger that emitted the record.
    pub logger: &'a str,
    pub message: &'a str,
    pub time: DateTime<Local>,
}

impl<'a> LogRecord<'a> {
    #[must_use]
    pub fn new(level: Level, logger: &'a str, message: &'a str) -> Self {
        Self {
            level,
            logger,
            message,
            time: Local::now(),
        }
    }

    /// Renders the record through `template`, formatting the timestamp with `timestamp_format`
    /// (strftime) only when the template shows it. `level` is passed in pre-rendered so
    /// the terminal can color it.
    #[must_use]
    pub fn render(&self, template: &FormatTemplate, timestamp_format: &str, level: &str) -> String {
        let timestamp = if template.uses(Placeholder::Timestamp) {
            self.time.format(timestamp_format).to_string()
        } else {
            String::new()
        };
        let current = std::thread::current();
        let thread = if template.uses(Placeholder::Thread) {
            current.name().unwrap_or("unnamed")
        } else {
            ""
        };

        let values = FormatValues::new()
            .timestamp(&timestamp)
            .level(level)
            .name(self.logger)
            .thread(thread)
            .msg(self.message);

        template.render(&values)
    }
}

/// `Send + Sync` so one output can be shared by every thread logging through its logger.
pub trait Output: Send + Sync {
    /// Renders and writes one record.
    ///
    /// # Errors
    /// I/O errors from the underlying destination.
    fn write(&self, record: &LogRecord<'_>) -> crate::Result<()>;

    /// # Errors
    /// I/O errors from the underlying destination.
    fn flush(&self) -> crate::Result<()>;

    /// Per-output threshold, applied after the logger's own. `All` means no extra filtering.
    fn level(&self) -> Level {
        Level::All
    }

    /// Short label for diagnostics.
    fn kind(&self) -> &'static str;
}
