//! Terminal output on stderr: what a logger prints when no file is open.

use crate::fmt::{Color, FormatTemplate, colorize};
use crate::level::Level;

use super::{LogRecord, Output};
use std::io::{self, Write};

#[derive(Debug, Clone)]
pub struct TerminalOutput {
    /// Piped output and CI environments can't render ANSI escape codes.
    colors_enabled: bool,
    template: FormatTemplate,
    timestamp_format: String,
    level: Level,
}

impl Default for TerminalOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalOutput {
    #[must_use]
    pub fn new() -> Self {
        Self {
            colors_enabled: true,
            template: FormatTemplate::default(),
            timestamp_format: "%H:%M:%S".to_string(),
            level: Level::All,
        }
    }

    #[must_use]
    pub const fn colors(mut self, enabled: bool) -> Self {
        self.colors_enabled = enabled;
        self
    }

    #[must_use]
    pub fn template(mut self, template: &str) -> Self {
        self.template = FormatTemplate::parse(template);
        self
    }

    #[must_use]
    pub fn timestamp_format(mut self, format: impl Into<String>) -> Self {
        self.timestamp_format = format.into();
        self
    }

    /// Extra threshold on top of the logger's own, e.g. to keep the terminal to warnings.
    #[must_use]
    pub const fn min_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    fn format_record(&self, record: &LogRecord<'_>) -> String {
        let tag = format!("{:<7}", record.level.as_str());
        let tag = if self.colors_enabled {
            colorize(&tag, Color::for_level(record.level))
        } else {
            tag
        };

        record.render(&self.template, &self.timestamp_format, &tag)
    }
}

impl Output for TerminalOutput {
    fn write(&self, record: &LogRecord<'_>) -> crate::Result<()> {
        let mut line = self.format_record(record);
        line.push('\n');
        // Single write call so concurrent lines don't interleave mid-line.
        io::stderr().lock().write_all(line.as_bytes())?;
        Ok(())
    }

    fn flush(&self) -> crate::Result<()> {
        io::stderr().flush()?;
        Ok(())
    }

    fn level(&self) -> Level {
        self.level
    }

    fn kind(&self) -> &'static str {
        "terminal"
    }
}
