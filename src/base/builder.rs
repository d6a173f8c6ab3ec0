//! Stepwise construction for [`BaseLogger`], with a sub-builder for the terminal output.

use super::BaseLogger;
use crate::level::Level;
use crate::output::{Output, TerminalOutput};
use parking_lot::RwLock;
use std::sync::Arc;
use std::sync::atomic::AtomicU8;

pub struct BaseLoggerBuilder {
    name: String,
    level: Level,
    outputs: Vec<Arc<dyn Output>>,
    report_failures: bool,
}

impl BaseLoggerBuilder {
    /// Info is a safe default for production; finer levels are opt-in.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level: Level::Info,
            outputs: Vec::new(),
            report_failures: true,
        }
    }

    #[must_use]
    pub const fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    #[must_use]
    pub fn terminal(self) -> TerminalBuilder {
        TerminalBuilder {
            parent: self,
            output: TerminalOutput::new(),
        }
    }

    #[must_use]
    pub fn output(mut self, output: impl Output + 'static) -> Self {
        self.outputs.push(Arc::new(output));
        self
    }

    #[must_use]
    pub(crate) const fn report_failures(mut self, report: bool) -> Self {
        self.report_failures = report;
        self
    }

    #[must_use]
    pub fn build(self) -> BaseLogger {
        BaseLogger {
            name: self.name,
            level: AtomicU8::new(self.level as u8),
            outputs: RwLock::new(self.outputs),
            report_failures: self.report_failures,
        }
    }
}

pub struct TerminalBuilder {
    parent: BaseLoggerBuilder,
    output: TerminalOutput,
}

impl TerminalBuilder {
    /// Piped output and color-incapable terminals break on ANSI escape codes.
    #[must_use]
    pub fn colors(mut self, enabled: bool) -> Self {
        self.output = self.output.colors(enabled);
        self
    }

    #[must_use]
    pub fn structure(mut self, template: &str) -> Self {
        self.output = self.output.template(template);
        self
    }

    #[must_use]
    pub fn timestamp_format(mut self, format: impl Into<String>) -> Self {
        self.output = self.output.timestamp_format(format);
        self
    }

    #[must_use]
    pub fn min_level(mut self, level: Level) -> Self {
        self.output = self.output.min_level(level);
        self
    }

    /// Returns to the parent builder with the terminal output added.
    #[must_use]
    pub fn done(self) -> BaseLoggerBuilder {
        self.parent.output(self.output)
    }
}
