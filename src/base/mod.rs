//! The leveled logging primitive every category logger wraps: a name, a minimum level,
//! and a list of outputs each record fans out to. Outputs can be attached and detached
//! at runtime, which is how a logger's file sink comes and goes.

mod builder;

pub use builder::{BaseLoggerBuilder, TerminalBuilder};

use crate::internal;
use crate::level::Level;
use crate::output::{LogRecord, Output};
use parking_lot::RwLock;
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

pub struct BaseLogger {
    name: String,
    level: AtomicU8,
    outputs: RwLock<Vec<Arc<dyn Output>>>,
    /// The internal logger must not report its own write failures back into itself.
    report_failures: bool,
}

impl BaseLogger {
    /// A logger with no outputs at the default `Info` threshold.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self::builder(name).build()
    }

    #[must_use]
    pub fn builder(name: impl Into<String>) -> BaseLoggerBuilder {
        BaseLoggerBuilder::new(name)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn level(&self) -> Level {
        Level::from_u8(self.level.load(Ordering::Relaxed))
    }

    pub fn set_level(&self, level: Level) {
        self.level.store(level as u8, Ordering::Relaxed);
    }

    /// Lets callers skip building expensive messages that would be filtered anyway.
    #[must_use]
    pub fn is_enabled(&self, level: Level) -> bool {
        self.level().permits(level)
    }

    /// Filters by the logger's level, then by each output's own level.
    ///
    /// Write failures never reach the caller; they are reported through the internal
    /// logger and the remaining outputs still get the record.
    pub fn log(&self, level: Level, msg: &str) {
        if !self.is_enabled(level) {
            return;
        }

        let record = LogRecord::new(level, &self.name, msg);
        for output in self.outputs.read().iter() {
            if !output.level().permits(level) {
                continue;
            }
            if let Err(e) = output.write(&record)
                && self.report_failures
            {
                internal::warn(
                    "BASE",
                    &format!("{} output of '{}' failed: {e}", output.kind(), self.name),
                );
            }
        }
    }

    pub fn attach(&self, output: Arc<dyn Output>) {
        internal::trace(
            "BASE",
            &format!("Attaching {} output to '{}'", output.kind(), self.name),
        );
        self.outputs.write().push(output);
    }

    /// Detaches `output` by identity. Returns whether it was attached.
    pub fn detach(&self, output: &Arc<dyn Output>) -> bool {
        let mut outputs = self.outputs.write();
        let before = outputs.len();
        outputs.retain(|o| !Arc::ptr_eq(o, output));
        let removed = outputs.len() != before;
        if removed {
            internal::trace(
                "BASE",
                &format!("Detached {} output from '{}'", output.kind(), self.name),
            );
        }
        removed
    }

    /// Snapshot of the attached outputs.
    #[must_use]
    pub fn outputs(&self) -> Vec<Arc<dyn Output>> {
        self.outputs.read().clone()
    }

    #[must_use]
    pub fn output_count(&self) -> usize {
        self.outputs.read().len()
    }

    /// # Errors
    /// Returns the first I/O error encountered across all outputs.
    pub fn flush(&self) -> crate::Result<()> {
        for output in self.outputs.read().iter() {
            output.flush()?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for BaseLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BaseLogger")
            .field("name", &self.name)
            .field("level", &self.level())
            .field("outputs", &self.output_count())
            .finish_non_exhaustive()
    }
}
