//! One [`Logger`] per live category: a [`BaseLogger`] named after the category plus at most
//! one rotating log file attached to it.
//!
//! Loggers are only ever built by the [`Registry`](crate::Registry); callers hold them as
//! `Arc<Logger>` and the registry keeps a weak handle.

mod guard;

pub use guard::LogFileGuard;

use crate::base::BaseLogger;
use crate::internal;
use crate::level::Level;
use crate::output::{Output, RotatingFileSink};
use crate::storage::Storage;
use parking_lot::Mutex;
use std::path::PathBuf;
use std::sync::Arc;

/// Bytes per megabyte for `open_log_file` limits.
pub const MB: u64 = 1024 * 1024;

/// Largest accepted `limit_mb`: the byte cap must stay representable.
pub const MAX_LIMIT_MB: u64 = u64::MAX / MB;

/// Where and how a logger's file is written, shared by every logger of one registry.
pub(crate) struct FileDefaults {
    pub(crate) storage: Arc<dyn Storage>,
    pub(crate) template: String,
    pub(crate) timestamp_format: String,
}

/// The currently attached sink and the settings it was opened with.
#[derive(Default)]
struct FileSlot {
    sink: Option<Arc<RotatingFileSink>>,
    limit_mb: u64,
    level: Level,
}

pub struct Logger {
    base: BaseLogger,
    /// Serializes open/close/delete for this logger only; independent of the registry lock.
    file: Mutex<FileSlot>,
    defaults: Arc<FileDefaults>,
}

impl Logger {
    pub(crate) fn new(base: BaseLogger, defaults: Arc<FileDefaults>) -> Self {
        Self {
            base,
            file: Mutex::new(FileSlot::default()),
            defaults,
        }
    }

    /// The category name this logger was created for.
    #[must_use]
    pub fn name(&self) -> &str {
        self.base.name()
    }

    /// Fixed at construction from the registry's global level.
    #[must_use]
    pub fn level(&self) -> Level {
        self.base.level()
    }

    #[must_use]
    pub fn is_enabled(&self, level: Level) -> bool {
        self.base.is_enabled(level)
    }

    /// The wrapped base logger, e.g. to attach extra outputs or list the attached ones.
    #[must_use]
    pub const fn base(&self) -> &BaseLogger {
        &self.base
    }

    pub fn log(&self, level: Level, msg: &str) {
        self.base.log(level, msg);
    }

    pub fn finest(&self, msg: &str) {
        self.log(Level::Finest, msg);
    }

    pub fn fine(&self, msg: &str) {
        self.log(Level::Fine, msg);
    }

    pub fn config(&self, msg: &str) {
        self.log(Level::Config, msg);
    }

    pub fn info(&self, msg: &str) {
        self.log(Level::Info, msg);
    }

    pub fn warning(&self, msg: &str) {
        self.log(Level::Warning, msg);
    }

    pub fn severe(&self, msg: &str) {
        self.log(Level::Severe, msg);
    }

    /// Opens (or reconfigures) this logger's log file, `<name>.log` resolved through `storage`.
    ///
    /// `level` is the file's own threshold; `None` writes everything that passes the
    /// logger's level. Reopening with the same limit and level is a no-op; different
    /// settings close the current file first.
    ///
    /// # Errors
    /// `InvalidArgument` when `limit_mb` is 0 or above [`MAX_LIMIT_MB`]; `Io` when the
    /// file can't be opened.
    pub fn open_log_file<S: Storage + ?Sized>(
        &self,
        limit_mb: u64,
        level: impl Into<Option<Level>>,
        storage: &S,
    ) -> crate::Result<()> {
        if limit_mb == 0 {
            return Err(crate::Error::InvalidArgument(
                "limit_mb must be greater than 0".to_string(),
            ));
        }
        if limit_mb > MAX_LIMIT_MB {
            return Err(crate::Error::InvalidArgument(format!(
                "limit_mb must not exceed {MAX_LIMIT_MB}"
            )));
        }
        let level = level.into().unwrap_or(Level::All);

        let mut slot = self.file.lock();
        if slot.sink.is_some() && slot.limit_mb == limit_mb && slot.level == level {
            internal::trace(
                "LOGGER",
                &format!("'{}' log file already open with same settings", self.name()),
            );
            return Ok(());
        }

        self.close_slot(&mut slot);

        let sink = RotatingFileSink::open(&self.file_name(), limit_mb * MB, storage)?
            .with_level(level)
            .with_template(&self.defaults.template)
            .with_timestamp_format(self.defaults.timestamp_format.as_str());
        let sink = Arc::new(sink);
        self.base.attach(sink.clone());

        internal::debug(
            "LOGGER",
            &format!(
                "'{}' logging to {} ({limit_mb} MB, level {level})",
                self.name(),
                sink.path().display()
            ),
        );
        *slot = FileSlot {
            sink: Some(sink),
            limit_mb,
            level,
        };
        Ok(())
    }

    /// [`open_log_file`](Self::open_log_file) against the registry's configured storage.
    ///
    /// # Errors
    /// Same as `open_log_file`.
    pub fn open_default_log_file(
        &self,
        limit_mb: u64,
        level: impl Into<Option<Level>>,
    ) -> crate::Result<()> {
        self.open_log_file(limit_mb, level, self.defaults.storage.as_ref())
    }

    /// Opens the log file and returns a guard that closes it when dropped.
    ///
    /// # Errors
    /// Same as `open_log_file`.
    pub fn open_log_file_scoped<S: Storage + ?Sized>(
        &self,
        limit_mb: u64,
        level: impl Into<Option<Level>>,
        storage: &S,
    ) -> crate::Result<LogFileGuard<'_>> {
        self.open_log_file(limit_mb, level, storage)?;
        Ok(LogFileGuard::new(self))
    }

    /// Detaches and closes the log file. Idempotent.
    pub fn close_log_file(&self) {
        let mut slot = self.file.lock();
        self.close_slot(&mut slot);
    }

    /// Deletes the log file from storage. The file stays open: the next record recreates it.
    ///
    /// # Errors
    /// I/O errors removing the file.
    pub fn delete_log_file(&self) -> crate::Result<()> {
        let slot = self.file.lock();
        match &slot.sink {
            Some(sink) => sink.delete_log_file(),
            None => Ok(()),
        }
    }

    #[must_use]
    pub fn has_log_file(&self) -> bool {
        self.file.lock().sink.is_some()
    }

    #[must_use]
    pub fn log_file_path(&self) -> Option<PathBuf> {
        self.file
            .lock()
            .sink
            .as_ref()
            .map(|sink| sink.path().to_path_buf())
    }

    /// `(limit_mb, level)` of the open log file.
    #[must_use]
    pub fn log_file_settings(&self) -> Option<(u64, Level)> {
        let slot = self.file.lock();
        slot.sink.as_ref().map(|_| (slot.limit_mb, slot.level))
    }

    /// # Errors
    /// Returns the first I/O error encountered across all outputs.
    pub fn flush(&self) -> crate::Result<()> {
        self.base.flush()
    }

    fn file_name(&self) -> String {
        format!("{}.log", self.name())
    }

    fn close_slot(&self, slot: &mut FileSlot) {
        if let Some(sink) = slot.sink.take() {
            let output: Arc<dyn Output> = sink.clone();
            self.base.detach(&output);
            sink.close();
            internal::debug("LOGGER", &format!("'{}' log file closed", self.name()));
        }
    }
}

impl Drop for Logger {
    /// Releases the file handle once the last owner lets go.
    fn drop(&mut self) {
        let mut slot = std::mem::take(self.file.get_mut());
        self.close_slot(&mut slot);
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name())
            .field("level", &self.level())
            .field("log_file", &self.log_file_path())
            .finish_non_exhaustive()
    }
}
