use super::Logger;
use std::ops::Deref;

/// Closes the logger's file when dropped, so a forgotten `close_log_file` can't leak the handle.
#[must_use = "dropping the guard closes the log file immediately"]
pub struct LogFileGuard<'a> {
    logger: &'a Logger,
}

impl<'a> LogFileGuard<'a> {
    pub(super) const fn new(logger: &'a Logger) -> Self {
        Self { logger }
    }
}

impl Deref for LogFileGuard<'_> {
    type Target = Logger;

    fn deref(&self) -> &Logger {
        self.logger
    }
}

impl Drop for LogFileGuard<'_> {
    fn drop(&mut self) {
        self.logger.close_log_file();
    }
}
