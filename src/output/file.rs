//! Size-bounded log file. One file per sink, never more: when the next line would push
//! the file past its cap, the file is truncated and writing restarts from empty.

use crate::fmt::FormatTemplate;
use crate::internal;
use crate::level::Level;
use crate::storage::Storage;

use super::{LogRecord, Output};
use parking_lot::Mutex;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

pub const DEFAULT_FILE_TEMPLATE: &str = "{timestamp} {level} {name}  {msg}";
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

#[derive(Debug)]
struct SinkState {
    /// `None` after a delete (reopened lazily) or a close.
    file: Option<File>,
    /// File size after this sink's last write.
    written: u64,
    closed: bool,
}

/// The cap is checked against the file's actual size on every write, so a path shared
/// with another writer still stays bounded. Writes are serialized per sink only: two
/// sinks writing one path at the same instant can overshoot by a line. The registry
/// keeps live logger names unique so its own sinks never share a path.
#[derive(Debug)]
pub struct RotatingFileSink {
    path: PathBuf,
    limit_bytes: u64,
    level: Level,
    template: FormatTemplate,
    timestamp_format: String,
    state: Mutex<SinkState>,
}

impl RotatingFileSink {
    /// Resolves `file_name` through `storage` and opens it for append, creating it and
    /// its parent directories if needed.
    ///
    /// # Errors
    /// `InvalidArgument` for a zero cap; `Io` when the file can't be created or opened.
    pub fn open<S: Storage + ?Sized>(
        file_name: &str,
        limit_bytes: u64,
        storage: &S,
    ) -> crate::Result<Self> {
        if limit_bytes == 0 {
            return Err(crate::Error::InvalidArgument(
                "file size limit must be greater than 0".to_string(),
            ));
        }

        let path = storage.resolve(file_name)?;
        let (file, written) = open_capped(&path, limit_bytes).inspect_err(|e| {
            internal::error("FILE", &format!("Failed to open {}: {e}", path.display()));
        })?;
        internal::debug(
            "FILE",
            &format!(
                "Opened {} (limit {limit_bytes} bytes, {written} bytes present)",
                path.display()
            ),
        );

        Ok(Self {
            path,
            limit_bytes,
            level: Level::All,
            template: FormatTemplate::parse(DEFAULT_FILE_TEMPLATE),
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
            state: Mutex::new(SinkState {
                file: Some(file),
                written,
                closed: false,
            }),
        })
    }

    /// Records below `level` are not written to the file.
    #[must_use]
    pub const fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    #[must_use]
    pub fn with_template(mut self, template: &str) -> Self {
        self.template = FormatTemplate::parse(template);
        self
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: impl Into<String>) -> Self {
        self.timestamp_format = format.into();
        self
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub const fn limit_bytes(&self) -> u64 {
        self.limit_bytes
    }

    #[must_use]
    pub fn written_bytes(&self) -> u64 {
        self.state.lock().written
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.state.lock().closed
    }

    /// Flushes and releases the file handle. Later writes are dropped. Idempotent.
    pub fn close(&self) {
        let mut state = self.state.lock();
        if let Some(mut file) = state.file.take()
            && let Err(e) = file.flush()
        {
            internal::warn("FILE", &format!("Flush on close failed for {}: {e}", self.path.display()));
        }
        if !state.closed {
            state.closed = true;
            internal::debug("FILE", &format!("Closed {}", self.path.display()));
        }
    }

    /// Removes the backing file. An open sink recreates it on its next write.
    ///
    /// # Errors
    /// I/O errors other than the file already being gone.
    pub fn delete_log_file(&self) -> crate::Result<()> {
        let mut state = self.state.lock();
        // Unix keeps writing to an unlinked inode, so drop the handle before removing.
        state.file = None;
        state.written = 0;

        match fs::remove_file(&self.path) {
            Ok(()) => {
                internal::debug("FILE", &format!("Deleted {}", self.path.display()));
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => {
                internal::error(
                    "FILE",
                    &format!("Failed to delete {}: {e}", self.path.display()),
                );
                Err(e.into())
            }
        }
    }

    /// A line longer than the whole cap is cut so the file still never exceeds it.
    fn clip(&self, line: &mut String) {
        let cap = usize::try_from(self.limit_bytes).unwrap_or(usize::MAX);
        if line.len() > cap {
            let mut end = cap;
            while !line.is_char_boundary(end) {
                end -= 1;
            }
            line.truncate(end);
        }
    }
}

impl Output for RotatingFileSink {
    fn write(&self, record: &LogRecord<'_>) -> crate::Result<()> {
        if !self.level.permits(record.level) {
            return Ok(());
        }

        let mut line = record.render(&self.template, &self.timestamp_format, record.level.as_str());
        line.push('\n');
        self.clip(&mut line);
        let len = line.len() as u64;

        let mut guard = self.state.lock();
        let state = &mut *guard;
        if state.closed {
            return Ok(());
        }

        let file = match state.file.take() {
            Some(file) => file,
            None => {
                let (file, written) = open_capped(&self.path, self.limit_bytes)?;
                internal::debug("FILE", &format!("Recreated {}", self.path.display()));
                state.written = written;
                file
            }
        };
        let file = state.file.insert(file);

        // The file's own size, not our count: another handle may have appended to it.
        let mut present = file.metadata()?.len();
        if present + len > self.limit_bytes {
            file.set_len(0)?;
            internal::debug(
                "FILE",
                &format!(
                    "{} reached {present} bytes, restarting from empty",
                    self.path.display()
                ),
            );
            present = 0;
        }

        // Append mode: after set_len(0) the next write lands at offset 0.
        if let Err(e) = file.write_all(line.as_bytes()) {
            // Part of the line may have landed; the reopen re-reads the real size.
            state.file = None;
            return Err(e.into());
        }
        state.written = present + len;
        Ok(())
    }

    fn flush(&self) -> crate::Result<()> {
        if let Some(file) = self.state.lock().file.as_mut() {
            file.flush()?;
        }
        Ok(())
    }

    fn level(&self) -> Level {
        self.level
    }

    fn kind(&self) -> &'static str {
        "file"
    }
}

impl Drop for RotatingFileSink {
    fn drop(&mut self) {
        self.close();
    }
}

/// Opens `path` for append. A file already over `limit` (left by an earlier run with a
/// larger cap) is emptied first.
fn open_capped(path: &Path, limit: u64) -> io::Result<(File, u64)> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent)?;
        internal::debug("FILE", &format!("Created directory: {}", parent.display()));
    }

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let mut len = file.metadata()?.len();
    if len > limit {
        file.set_len(0)?;
        len = 0;
    }
    Ok((file, len))
}
