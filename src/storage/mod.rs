//! Where log files live is the host's business, not the logger's; file sinks ask a
//! [`Storage`] to turn a logical file name into a writable path.

use crate::internal;
use std::path::{Path, PathBuf};

/// Resolves a logical file name (e.g. `net.Client.log`) to a concrete path.
pub trait Storage: Send + Sync {
    /// # Errors
    /// Implementations fail when no writable location can be determined.
    fn resolve(&self, file_name: &str) -> crate::Result<PathBuf>;
}

/// A bare directory path is the simplest storage: files go directly inside it.
impl Storage for Path {
    fn resolve(&self, file_name: &str) -> crate::Result<PathBuf> {
        Ok(self.join(file_name))
    }
}

impl Storage for PathBuf {
    fn resolve(&self, file_name: &str) -> crate::Result<PathBuf> {
        self.as_path().resolve(file_name)
    }
}

/// Fixed directory, typically from config. A leading `~` is expanded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirStorage {
    dir: PathBuf,
}

impl DirStorage {
    #[must_use]
    pub fn new(dir: &str) -> Self {
        let expanded = shellexpand::tilde(dir);
        Self {
            dir: PathBuf::from(expanded.as_ref()),
        }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Storage for DirStorage {
    fn resolve(&self, file_name: &str) -> crate::Result<PathBuf> {
        let path = self.dir.join(file_name);
        internal::trace("STORAGE", &format!("Resolved {file_name} to {}", path.display()));
        Ok(path)
    }
}

/// Per-user state directory for an application (`~/.local/state/<app>/logs` on Linux).
///
/// Platforms without a state dir use the data dir; when neither can be determined
/// (no home directory) files land in a relative `logs/` directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformStorage {
    dir: PathBuf,
}

impl PlatformStorage {
    #[must_use]
    pub fn new(app_name: &str) -> Self {
        let dir = directories::ProjectDirs::from("", "", app_name).map_or_else(
            || PathBuf::from("logs"),
            |dirs| dirs.state_dir().unwrap_or_else(|| dirs.data_dir()).join("logs"),
        );
        Self { dir }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Default for PlatformStorage {
    fn default() -> Self {
        Self::new("catlog")
    }
}

impl Storage for PlatformStorage {
    fn resolve(&self, file_name: &str) -> crate::Result<PathBuf> {
        self.dir.resolve(file_name)
    }
}
