//! `catlog` - one logger per category, with an optional size-bounded log file each.
//!
//! - A [`Registry`] hands out exactly one live [`Logger`] per [`Category`], built lazily
//!   on first lookup and safe under concurrent first access.
//! - The registry keeps only weak handles: loggers nobody holds are dropped, closing
//!   their file, and their entries are swept on a later lookup.
//! - Each logger can open one [`RotatingFileSink`]: a single file that is truncated and
//!   restarted whenever the next line would push it past its size cap.
//!
//! # Example
//!
//! ```
//! use catlog::{Category, Level, Registry};
//!
//! struct Pager;
//! impl Category for Pager {}
//!
//! let dir = std::env::temp_dir().join("catlog-doc");
//! let registry = Registry::new();
//! let logger = registry.get::<Pager>().unwrap();
//!
//! logger.open_log_file(1, Level::Info, dir.as_path()).unwrap();
//! logger.info("flushed 12 pages");
//! logger.fine("not written: below the logger's level");
//! logger.close_log_file();
//! ```

pub mod base;
pub mod config;
mod error;
pub mod fmt;
pub mod internal;
pub mod level;
pub mod logger;
pub mod output;
pub mod registry;
pub mod storage;

pub use base::BaseLogger;
pub use config::Config;
pub use error::{BoxError, Error, Result};
pub use level::Level;
pub use logger::{LogFileGuard, Logger, MAX_LIMIT_MB, MB};
pub use output::{LogRecord, Output, RotatingFileSink, TerminalOutput};
pub use registry::{Category, Registry};
pub use storage::{DirStorage, PlatformStorage, Storage};

use std::sync::Arc;

/// Installs the process-wide registry from `config`. Must run before the first
/// [`get`]; without it the global registry loads the user's config file itself.
///
/// # Errors
/// `IllegalState` if the global registry already exists; `InvalidLevel` for bad levels.
pub fn init(config: &Config) -> Result<()> {
    internal::init_with_config(config);
    Registry::install_global(Registry::from_config(config)?)
}

/// The live logger for `C` in the global registry. See [`Registry::get`].
///
/// # Errors
/// Same as [`Registry::get`].
pub fn get<C: Category>() -> Result<Arc<Logger>> {
    Registry::global().get::<C>()
}

/// See [`Registry::set_global_level`].
///
/// # Errors
/// `IllegalState` once any logger has been constructed.
pub fn set_global_level(level: Level) -> Result<()> {
    Registry::global().set_global_level(level)
}

/// See [`Registry::delete_all_log_files`].
pub fn delete_all_log_files() -> usize {
    Registry::global().delete_all_log_files()
}
