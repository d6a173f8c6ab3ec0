//! TOML configuration for the registry: global level, terminal output, where log files go,
//! and which categories open a file on construction.

mod structs;

pub use structs::{CategoryConfig, FileConfig, GeneralConfig, InternalConfig, TerminalConfig};

use crate::internal;
use crate::level::Level;
use crate::logger::MAX_LIMIT_MB;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// An empty file must still produce a working registry: `#[serde(default)]`
/// on every section keeps zero-config working.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub terminal: TerminalConfig,
    pub file: FileConfig,
    pub internal: InternalConfig,
    /// Keyed by category name (`my_app.net.Client`).
    pub categories: HashMap<String, CategoryConfig>,
}

impl Config {
    /// Loads the user's config from the default location; a missing file yields defaults.
    ///
    /// # Errors
    /// Fails if the config directory can't be determined, the file can't be read, or the
    /// TOML is malformed.
    pub fn load() -> Result<Self, crate::Error> {
        internal::debug("CONFIG", "Loading config from default location");
        let path = Self::get_config_path()?;
        let config = Self::load_from(&path)?;
        internal::info("CONFIG", &format!("Config loaded from {}", path.display()));
        Ok(config)
    }

    /// Loads configuration from an explicit path instead of the default location.
    ///
    /// # Errors
    /// Returns error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self, crate::Error> {
        if !path.exists() {
            internal::debug("CONFIG", "Config file not found, using defaults");
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// # Errors
    /// TOML syntax or type errors.
    pub fn parse(content: &str) -> Result<Self, crate::Error> {
        Ok(toml::from_str(content)?)
    }

    /// `<config dir>/catlog/catlog.toml`, e.g. `~/.config/catlog/catlog.toml` on Linux.
    ///
    /// # Errors
    /// Fails when the platform has no concept of a config directory.
    pub fn get_config_path() -> Result<PathBuf, crate::Error> {
        directories::BaseDirs::new()
            .map(|dirs| dirs.config_dir().join("catlog").join("catlog.toml"))
            .ok_or(crate::Error::ConfigDirNotFound)
    }

    /// # Errors
    /// `InvalidLevel` for an unknown level name.
    pub fn parse_level(&self) -> Result<Level, crate::Error> {
        Ok(self.general.level.parse()?)
    }

    /// Unknown names fall back to `Off` so a typo silences diagnostics instead of failing startup.
    #[must_use]
    pub fn parse_internal_level(&self) -> Level {
        self.internal.level.parse().unwrap_or(Level::Off)
    }

    /// Auto-open settings per category name, with levels parsed.
    ///
    /// # Errors
    /// `InvalidLevel` for an unknown file level; `InvalidArgument` for a `limit_mb`
    /// outside `1..=MAX_LIMIT_MB`.
    pub fn category_files(&self) -> Result<HashMap<String, (u64, Level)>, crate::Error> {
        self.categories
            .iter()
            .map(|(name, category)| -> Result<_, crate::Error> {
                if !(1..=MAX_LIMIT_MB).contains(&category.limit_mb) {
                    return Err(crate::Error::InvalidArgument(format!(
                        "categories.\"{name}\".limit_mb must be between 1 and {MAX_LIMIT_MB}, got {}",
                        category.limit_mb
                    )));
                }
                let level = match &category.level {
                    Some(level) => level.parse()?,
                    None => Level::All,
                };
                Ok((name.clone(), (category.limit_mb, level)))
            })
            .collect()
    }
}
