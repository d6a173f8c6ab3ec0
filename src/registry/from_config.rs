//! Registry construction from a loaded [`Config`].

use super::Registry;
use crate::config::Config;
use crate::internal;
use crate::logger::FileDefaults;
use crate::storage::{DirStorage, PlatformStorage, Storage};
use std::sync::Arc;

impl Registry {
    /// Applies the config's global level, terminal output, file location and format,
    /// and per-category auto-open settings.
    ///
    /// # Errors
    /// `InvalidLevel` if the global level or a category's file level is unknown.
    pub fn from_config(config: &Config) -> crate::Result<Self> {
        let level = config.parse_level()?;
        let category_files = config.category_files()?;
        internal::debug("REGISTRY", &format!("Global level: {level}"));

        let storage: Arc<dyn Storage> = match &config.file.base_dir {
            Some(dir) => Arc::new(DirStorage::new(dir)),
            None => Arc::new(PlatformStorage::new(&config.general.app_name)),
        };

        let terminal = if config.terminal.enabled {
            internal::debug(
                "REGISTRY",
                &format!(
                    "Terminal output: colors={}, structure={}",
                    config.terminal.colors, config.terminal.structure
                ),
            );
            Some(config.terminal.clone())
        } else {
            None
        };

        if !category_files.is_empty() {
            internal::debug(
                "REGISTRY",
                &format!("{} categories open a log file on creation", category_files.len()),
            );
        }

        Ok(Self::with_parts(
            level,
            terminal,
            FileDefaults {
                storage,
                template: config.file.content_structure.clone(),
                timestamp_format: config.file.timestamp_format.clone(),
            },
            category_files,
        ))
    }
}
