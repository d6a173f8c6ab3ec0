//! Process-wide map from category to its one live [`Logger`].
//!
//! Lookups run under a single registry lock, so concurrent first access to a category
//! constructs exactly one logger and runs its `on_create` hook once. The registry only
//! holds weak handles: a logger nobody uses any more is dropped, and its entry is swept
//! on a later lookup.
//!
//! The lock is reentrant so that an `on_create` hook may look up *other* categories;
//! looking up its own category from the hook is reported as `IllegalState`.

mod category;
mod from_config;

pub use category::Category;

use crate::base::BaseLogger;
use crate::config::TerminalConfig;
use crate::internal;
use crate::level::Level;
use crate::logger::{FileDefaults, Logger};
use crate::output::{DEFAULT_FILE_TEMPLATE, DEFAULT_TIMESTAMP_FORMAT};
use crate::storage::PlatformStorage;
use category::validate_name;
use parking_lot::ReentrantMutex;
use std::any::TypeId;
use std::cell::{RefCell, RefMut};
use std::collections::HashMap;
use std::sync::{Arc, OnceLock, Weak};

static GLOBAL: OnceLock<Registry> = OnceLock::new();

struct Entry {
    name: String,
    handle: Weak<Logger>,
}

struct RegistryState {
    loggers: HashMap<TypeId, Entry>,
    /// Categories whose `on_create` is running, with the name each will publish under.
    constructing: HashMap<TypeId, String>,
    global_level: Level,
    /// Set on the first successful construction and never cleared, even once that
    /// logger has been reclaimed.
    constructed_any: bool,
}

impl RegistryState {
    /// Drops entries whose logger is gone. Each entry is judged by its own current handle,
    /// so a category re-populated since its old logger died is kept.
    fn sweep(&mut self) {
        self.loggers.retain(|_, entry| {
            let live = entry.handle.strong_count() > 0;
            if !live {
                internal::trace("REGISTRY", &format!("Reclaimed '{}'", entry.name));
            }
            live
        });
    }

    fn live(&self, key: TypeId) -> Option<Arc<Logger>> {
        self.loggers.get(&key).and_then(|entry| entry.handle.upgrade())
    }

    /// Names pick log file paths, so two live categories must never share one.
    fn claim_name(&self, key: TypeId, name: &str) -> crate::Result<()> {
        let taken = self
            .loggers
            .iter()
            .map(|(other, entry)| (other, entry.name.as_str()))
            .chain(self.constructing.iter().map(|(other, n)| (other, n.as_str())))
            .any(|(other, taken)| *other != key && taken == name);
        if taken {
            return Err(crate::Error::IllegalState(format!(
                "logger name '{name}' is already used by another live category"
            )));
        }
        Ok(())
    }
}

/// Marks a category as under construction; the mark is cleared on drop, including
/// when `on_create` panics.
struct ConstructionMark<'a> {
    state: &'a RefCell<RegistryState>,
    key: TypeId,
}

impl<'a> ConstructionMark<'a> {
    fn acquire(state: &'a RefCell<RegistryState>, key: TypeId, name: &str) -> crate::Result<Self> {
        let mut constructing = RefMut::map(state.borrow_mut(), |s| &mut s.constructing);
        if constructing.contains_key(&key) {
            return Err(crate::Error::IllegalState(format!(
                "logger '{name}' is already under construction"
            )));
        }
        constructing.insert(key, name.to_string());
        drop(constructing);
        Ok(Self { state, key })
    }
}

impl Drop for ConstructionMark<'_> {
    fn drop(&mut self) {
        self.state.borrow_mut().constructing.remove(&self.key);
    }
}

pub struct Registry {
    state: ReentrantMutex<RefCell<RegistryState>>,
    /// Terminal output attached to every new logger, if enabled.
    terminal: Option<TerminalConfig>,
    defaults: Arc<FileDefaults>,
    /// Categories whose log file opens on construction: name → `(limit_mb, level)`.
    category_files: HashMap<String, (u64, Level)>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// A registry with no terminal output, global level `Info`, and log files in the
    /// platform state directory.
    #[must_use]
    pub fn new() -> Self {
        Self::with_parts(
            Level::Info,
            None,
            FileDefaults {
                storage: Arc::new(PlatformStorage::default()),
                template: DEFAULT_FILE_TEMPLATE.to_string(),
                timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
            },
            HashMap::new(),
        )
    }

    fn with_parts(
        level: Level,
        terminal: Option<TerminalConfig>,
        defaults: FileDefaults,
        category_files: HashMap<String, (u64, Level)>,
    ) -> Self {
        Self {
            state: ReentrantMutex::new(RefCell::new(RegistryState {
                loggers: HashMap::new(),
                constructing: HashMap::new(),
                global_level: level,
                constructed_any: false,
            })),
            terminal,
            defaults: Arc::new(defaults),
            category_files,
        }
    }

    /// The process-wide registry, built from the user's config file on first use
    /// (or from whatever [`crate::init`] installed).
    pub fn global() -> &'static Self {
        GLOBAL.get_or_init(|| {
            let config = crate::Config::load().unwrap_or_else(|e| {
                internal::init();
                internal::warn("REGISTRY", &format!("Config not loaded, using defaults: {e}"));
                crate::Config::default()
            });
            internal::init_with_config(&config);
            Self::from_config(&config).unwrap_or_else(|e| {
                internal::warn("REGISTRY", &format!("Invalid config, using defaults: {e}"));
                Self::new()
            })
        })
    }

    pub(crate) fn install_global(registry: Self) -> crate::Result<()> {
        GLOBAL.set(registry).map_err(|_| {
            crate::Error::IllegalState("global registry is already initialized".to_string())
        })
    }

    /// Returns the live logger for `C`, constructing it if there is none.
    ///
    /// # Errors
    /// - `InvalidArgument` if `C::name()` can't name a log file.
    /// - `IllegalState` if called for `C` from `C::on_create`, or if another live
    ///   category already uses the name `C::name()`.
    /// - `Construction` if `C::on_create` fails; nothing is published and a later
    ///   call tries again.
    pub fn get<C: Category>(&self) -> crate::Result<Arc<Logger>> {
        let key = TypeId::of::<C>();
        let guard = self.state.lock();

        {
            let mut state = guard.borrow_mut();
            state.sweep();
            if let Some(logger) = state.live(key) {
                return Ok(logger);
            }
        }

        let name = C::name();
        validate_name(&name)?;
        // Swept above, so only live entries can hold the name.
        guard.borrow().claim_name(key, &name)?;

        let mark = ConstructionMark::acquire(&guard, key, &name)?;
        let logger = self.construct::<C>(&guard, &name);
        drop(mark);
        let logger = logger?;

        let mut state = guard.borrow_mut();
        state.loggers.insert(
            key,
            Entry {
                name,
                handle: Arc::downgrade(&logger),
            },
        );
        state.constructed_any = true;
        Ok(logger)
    }

    fn construct<C: Category>(
        &self,
        state: &RefCell<RegistryState>,
        name: &str,
    ) -> crate::Result<Arc<Logger>> {
        let level = state.borrow().global_level;
        internal::debug(
            "REGISTRY",
            &format!("Constructing logger '{name}' at level {level}"),
        );

        let mut builder = BaseLogger::builder(name).level(level);
        if let Some(terminal) = &self.terminal {
            builder = builder
                .terminal()
                .colors(terminal.colors)
                .structure(&terminal.structure)
                .done();
        }
        let logger = Arc::new(Logger::new(builder.build(), Arc::clone(&self.defaults)));

        // Opened before the hook so whatever it logs lands in the file too.
        if let Some(&(limit_mb, file_level)) = self.category_files.get(name)
            && let Err(e) = logger.open_default_log_file(limit_mb, file_level)
        {
            internal::error(
                "REGISTRY",
                &format!("Configured log file for '{name}' not opened: {e}"),
            );
        }

        C::on_create(&logger).map_err(|source| {
            internal::error(
                "REGISTRY",
                &format!("on_create failed for '{name}': {source}"),
            );
            crate::Error::Construction {
                category: name.to_string(),
                source,
            }
        })?;

        Ok(logger)
    }

    /// Sets the level every future logger starts with.
    ///
    /// # Errors
    /// `IllegalState` once any logger has been constructed, even if it has since been
    /// dropped.
    pub fn set_global_level(&self, level: Level) -> crate::Result<()> {
        let guard = self.state.lock();
        let mut state = guard.borrow_mut();
        if state.constructed_any {
            return Err(crate::Error::IllegalState(
                "global level can only be set before the first logger is created".to_string(),
            ));
        }
        state.global_level = level;
        internal::debug("REGISTRY", &format!("Global level set to {level}"));
        Ok(())
    }

    #[must_use]
    pub fn global_level(&self) -> Level {
        self.state.lock().borrow().global_level
    }

    /// Deletes the log file of every live logger that has one open. Loggers without a
    /// file are skipped; a failed deletion is reported and the sweep continues.
    ///
    /// Returns how many loggers had their file deleted.
    pub fn delete_all_log_files(&self) -> usize {
        // File I/O happens outside the registry lock so lookups aren't held up.
        let live: Vec<Arc<Logger>> = {
            let guard = self.state.lock();
            let state = guard.borrow();
            state
                .loggers
                .values()
                .filter_map(|entry| entry.handle.upgrade())
                .collect()
        };

        let mut deleted = 0;
        for logger in live.iter().filter(|logger| logger.has_log_file()) {
            match logger.delete_log_file() {
                Ok(()) => deleted += 1,
                Err(e) => internal::error(
                    "REGISTRY",
                    &format!("Deleting log file of '{}' failed: {e}", logger.name()),
                ),
            }
        }
        internal::debug("REGISTRY", &format!("Deleted {deleted} log files"));
        deleted
    }

    /// Whether `C` currently has a live logger. Never constructs one.
    #[must_use]
    pub fn contains<C: Category>(&self) -> bool {
        let guard = self.state.lock();
        let state = guard.borrow();
        state.live(TypeId::of::<C>()).is_some()
    }

    /// Number of live loggers, after sweeping dropped ones.
    #[must_use]
    pub fn live_count(&self) -> usize {
        let guard = self.state.lock();
        let mut state = guard.borrow_mut();
        state.sweep();
        state.loggers.len()
    }
}
