//! catlog's own diagnostic logger: file opens, truncations, reclamation sweeps and
//! write failures are reported here rather than through the loggers being managed.
//!
//! Uses `OnceLock` so the logger is initialized exactly once, even if several entry
//! points race to call `init`. Silent (level `Off`) unless the config asks otherwise.

use crate::base::BaseLogger;
use crate::config::Config;
use crate::level::Level;
use std::sync::OnceLock;

static INTERNAL_LOGGER: OnceLock<BaseLogger> = OnceLock::new();

/// Fallback initializer that loads config itself.
pub fn init() {
    INTERNAL_LOGGER.get_or_init(|| {
        let config = Config::load().unwrap_or_default();
        build_internal_logger(&config)
    });
}

/// Preferred initializer; reuses an already-loaded config. Only the first call takes effect.
pub fn init_with_config(config: &Config) {
    let was_init = INTERNAL_LOGGER.get().is_some();
    INTERNAL_LOGGER.get_or_init(|| build_internal_logger(config));
    if !was_init {
        debug(
            "INTERNAL",
            &format!("Internal logger ready (level {})", config.internal.level),
        );
    }
}

/// Changes the diagnostic threshold after init, e.g. to turn on tracing in a test.
pub fn set_level(level: Level) {
    if let Some(logger) = INTERNAL_LOGGER.get() {
        logger.set_level(level);
    }
}

fn build_internal_logger(config: &Config) -> BaseLogger {
    BaseLogger::builder("catlog")
        .level(config.parse_internal_level())
        .report_failures(false)
        .terminal()
        .colors(config.internal.colors)
        .structure("{level} {name} {msg}")
        .done()
        .build()
}

/// Calls made before init are dropped.
fn log(level: Level, scope: &str, msg: &str) {
    if let Some(logger) = INTERNAL_LOGGER.get()
        && logger.is_enabled(level)
    {
        logger.log(level, &format!("[{scope}] {msg}"));
    }
}

pub fn trace(scope: &str, msg: &str) {
    log(Level::Finest, scope, msg);
}

pub fn debug(scope: &str, msg: &str) {
    log(Level::Fine, scope, msg);
}

pub fn info(scope: &str, msg: &str) {
    log(Level::Info, scope, msg);
}

pub fn warn(scope: &str, msg: &str) {
    log(Level::Warning, scope, msg);
}

pub fn error(scope: &str, msg: &str) {
    log(Level::Severe, scope, msg);
}
