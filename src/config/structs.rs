//! Configuration struct definitions.

use serde::Deserialize;

/// General configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Global level applied to every logger the registry constructs.
    pub level: String,
    /// Application name; picks the platform log directory when `file.base_dir` is unset.
    pub app_name: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            app_name: "catlog".to_string(),
        }
    }
}

/// Terminal output configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TerminalConfig {
    /// Attach a terminal output to every new logger.
    pub enabled: bool,
    pub colors: bool,
    /// Line template.
    pub structure: String,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            colors: true,
            structure: "{level} {name}  {msg}".to_string(),
        }
    }
}

/// Log file configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Directory for log files. `~` is expanded. Unset means the platform state directory.
    pub base_dir: Option<String>,
    /// Line template.
    pub content_structure: String,
    /// Timestamp format (strftime).
    pub timestamp_format: String,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            base_dir: None,
            content_structure: crate::output::DEFAULT_FILE_TEMPLATE.to_string(),
            timestamp_format: crate::output::DEFAULT_TIMESTAMP_FORMAT.to_string(),
        }
    }
}

/// Settings for catlog's own diagnostics.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InternalConfig {
    pub level: String,
    pub colors: bool,
}

impl Default for InternalConfig {
    fn default() -> Self {
        Self {
            level: "off".to_string(),
            colors: true,
        }
    }
}

/// Opens a category's log file as soon as its logger is constructed.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryConfig {
    pub limit_mb: u64,
    /// File threshold; omitted means everything.
    pub level: Option<String>,
}
