//! Unified error type for all catlog operations.

/// Boxed error returned by [`Category::on_create`](crate::Category::on_create) hooks.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error type for catlog operations.
#[derive(Debug)]
pub enum Error {
    /// A caller-supplied value is out of range or malformed (category name, file size limit).
    InvalidArgument(String),
    /// The operation is not allowed in the registry's current state.
    IllegalState(String),
    /// A category's `on_create` hook failed; nothing was published for it.
    Construction {
        category: String,
        source: BoxError,
    },
    /// I/O error.
    Io(std::io::Error),
    /// TOML config parsing error.
    ConfigParse(toml::de::Error),
    /// Config directory not found.
    ConfigDirNotFound,
    /// Invalid log level string.
    InvalidLevel(String),
}

/// Shorthand used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidArgument(s) => write!(f, "invalid argument: {s}"),
            Self::IllegalState(s) => write!(f, "illegal state: {s}"),
            Self::Construction { category, source } => {
                write!(f, "failed to construct logger '{category}': {source}")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::ConfigParse(e) => write!(f, "parse error: {e}"),
            Self::ConfigDirNotFound => write!(f, "config directory not found"),
            Self::InvalidLevel(level) => write!(f, "invalid level: {level}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::ConfigParse(e) => Some(e),
            Self::Construction { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Self::ConfigParse(e)
    }
}
