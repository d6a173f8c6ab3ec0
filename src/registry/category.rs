use crate::error::BoxError;
use crate::logger::Logger;

/// A logging channel. Implement it on a marker type per subsystem and ask the registry
/// for `get::<MyCategory>()`; the type's identity is the registry key.
///
/// ```
/// use catlog::{Category, Logger, Registry};
///
/// struct Network;
///
/// impl Category for Network {
///     fn name() -> String {
///         "app.network".to_string()
///     }
///
///     fn on_create(logger: &Logger) -> Result<(), catlog::BoxError> {
///         logger.config("network logger created");
///         Ok(())
///     }
/// }
///
/// let registry = Registry::new();
/// let logger = registry.get::<Network>().unwrap();
/// assert_eq!(logger.name(), "app.network");
/// ```
pub trait Category: 'static {
    /// Logger name and log file stem. Defaults to the type path with `::` replaced by `.`.
    #[must_use]
    fn name() -> String {
        std::any::type_name::<Self>().replace("::", ".")
    }

    /// Runs exactly once per constructed logger, after its base logger exists and before
    /// any other caller can obtain it.
    ///
    /// The hook may look up other categories, but looking up `Self` from inside it
    /// returns `Error::IllegalState`.
    ///
    /// # Errors
    /// A failure aborts construction; `get` returns `Error::Construction` and nothing is
    /// published for the category.
    fn on_create(logger: &Logger) -> Result<(), BoxError> {
        let _ = logger;
        Ok(())
    }
}

/// Names become file names, so they must be usable as a single path component.
pub(super) fn validate_name(name: &str) -> crate::Result<()> {
    if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\', '\0']) {
        return Err(crate::Error::InvalidArgument(format!(
            "'{name}' is not a valid category name"
        )));
    }
    Ok(())
}
