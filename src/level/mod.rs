//! Severity levels that gate which messages reach the base logger and which reach a file.

use std::fmt;
use std::str::FromStr;

/// Derives `Ord` so thresholds compare directly: a record passes when `record >= threshold`.
///
/// `All` and `Off` are sentinels: as a threshold, `All` lets everything through and `Off`
/// lets nothing through. They are never used as the level of an emitted record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Level {
    /// Threshold that disables filtering.
    All = 0,
    /// Very fine-grained tracing.
    Finest = 1,
    /// Tracing that is useful while developing a subsystem.
    Fine = 2,
    /// Static configuration messages (paths chosen, limits applied).
    Config = 3,
    /// Normal operational milestones.
    #[default]
    Info = 4,
    /// Potential problems that did not stop the operation.
    Warning = 5,
    /// Failures that prevented normal execution.
    Severe = 6,
    /// Threshold that disables output entirely.
    Off = 7,
}

impl Level {
    /// Uppercase, matching how the level is rendered into log lines.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "ALL",
            Self::Finest => "FINEST",
            Self::Fine => "FINE",
            Self::Config => "CONFIG",
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Severe => "SEVERE",
            Self::Off => "OFF",
        }
    }

    /// Convenience for iteration.
    #[must_use]
    pub const fn all() -> [Self; 8] {
        [
            Self::All,
            Self::Finest,
            Self::Fine,
            Self::Config,
            Self::Info,
            Self::Warning,
            Self::Severe,
            Self::Off,
        ]
    }

    /// Whether a record at `record` passes this threshold.
    #[must_use]
    pub const fn permits(self, record: Self) -> bool {
        !matches!(self, Self::Off) && record as u8 >= self as u8
    }

    pub(crate) const fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::All,
            1 => Self::Finest,
            2 => Self::Fine,
            3 => Self::Config,
            4 => Self::Info,
            5 => Self::Warning,
            6 => Self::Severe,
            _ => Self::Off,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned by `FromStr` so callers can distinguish "unknown level" from other parse failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLevelError(String);

impl fmt::Display for ParseLevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown log level: '{}'", self.0)
    }
}

impl std::error::Error for ParseLevelError {}

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "finest" | "trace" => Ok(Self::Finest),
            "fine" | "debug" => Ok(Self::Fine),
            "config" => Ok(Self::Config),
            "info" => Ok(Self::Info),
            "warning" | "warn" => Ok(Self::Warning),
            "severe" | "error" | "err" => Ok(Self::Severe),
            "off" | "none" => Ok(Self::Off),
            _ => Err(ParseLevelError(s.to_string())),
        }
    }
}

impl From<ParseLevelError> for crate::Error {
    fn from(e: ParseLevelError) -> Self {
        Self::InvalidLevel(e.0)
    }
}
