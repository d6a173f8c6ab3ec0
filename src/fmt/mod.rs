//! Line rendering shared by the terminal output and the rotating file sink.

mod color;
mod format;

pub use color::{Color, colorize};
pub use format::{FormatSegment, FormatTemplate, FormatValues, Placeholder};
