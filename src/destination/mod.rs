//! Log destinations.
//!
//! A destination consumes finished [`LogEntry`] values and performs the
//! actual output. Every destination applies the same filtering rule: entries
//! below its minimum level are dropped without any observable effect, all
//! others are formatted (with metadata redacted for the environment) and
//! emitted.
//!
//! Writing is best-effort. A destination that cannot emit a line drops it;
//! nothing is ever reported back to the code that logged the message.

mod console;
mod memory;
mod platform;

pub use console::{ConsoleDestination, ConsoleDestinationBuilder, ConsoleStream};
pub use memory::{CapturedEntry, MemoryDestination};
pub use platform::PlatformDestination;

use crate::entry::LogEntry;
use crate::level::LogLevel;

/// Destination trait
///
/// Implementations must be safe to call from several threads at once; each
/// one serializes access to its own output channel.
pub trait Destination: Send + Sync {
    /// Write an entry.
    ///
    /// Entries whose level is below [`Destination::minimum_level`] must be
    /// ignored.
    fn write(&self, entry: &LogEntry, is_production: bool);

    /// Lowest level this destination accepts. Accepts everything by default.
    fn minimum_level(&self) -> LogLevel {
        LogLevel::Debug
    }

    /// Check if this destination should log the given level
    fn should_log(&self, level: LogLevel) -> bool {
        level.should_log(self.minimum_level())
    }

    /// Short name used in diagnostics
    fn name(&self) -> &str {
        "custom"
    }

    /// Flush buffered output, if any.
    fn flush(&self) {}
}
