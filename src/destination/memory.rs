//! In-memory destination for tests.

use super::Destination;
use crate::entry::LogEntry;
use crate::format::{FormatOptions, LogFormatter, TextFormatter};
use crate::level::LogLevel;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// One accepted write as seen by a [`MemoryDestination`].
#[derive(Debug, Clone)]
pub struct CapturedEntry {
    /// Copy of the entry
    pub entry: LogEntry,
    /// Production flag passed with the write
    pub is_production: bool,
    /// Text rendering with metadata redacted
    pub line: String,
}

#[derive(Debug, Default)]
struct MemoryState {
    captured: Vec<CapturedEntry>,
    write_calls: usize,
}

/// Captures accepted entries and counts every `write` call.
///
/// The rendered line omits timestamp and glyph unless other options are
/// given, so assertions on it do not depend on the clock.
#[derive(Debug)]
pub struct MemoryDestination {
    /// Minimum log level
    min_level: LogLevel,

    /// Formatter for captured lines
    formatter: TextFormatter,

    /// Captured state
    state: Mutex<MemoryState>,
}

impl MemoryDestination {
    /// Create a new memory destination
    pub fn new(min_level: LogLevel) -> Self {
        Self::with_options(
            min_level,
            FormatOptions {
                use_timestamp: false,
                use_glyph: false,
                use_source_location: false,
            },
        )
    }

    /// Create a memory destination rendering lines with the given fields
    pub fn with_options(min_level: LogLevel, options: FormatOptions) -> Self {
        Self {
            min_level,
            formatter: TextFormatter::new(options),
            state: Mutex::new(MemoryState::default()),
        }
    }

    fn state(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Every accepted write
    pub fn captured(&self) -> Vec<CapturedEntry> {
        self.state().captured.clone()
    }

    /// Accepted entries, in arrival order
    pub fn entries(&self) -> Vec<LogEntry> {
        self.state().captured.iter().map(|c| c.entry.clone()).collect()
    }

    /// Rendered lines, in arrival order
    pub fn lines(&self) -> Vec<String> {
        self.state().captured.iter().map(|c| c.line.clone()).collect()
    }

    /// Levels of accepted entries, in arrival order
    pub fn levels(&self) -> Vec<LogLevel> {
        self.state().captured.iter().map(|c| c.entry.level()).collect()
    }

    /// Most recent accepted entry
    pub fn last(&self) -> Option<CapturedEntry> {
        self.state().captured.last().cloned()
    }

    /// Get accepted entry count
    pub fn count(&self) -> usize {
        self.state().captured.len()
    }

    /// Number of `write` calls, including filtered ones
    pub fn write_calls(&self) -> usize {
        self.state().write_calls
    }

    /// Forget everything captured so far
    pub fn clear(&self) {
        let mut state = self.state();
        state.captured.clear();
        state.write_calls = 0;
    }
}

impl Default for MemoryDestination {
    fn default() -> Self {
        Self::new(LogLevel::Debug)
    }
}

impl Destination for MemoryDestination {
    fn write(&self, entry: &LogEntry, is_production: bool) {
        let mut state = self.state();
        state.write_calls += 1;

        if !self.should_log(entry.level()) {
            return;
        }

        let line = self.formatter.format(entry, is_production);
        state.captured.push(CapturedEntry {
            entry: entry.clone(),
            is_production,
            line,
        });
    }

    fn minimum_level(&self) -> LogLevel {
        self.min_level
    }

    fn name(&self) -> &str {
        "memory"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::{Metadata, SourceLocation, SystemClock};
    use crate::privacy::{private, sensitive};

    fn entry(level: LogLevel) -> LogEntry {
        LogEntry::new(
            format!("{} message", level),
            level,
            Metadata::new(),
            SourceLocation::new("a.rs", "f", 1),
            &SystemClock,
        )
    }

    #[test]
    fn test_memory_output() {
        let output = MemoryDestination::default();

        output.write(&entry(LogLevel::Info), false);
        output.write(&entry(LogLevel::Debug), false);

        assert_eq!(output.count(), 2);
        assert_eq!(output.lines()[0], "[INFO] INFO message");
        assert_eq!(output.name(), "memory");
    }

    #[test]
    fn test_memory_output_level_filter() {
        let output = MemoryDestination::new(LogLevel::Warning);

        output.write(&entry(LogLevel::Info), false);
        output.write(&entry(LogLevel::Warning), false);
        output.write(&entry(LogLevel::Error), false);

        assert_eq!(output.levels(), vec![LogLevel::Warning, LogLevel::Error]);
        assert_eq!(output.write_calls(), 3);
    }

    #[test]
    fn test_memory_output_records_environment() {
        let output = MemoryDestination::default();
        let entry = LogEntry::new(
            "signup",
            LogLevel::Info,
            Metadata::from([("email", private("a@b.com")), ("pin", sensitive("1234"))]),
            SourceLocation::new("a.rs", "f", 1),
            &SystemClock,
        );

        output.write(&entry, true);

        let captured = output.last().unwrap();
        assert!(captured.is_production);
        assert_eq!(captured.entry, entry);
        assert_eq!(captured.line, "[INFO] signup {email=<private>, pin=<sensitive>}");
    }

    #[test]
    fn test_memory_output_clear() {
        let output = MemoryDestination::default();

        output.write(&entry(LogLevel::Info), false);
        assert_eq!(output.count(), 1);

        output.clear();
        assert_eq!(output.count(), 0);
        assert_eq!(output.write_calls(), 0);
        assert!(output.last().is_none());
        assert!(output.entries().is_empty());
    }
}
