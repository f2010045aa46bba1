//! Console destination (stdout, stderr or an injected writer).

use super::Destination;
use crate::entry::LogEntry;
use crate::format::{create_formatter, FormatOptions, LogFormat, LogFormatter};
use crate::level::LogLevel;
use serde::{Deserialize, Serialize};
use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};
use tracing::warn;

/// Standard stream a console destination writes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsoleStream {
    /// Standard output
    #[default]
    Stdout,
    /// Standard error
    Stderr,
}

impl ConsoleStream {
    fn writer(self) -> Box<dyn Write + Send> {
        match self {
            Self::Stdout => Box::new(io::stdout()),
            Self::Stderr => Box::new(io::stderr()),
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Stdout => "console:stdout",
            Self::Stderr => "console:stderr",
        }
    }
}

/// Writes one formatted line per accepted entry.
///
/// Failed writes are dropped and counted. The first failure is reported
/// through `tracing`; later ones only bump the counter.
pub struct ConsoleDestination {
    /// Minimum log level
    min_level: LogLevel,

    /// Formatter
    formatter: Box<dyn LogFormatter>,

    /// Output channel, serialized per destination
    writer: Mutex<Box<dyn Write + Send>>,

    /// Name used in diagnostics
    name: &'static str,

    /// Lines that could not be written
    failed_writes: AtomicU64,
}

impl ConsoleDestination {
    /// Stdout destination with default formatting
    pub fn new(min_level: LogLevel) -> Self {
        Self::builder().minimum_level(min_level).build()
    }

    /// Start building a console destination
    pub fn builder() -> ConsoleDestinationBuilder {
        ConsoleDestinationBuilder::default()
    }

    /// Number of lines dropped because the writer failed
    pub fn failed_writes(&self) -> u64 {
        self.failed_writes.load(Ordering::Relaxed)
    }

    fn record_failure(&self, error: &io::Error) {
        if self.failed_writes.fetch_add(1, Ordering::Relaxed) == 0 {
            warn!(
                destination = self.name,
                error = %error,
                "console destination write failed, dropping log lines"
            );
        }
    }
}

impl Default for ConsoleDestination {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Destination for ConsoleDestination {
    fn write(&self, entry: &LogEntry, is_production: bool) {
        if !self.should_log(entry.level()) {
            return;
        }

        let line = self.formatter.format(entry, is_production);

        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = writeln!(writer, "{}", line) {
            drop(writer);
            self.record_failure(&e);
        }
    }

    fn minimum_level(&self) -> LogLevel {
        self.min_level
    }

    fn name(&self) -> &str {
        self.name
    }

    fn flush(&self) {
        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = writer.flush() {
            drop(writer);
            self.record_failure(&e);
        }
    }
}

impl std::fmt::Debug for ConsoleDestination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleDestination")
            .field("name", &self.name)
            .field("min_level", &self.min_level)
            .field("format", &self.formatter.format_type())
            .field("failed_writes", &self.failed_writes())
            .finish()
    }
}

/// Builder for [`ConsoleDestination`].
///
/// Defaults: minimum level `Debug`, timestamp on, glyph on, source location
/// off, text format, stdout.
#[derive(Default)]
pub struct ConsoleDestinationBuilder {
    min_level: LogLevel,
    options: FormatOptions,
    format: LogFormat,
    stream: ConsoleStream,
    writer: Option<Box<dyn Write + Send>>,
}

impl ConsoleDestinationBuilder {
    /// Builder: set level filter
    pub fn minimum_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    /// Builder: toggle the timestamp field
    pub fn use_timestamp(mut self, enabled: bool) -> Self {
        self.options.use_timestamp = enabled;
        self
    }

    /// Builder: toggle the level glyph
    pub fn use_glyph(mut self, enabled: bool) -> Self {
        self.options.use_glyph = enabled;
        self
    }

    /// Builder: toggle the `[file:line]` field
    pub fn use_source_location(mut self, enabled: bool) -> Self {
        self.options.use_source_location = enabled;
        self
    }

    /// Builder: set all field toggles at once
    pub fn options(mut self, options: FormatOptions) -> Self {
        self.options = options;
        self
    }

    /// Builder: set format
    pub fn format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Builder: choose stdout or stderr
    pub fn stream(mut self, stream: ConsoleStream) -> Self {
        self.stream = stream;
        self
    }

    /// Builder: write to an arbitrary writer instead of a standard stream
    pub fn writer(mut self, writer: impl Write + Send + 'static) -> Self {
        self.writer = Some(Box::new(writer));
        self
    }

    /// Build the destination
    pub fn build(self) -> ConsoleDestination {
        let (writer, name) = match self.writer {
            Some(writer) => (writer, "console:writer"),
            None => (self.stream.writer(), self.stream.as_str()),
        };

        ConsoleDestination {
            min_level: self.min_level,
            formatter: create_formatter(self.format, self.options),
            writer: Mutex::new(writer),
            name,
            failed_writes: AtomicU64::new(0),
        }
    }
}
