//! Platform log destination backed by `tracing`.
//!
//! Entries become `tracing` events, so whatever subscriber the host process
//! installs (journald, OpenTelemetry, fmt, ...) receives them together with
//! the subsystem and category tags. Metadata is redacted before it leaves
//! this crate.

use super::Destination;
use crate::entry::LogEntry;
use crate::level::LogLevel;

/// Event target used for every forwarded entry.
pub const PLATFORM_TARGET: &str = "privlog";

/// Forwards entries to the `tracing` dispatcher.
#[derive(Debug, Clone)]
pub struct PlatformDestination {
    /// Minimum log level
    min_level: LogLevel,

    /// Subsystem tag
    subsystem: String,

    /// Category tag
    category: String,
}

impl PlatformDestination {
    /// Create a platform destination accepting `Info` and above
    pub fn new(subsystem: impl Into<String>, category: impl Into<String>) -> Self {
        Self::with_level(subsystem, category, LogLevel::Info)
    }

    /// Create a platform destination with an explicit minimum level
    pub fn with_level(
        subsystem: impl Into<String>,
        category: impl Into<String>,
        min_level: LogLevel,
    ) -> Self {
        Self {
            min_level,
            subsystem: subsystem.into(),
            category: category.into(),
        }
    }

    /// Subsystem tag
    pub fn subsystem(&self) -> &str {
        &self.subsystem
    }

    /// Category tag
    pub fn category(&self) -> &str {
        &self.category
    }
}

impl Destination for PlatformDestination {
    fn write(&self, entry: &LogEntry, is_production: bool) {
        if !self.should_log(entry.level()) {
            return;
        }

        let subsystem = self.subsystem.as_str();
        let category = self.category.as_str();
        let file = entry.file_name();
        let line = entry.line();
        let metadata = (!entry.metadata().is_empty())
            .then(|| entry.metadata().to_redacted_string(is_production));
        let metadata = metadata.as_deref();
        let glyph = entry.level().glyph();
        let message = entry.message();

        match entry.level() {
            LogLevel::Debug => tracing::debug!(
                target: PLATFORM_TARGET,
                subsystem, category, file, line, metadata,
                "{} {}", glyph, message
            ),
            LogLevel::Info => tracing::info!(
                target: PLATFORM_TARGET,
                subsystem, category, file, line, metadata,
                "{} {}", glyph, message
            ),
            LogLevel::Warning => tracing::warn!(
                target: PLATFORM_TARGET,
                subsystem, category, file, line, metadata,
                "{} {}", glyph, message
            ),
            LogLevel::Error => tracing::error!(
                target: PLATFORM_TARGET,
                subsystem, category, file, line, metadata,
                "{} {}", glyph, message
            ),
            // tracing has no level above ERROR
            LogLevel::Critical => tracing::error!(
                target: PLATFORM_TARGET,
                critical = true,
                subsystem, category, file, line, metadata,
                "{} {}", glyph, message
            ),
        }
    }

    fn minimum_level(&self) -> LogLevel {
        self.min_level
    }

    fn name(&self) -> &str {
        "platform"
    }
}
