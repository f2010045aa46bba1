//! The logging facade.
//!
//! A [`Logger`] owns an ordered, fixed list of destinations together with the
//! production flag and the subsystem/category tags. Each call builds exactly
//! one [`LogEntry`] and hands it to every destination in order, synchronously,
//! on the calling thread.

use crate::config::{DestinationConfig, LoggerConfig};
use crate::destination::{ConsoleDestination, Destination, PlatformDestination};
use crate::entry::{Clock, LogEntry, Metadata, SourceLocation, SystemClock};
use crate::error::{LogError, LogResult};
use crate::level::LogLevel;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, OnceLock};
use tracing::{debug, warn};

/// Default subsystem tag.
pub const DEFAULT_SUBSYSTEM: &str = "privlog";

/// Default category tag.
pub const DEFAULT_CATEGORY: &str = "Default";

/// Multi-destination logging facade.
///
/// Cloning is cheap; clones share the same destinations.
///
/// ```
/// use privlog::{private, public, ConsoleDestination, Logger, LogLevel, Metadata};
///
/// let logger = Logger::new(
///     vec![std::sync::Arc::new(ConsoleDestination::new(LogLevel::Info))],
///     true,
///     "Auth",
///     "com.example.app",
/// );
/// logger.info(
///     "User logged in",
///     Metadata::from([("userId", public("123")), ("email", private("user@example.com"))]),
/// );
/// ```
#[derive(Clone)]
pub struct Logger {
    /// Destinations, in dispatch order
    destinations: Vec<Arc<dyn Destination>>,

    /// Whether private values are redacted
    is_production: bool,

    /// Category tag
    category: String,

    /// Subsystem tag
    subsystem: String,

    /// Timestamp source
    clock: Arc<dyn Clock>,
}

impl Logger {
    /// Create a logger from its parts.
    pub fn new(
        destinations: Vec<Arc<dyn Destination>>,
        is_production: bool,
        category: impl Into<String>,
        subsystem: impl Into<String>,
    ) -> Self {
        Self {
            destinations,
            is_production,
            category: category.into(),
            subsystem: subsystem.into(),
            clock: Arc::new(SystemClock),
        }
    }

    /// Start building a logger
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::default()
    }

    /// Development logger writing every level to stdout.
    pub fn console() -> Self {
        Self::builder()
            .destination(ConsoleDestination::default())
            .build()
    }

    /// Build a logger from configuration.
    pub fn from_config(config: &LoggerConfig) -> LogResult<Self> {
        config.validate()?;

        let mut builder = Self::builder()
            .production(config.production)
            .category(config.category.clone())
            .subsystem(config.subsystem.clone());

        for destination in &config.destinations {
            builder = match destination {
                DestinationConfig::Console(console) => builder.destination(
                    ConsoleDestination::builder()
                        .minimum_level(console.level)
                        .use_timestamp(console.timestamp)
                        .use_glyph(console.glyph)
                        .use_source_location(console.source_location)
                        .format(console.format)
                        .stream(console.stream)
                        .build(),
                ),
                DestinationConfig::Platform(platform) => {
                    builder.destination(PlatformDestination::with_level(
                        config.subsystem.clone(),
                        config.category.clone(),
                        platform.level,
                    ))
                },
            };
        }

        Ok(builder.build())
    }

    /// Log a message at `level`.
    ///
    /// Destinations never report failures back; a destination that panics
    /// is skipped for this entry and the remaining destinations still
    /// receive it.
    pub fn log(
        &self,
        level: LogLevel,
        message: impl Into<String>,
        metadata: impl Into<Metadata>,
        location: SourceLocation,
    ) {
        if self.destinations.is_empty() {
            return;
        }

        let entry = LogEntry::new(message, level, metadata.into(), location, self.clock.as_ref());

        for destination in &self.destinations {
            let result = panic::catch_unwind(AssertUnwindSafe(|| {
                destination.write(&entry, self.is_production)
            }));

            if result.is_err() {
                warn!(
                    destination = destination.name(),
                    level = %entry.level(),
                    "destination panicked while writing, entry dropped for it"
                );
            }
        }
    }

    /// Log a debug message
    #[track_caller]
    pub fn debug(&self, message: impl Into<String>, metadata: impl Into<Metadata>) {
        self.log(LogLevel::Debug, message, metadata, caller());
    }

    /// Log an info message
    #[track_caller]
    pub fn info(&self, message: impl Into<String>, metadata: impl Into<Metadata>) {
        self.log(LogLevel::Info, message, metadata, caller());
    }

    /// Log a warning message
    #[track_caller]
    pub fn warning(&self, message: impl Into<String>, metadata: impl Into<Metadata>) {
        self.log(LogLevel::Warning, message, metadata, caller());
    }

    /// Log an error message
    #[track_caller]
    pub fn error(&self, message: impl Into<String>, metadata: impl Into<Metadata>) {
        self.log(LogLevel::Error, message, metadata, caller());
    }

    /// Log a critical message
    #[track_caller]
    pub fn critical(&self, message: impl Into<String>, metadata: impl Into<Metadata>) {
        self.log(LogLevel::Critical, message, metadata, caller());
    }

    /// Flush every destination
    pub fn flush(&self) {
        for destination in &self.destinations {
            let _ = panic::catch_unwind(AssertUnwindSafe(|| destination.flush()));
        }
    }

    /// A logger sharing these destinations under another category tag.
    pub fn with_category(&self, category: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            ..self.clone()
        }
    }

    /// Destinations, in dispatch order
    pub fn destinations(&self) -> &[Arc<dyn Destination>] {
        &self.destinations
    }

    /// Whether private values are redacted
    pub fn is_production(&self) -> bool {
        self.is_production
    }

    /// Category tag
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Subsystem tag
    pub fn subsystem(&self) -> &str {
        &self.subsystem
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.destinations.iter().map(|d| d.name()).collect();
        f.debug_struct("Logger")
            .field("destinations", &names)
            .field("is_production", &self.is_production)
            .field("category", &self.category)
            .field("subsystem", &self.subsystem)
            .finish()
    }
}

// The function name is not available through `#[track_caller]`; the
// logging macros fill it in with the module path instead.
#[track_caller]
fn caller() -> SourceLocation {
    let location = std::panic::Location::caller();
    SourceLocation::new(location.file(), "", location.line())
}

/// Builder for [`Logger`]
pub struct LoggerBuilder {
    destinations: Vec<Arc<dyn Destination>>,
    is_production: bool,
    category: String,
    subsystem: String,
    clock: Arc<dyn Clock>,
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self {
            destinations: Vec::new(),
            is_production: false,
            category: DEFAULT_CATEGORY.to_string(),
            subsystem: DEFAULT_SUBSYSTEM.to_string(),
            clock: Arc::new(SystemClock),
        }
    }
}

impl LoggerBuilder {
    /// Builder: append a destination
    pub fn destination(mut self, destination: impl Destination + 'static) -> Self {
        self.destinations.push(Arc::new(destination));
        self
    }

    /// Builder: append a destination the caller keeps a handle to
    pub fn shared_destination(mut self, destination: Arc<dyn Destination>) -> Self {
        self.destinations.push(destination);
        self
    }

    /// Builder: set the production flag
    pub fn production(mut self, is_production: bool) -> Self {
        self.is_production = is_production;
        self
    }

    /// Builder: set category
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Builder: set subsystem
    pub fn subsystem(mut self, subsystem: impl Into<String>) -> Self {
        self.subsystem = subsystem.into();
        self
    }

    /// Builder: set the timestamp source
    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Build the logger
    pub fn build(self) -> Logger {
        Logger {
            destinations: self.destinations,
            is_production: self.is_production,
            category: self.category,
            subsystem: self.subsystem,
            clock: self.clock,
        }
    }
}

static GLOBAL: OnceLock<Logger> = OnceLock::new();

/// Install the process-wide logger.
///
/// # Errors
///
/// Returns [`LogError::AlreadyInitialized`] if a logger was already
/// installed, or if [`global`] was called earlier and fell back to the
/// default console logger.
pub fn init(logger: Logger) -> LogResult<()> {
    let description = format!("{:?}", logger);
    GLOBAL
        .set(logger)
        .map_err(|_| LogError::AlreadyInitialized)?;
    debug!(logger = %description, "global logger installed");
    Ok(())
}

/// The process-wide logger.
///
/// Falls back to [`Logger::console`] when [`init`] was never called.
pub fn global() -> &'static Logger {
    GLOBAL.get_or_init(Logger::console)
}
