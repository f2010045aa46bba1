//! # privlog
//!
//! Structured, privacy-aware logging facade.
//!
//! Callers emit leveled messages with optional key/value metadata. A
//! [`Logger`] fans each message out to an ordered list of destinations
//! (console, the `tracing` dispatcher, an in-memory capture for tests), and
//! every destination applies its own level filter and redacts metadata
//! according to each value's privacy tier.
//!
//! ## Features
//!
//! - Five ordered levels, from `Debug` to `Critical`
//! - Public / private / sensitive metadata values
//! - Private values hidden in production, sensitive values always hidden
//! - Synchronous, ordered fan-out; a failing destination never affects the
//!   caller or the other destinations
//! - Call-site capture through macros or `#[track_caller]`
//! - TOML configuration
//!
//! ## Example
//!
//! ```
//! use privlog::{private, public, sensitive, Logger, MemoryDestination, Metadata};
//! use std::sync::Arc;
//!
//! let memory = Arc::new(MemoryDestination::default());
//! let logger = Logger::builder()
//!     .shared_destination(memory.clone())
//!     .production(true)
//!     .build();
//!
//! logger.info(
//!     "User authenticated",
//!     Metadata::from([
//!         ("userId", public("12345")),
//!         ("email", private("user@test.com")),
//!         ("token", sensitive("abc123")),
//!     ]),
//! );
//!
//! assert_eq!(
//!     memory.lines(),
//!     vec!["[INFO] User authenticated {userId=12345, email=<private>, token=<sensitive>}"]
//! );
//! ```

pub mod config;
pub mod destination;
pub mod entry;
pub mod error;
pub mod format;
pub mod level;
pub mod logger;
mod macros;
pub mod privacy;

pub use config::{ConsoleConfig, DestinationConfig, LoggerConfig, PlatformConfig};
pub use destination::{
    CapturedEntry, ConsoleDestination, ConsoleStream, Destination, MemoryDestination,
    PlatformDestination,
};
pub use entry::{file_name, Clock, FixedClock, LogEntry, Metadata, SourceLocation, SystemClock};
pub use error::{LogError, LogResult};
pub use format::{FormatOptions, LogFormat};
pub use level::LogLevel;
pub use logger::{global, init, Logger, LoggerBuilder};
pub use privacy::{private, public, redact, sensitive, Privacy, PrivacyValue};
