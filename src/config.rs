//! Logger configuration.
//!
//! ```toml
//! production = true
//! subsystem = "com.example.app"
//! category = "Network"
//!
//! [[destinations]]
//! type = "console"
//! level = "info"
//! glyph = false
//! source_location = true
//! stream = "stderr"
//!
//! [[destinations]]
//! type = "platform"
//! level = "warning"
//! ```

use crate::destination::ConsoleStream;
use crate::error::{LogError, LogResult};
use crate::format::LogFormat;
use crate::level::LogLevel;
use crate::logger::{DEFAULT_CATEGORY, DEFAULT_SUBSYSTEM};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable overriding [`LoggerConfig::production`].
pub const PRODUCTION_ENV: &str = "PRIVLOG_PRODUCTION";

/// Main logger configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggerConfig {
    /// Redact private values
    #[serde(default)]
    pub production: bool,

    /// Subsystem tag
    #[serde(default = "default_subsystem")]
    pub subsystem: String,

    /// Category tag
    #[serde(default = "default_category")]
    pub category: String,

    /// Destinations, in dispatch order
    #[serde(default = "default_destinations")]
    pub destinations: Vec<DestinationConfig>,
}

fn default_true() -> bool {
    true
}

fn default_subsystem() -> String {
    DEFAULT_SUBSYSTEM.to_string()
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

fn default_destinations() -> Vec<DestinationConfig> {
    vec![DestinationConfig::Console(ConsoleConfig::default())]
}

fn default_platform_level() -> LogLevel {
    LogLevel::Info
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            production: false,
            subsystem: default_subsystem(),
            category: default_category(),
            destinations: default_destinations(),
        }
    }
}

impl LoggerConfig {
    /// Create a new default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML document.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or validation fails.
    pub fn from_toml_str(content: &str) -> LogResult<Self> {
        let config: LoggerConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML is malformed
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> LogResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| LogError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml_str(&content)
    }

    /// Apply overrides from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if `PRIVLOG_PRODUCTION` is set to an unrecognized
    /// value.
    pub fn apply_env_overrides(self) -> LogResult<Self> {
        match std::env::var(PRODUCTION_ENV) {
            Ok(value) => self.apply_production_override(&value),
            Err(_) => Ok(self),
        }
    }

    fn apply_production_override(mut self, value: &str) -> LogResult<Self> {
        self.production = match value.trim().to_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" => false,
            other => {
                return Err(LogError::Validation(format!(
                    "{} must be a boolean, got '{}'",
                    PRODUCTION_ENV, other
                )))
            },
        };
        Ok(self)
    }

    /// Builder: set the production flag
    pub fn with_production(mut self, production: bool) -> Self {
        self.production = production;
        self
    }

    /// Builder: set subsystem
    pub fn with_subsystem(mut self, subsystem: impl Into<String>) -> Self {
        self.subsystem = subsystem.into();
        self
    }

    /// Builder: set category
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Builder: add destination
    pub fn with_destination(mut self, destination: DestinationConfig) -> Self {
        self.destinations.push(destination);
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> LogResult<()> {
        if self.subsystem.trim().is_empty() {
            return Err(LogError::Validation("subsystem must not be empty".to_string()));
        }
        if self.category.trim().is_empty() {
            return Err(LogError::Validation("category must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Destination configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DestinationConfig {
    /// Console line output
    Console(ConsoleConfig),
    /// `tracing` events
    Platform(PlatformConfig),
}

impl DestinationConfig {
    /// Console destination with default settings
    pub fn console() -> Self {
        Self::Console(ConsoleConfig::default())
    }

    /// Platform destination with default settings
    pub fn platform() -> Self {
        Self::Platform(PlatformConfig::default())
    }
}

/// Console destination configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsoleConfig {
    /// Minimum level
    #[serde(default)]
    pub level: LogLevel,

    /// Include the timestamp
    #[serde(default = "default_true")]
    pub timestamp: bool,

    /// Include the level glyph
    #[serde(default = "default_true")]
    pub glyph: bool,

    /// Include `file:line`
    #[serde(default)]
    pub source_location: bool,

    /// Line format
    #[serde(default)]
    pub format: LogFormat,

    /// Standard stream
    #[serde(default)]
    pub stream: ConsoleStream,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Debug,
            timestamp: true,
            glyph: true,
            source_location: false,
            format: LogFormat::Text,
            stream: ConsoleStream::Stdout,
        }
    }
}

/// Platform destination configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformConfig {
    /// Minimum level
    #[serde(default = "default_platform_level")]
    pub level: LogLevel,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            level: default_platform_level(),
        }
    }
}
