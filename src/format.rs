//! Rendering log entries to text lines.

use crate::entry::LogEntry;
use serde::{Deserialize, Serialize};

/// Timestamp layout used by the console format (`YYYY-MM-DD HH:mm:ss.SSS`).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Output format of a line-oriented destination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-oriented console line
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

impl LogFormat {
    /// Convert to string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Json => "json",
        }
    }
}

/// Which optional fields a formatter includes.
///
/// The relative order of fields is fixed; these flags only switch fields on
/// or off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatOptions {
    /// Leading `[timestamp]`
    pub use_timestamp: bool,
    /// Level glyph before the level name
    pub use_glyph: bool,
    /// `[file:line]` after the level name
    pub use_source_location: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            use_timestamp: true,
            use_glyph: true,
            use_source_location: false,
        }
    }
}

/// Log formatter trait
pub trait LogFormatter: Send + Sync {
    /// Render an entry, redacting metadata for the given environment.
    fn format(&self, entry: &LogEntry, is_production: bool) -> String;

    /// Get the format type
    fn format_type(&self) -> LogFormat;
}

/// Console line formatter.
///
/// Produces, in order and separated by single spaces: `[timestamp]`, glyph,
/// `[LEVEL]`, `[file:line]`, message and a `{key=value, ...}` block. The
/// metadata block is left out when there is no metadata.
#[derive(Debug, Default)]
pub struct TextFormatter {
    options: FormatOptions,
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new(options: FormatOptions) -> Self {
        Self { options }
    }

    /// Enabled fields
    pub fn options(&self) -> FormatOptions {
        self.options
    }
}

impl LogFormatter for TextFormatter {
    fn format(&self, entry: &LogEntry, is_production: bool) -> String {
        let mut parts = Vec::with_capacity(6);

        if self.options.use_timestamp {
            parts.push(format!("[{}]", entry.timestamp().format(TIMESTAMP_FORMAT)));
        }

        if self.options.use_glyph {
            parts.push(entry.level().glyph().to_string());
        }

        parts.push(format!("[{}]", entry.level().as_str()));

        if self.options.use_source_location {
            parts.push(format!("[{}:{}]", entry.file_name(), entry.line()));
        }

        parts.push(entry.message().to_string());

        if !entry.metadata().is_empty() {
            parts.push(format!(
                "{{{}}}",
                entry.metadata().to_redacted_string(is_production)
            ));
        }

        parts.join(" ")
    }

    fn format_type(&self) -> LogFormat {
        LogFormat::Text
    }
}

/// JSON line formatter.
///
/// Metadata values are redacted before they are placed in the object.
#[derive(Debug, Default)]
pub struct JsonFormatter {
    options: FormatOptions,
}

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new(options: FormatOptions) -> Self {
        Self { options }
    }
}

impl LogFormatter for JsonFormatter {
    fn format(&self, entry: &LogEntry, is_production: bool) -> String {
        let mut object = serde_json::Map::new();

        if self.options.use_timestamp {
            object.insert(
                "timestamp".to_string(),
                entry.timestamp().format(TIMESTAMP_FORMAT).to_string().into(),
            );
        }

        object.insert("level".to_string(), entry.level().as_str().into());

        if self.options.use_source_location {
            object.insert("file".to_string(), entry.file_name().into());
            object.insert("line".to_string(), entry.line().into());
        }

        object.insert("message".to_string(), entry.message().into());

        if !entry.metadata().is_empty() {
            let fields: serde_json::Map<String, serde_json::Value> = entry
                .metadata()
                .redacted(is_production)
                .map(|(k, v)| (k.to_string(), serde_json::Value::String(v.into_owned())))
                .collect();
            object.insert("metadata".to_string(), serde_json::Value::Object(fields));
        }

        serde_json::Value::Object(object).to_string()
    }

    fn format_type(&self) -> LogFormat {
        LogFormat::Json
    }
}

/// Create a formatter for the given format type
pub fn create_formatter(format: LogFormat, options: FormatOptions) -> Box<dyn LogFormatter> {
    match format {
        LogFormat::Text => Box::new(TextFormatter::new(options)),
        LogFormat::Json => Box::new(JsonFormatter::new(options)),
    }
}
