//! Structured log entries and the values they are built from.

use crate::level::LogLevel;
use crate::privacy::PrivacyValue;
use chrono::{DateTime, Utc};
use std::borrow::Cow;

/// Where a log call was made.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceLocation {
    /// Source file path as given by the caller
    pub file: String,
    /// Enclosing function or module path
    pub function: String,
    /// Line number
    pub line: u32,
}

impl SourceLocation {
    /// Create a source location
    pub fn new(file: impl Into<String>, function: impl Into<String>, line: u32) -> Self {
        Self {
            file: file.into(),
            function: function.into(),
            line,
        }
    }

    /// File name without its directory.
    pub fn file_name(&self) -> &str {
        file_name(&self.file)
    }
}

/// Last component of a path.
///
/// Both `/` and `\` count as separators. A string without a separator is
/// returned unchanged, including the empty string.
pub fn file_name(path: &str) -> &str {
    match path.rfind(['/', '\\']) {
        Some(idx) => &path[idx + 1..],
        None => path,
    }
}

/// Key/value metadata attached to a log entry.
///
/// Keys are unique. Iteration follows insertion order; inserting an existing
/// key replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Metadata {
    pairs: Vec<(String, PrivacyValue)>,
}

impl Metadata {
    /// Create empty metadata
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, returning the previous value for the key.
    pub fn insert(&mut self, key: impl Into<String>, value: PrivacyValue) -> Option<PrivacyValue> {
        let key = key.into();
        match self.pairs.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.pairs.push((key, value));
                None
            },
        }
    }

    /// Builder: add a value
    pub fn with(mut self, key: impl Into<String>, value: PrivacyValue) -> Self {
        self.insert(key, value);
        self
    }

    /// Look up a value by key
    pub fn get(&self, key: &str) -> Option<&PrivacyValue> {
        self.pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether there are no entries
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Iterate over entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PrivacyValue)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Keys in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.pairs.iter().map(|(k, _)| k.as_str())
    }

    /// Entries with every value passed through the redaction policy.
    pub fn redacted(&self, is_production: bool) -> impl Iterator<Item = (&str, Cow<'_, str>)> {
        self.pairs
            .iter()
            .map(move |(k, v)| (k.as_str(), v.redacted(is_production)))
    }

    /// `key=value` pairs joined by `", "`, values redacted.
    pub fn to_redacted_string(&self, is_production: bool) -> String {
        self.redacted(is_production)
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl<K: Into<String>> FromIterator<(K, PrivacyValue)> for Metadata {
    fn from_iter<I: IntoIterator<Item = (K, PrivacyValue)>>(iter: I) -> Self {
        let mut metadata = Metadata::new();
        for (key, value) in iter {
            metadata.insert(key, value);
        }
        metadata
    }
}

impl<K: Into<String>, const N: usize> From<[(K, PrivacyValue); N]> for Metadata {
    fn from(pairs: [(K, PrivacyValue); N]) -> Self {
        pairs.into_iter().collect()
    }
}

/// Source of timestamps for new entries.
pub trait Clock: Send + Sync {
    /// Current time
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that always returns the same instant (for deterministic output).
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// An immutable record of one log event.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    message: String,
    level: LogLevel,
    metadata: Metadata,
    timestamp: DateTime<Utc>,
    location: SourceLocation,
}

impl LogEntry {
    /// Build an entry, stamping it with `clock.now()`.
    ///
    /// The metadata is moved into the entry, so later changes to any copy
    /// the caller kept are not observed.
    pub fn new(
        message: impl Into<String>,
        level: LogLevel,
        metadata: Metadata,
        location: SourceLocation,
        clock: &dyn Clock,
    ) -> Self {
        Self {
            message: message.into(),
            level,
            metadata,
            timestamp: clock.now(),
            location,
        }
    }

    /// Log message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Severity
    pub fn level(&self) -> LogLevel {
        self.level
    }

    /// Attached metadata
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// When the entry was created
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Call site
    pub fn location(&self) -> &SourceLocation {
        &self.location
    }

    /// File name of the call site without its directory
    pub fn file_name(&self) -> &str {
        self.location.file_name()
    }

    /// Line of the call site
    pub fn line(&self) -> u32 {
        self.location.line
    }
}
