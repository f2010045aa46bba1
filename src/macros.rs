//! Logging macros that capture the call site.
//!
//! Each macro takes a logger, a message and any number of
//! `key => value` pairs, where every value is a
//! [`PrivacyValue`](crate::PrivacyValue). Metadata keeps the order in which
//! the pairs are written.
//!
//! ```
//! use privlog::{info, private, public, sensitive, Logger};
//!
//! let logger = Logger::console();
//! info!(logger, "User authenticated",
//!     "userId" => public("12345"),
//!     "email" => private("user@test.com"),
//!     "token" => sensitive("abc123"),
//! );
//! ```
//!
//! Rust has no stable way to name the enclosing function, so the function
//! slot of the captured [`SourceLocation`](crate::SourceLocation) holds the
//! module path.

/// Current call site as a [`SourceLocation`](crate::SourceLocation).
#[macro_export]
macro_rules! location {
    () => {
        $crate::SourceLocation::new(file!(), module_path!(), line!())
    };
}

/// Log at an explicit level.
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $msg:expr $(, $key:expr => $value:expr)* $(,)?) => {{
        #[allow(unused_mut)]
        let mut __metadata = $crate::Metadata::new();
        $( __metadata.insert($key, $value); )*
        $logger.log($level, $msg, __metadata, $crate::location!())
    }};
}

/// Log at `Debug`.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($rest:tt)+) => { $crate::log!($logger, $crate::LogLevel::Debug, $($rest)+) };
}

/// Log at `Info`.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($rest:tt)+) => { $crate::log!($logger, $crate::LogLevel::Info, $($rest)+) };
}

/// Log at `Warning`.
#[macro_export]
macro_rules! warning {
    ($logger:expr, $($rest:tt)+) => { $crate::log!($logger, $crate::LogLevel::Warning, $($rest)+) };
}

/// Log at `Error`.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($rest:tt)+) => { $crate::log!($logger, $crate::LogLevel::Error, $($rest)+) };
}

/// Log at `Critical`.
#[macro_export]
macro_rules! critical {
    ($logger:expr, $($rest:tt)+) => { $crate::log!($logger, $crate::LogLevel::Critical, $($rest)+) };
}
