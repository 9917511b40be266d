//! Logging macros for ergonomic event emission.
//!
//! The per-level macros take a message followed by any number of payload
//! values; each value is converted through [`PayloadValue::from`], so plain
//! strings, integers, floats, bools and `serde_json::Value`s all work
//! directly. Wrap error objects with [`PayloadValue::error`].
//!
//! [`PayloadValue::from`]: crate::PayloadValue
//! [`PayloadValue::error`]: crate::PayloadValue::error
//!
//! # Examples
//!
//! ```
//! use fanlog::prelude::*;
//! use fanlog::{error, info};
//!
//! let logger = Logger::builder().build();
//!
//! info!(logger, "Server started");
//! info!(logger, "Listening", "0.0.0.0", 8080);
//!
//! let err = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
//! error!(logger, "Write failed", PayloadValue::error(err));
//! ```

/// Build a `Vec<PayloadValue>` from any values convertible into payload
/// slots.
///
/// # Examples
///
/// ```
/// use fanlog::{payload, PayloadValue};
///
/// let values = payload!["id", 42, true];
/// assert_eq!(values.len(), 3);
///
/// let empty: Vec<PayloadValue> = payload![];
/// assert!(empty.is_empty());
/// ```
#[macro_export]
macro_rules! payload {
    () => {
        ::std::vec::Vec::<$crate::PayloadValue>::new()
    };
    ($($value:expr),+ $(,)?) => {
        ::std::vec![$($crate::PayloadValue::from($value)),+]
    };
}

/// Emit at the most verbose `Log` level.
///
/// # Examples
///
/// ```
/// # use fanlog::prelude::*;
/// # let logger = Logger::builder().build();
/// use fanlog::log;
/// log!(logger, "Simple message");
/// log!(logger, "With payload", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $msg:expr $(, $value:expr)* $(,)?) => {
        $logger.emit($crate::LogLevel::Log, $msg, $crate::payload![$($value),*])
    };
}

/// Emit a debug-level event.
///
/// # Examples
///
/// ```
/// # use fanlog::prelude::*;
/// # let logger = Logger::builder().build();
/// use fanlog::debug;
/// debug!(logger, "Cache miss", "user:42");
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $msg:expr $(, $value:expr)* $(,)?) => {
        $logger.emit($crate::LogLevel::Debug, $msg, $crate::payload![$($value),*])
    };
}

/// Emit an info-level event.
///
/// # Examples
///
/// ```
/// # use fanlog::prelude::*;
/// # let logger = Logger::builder().build();
/// use fanlog::info;
/// info!(logger, "Application started");
/// info!(logger, "Processing items", 100);
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $msg:expr $(, $value:expr)* $(,)?) => {
        $logger.emit($crate::LogLevel::Info, $msg, $crate::payload![$($value),*])
    };
}

/// Emit a warning-level event.
///
/// # Examples
///
/// ```
/// # use fanlog::prelude::*;
/// # let logger = Logger::builder().build();
/// use fanlog::warn;
/// warn!(logger, "Low disk space", "/var", 93.5);
/// ```
#[macro_export]
macro_rules! warn {
    ($logger:expr, $msg:expr $(, $value:expr)* $(,)?) => {
        $logger.emit($crate::LogLevel::Warn, $msg, $crate::payload![$($value),*])
    };
}

/// Emit an error-level event.
///
/// # Examples
///
/// ```
/// # use fanlog::prelude::*;
/// # let logger = Logger::builder().build();
/// use fanlog::error;
/// error!(logger, "Failed to connect to database");
/// error!(logger, "Request failed", 500, "Internal error");
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $msg:expr $(, $value:expr)* $(,)?) => {
        $logger.emit($crate::LogLevel::Error, $msg, $crate::payload![$($value),*])
    };
}
