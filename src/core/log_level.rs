//! Log level definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Severity of a log event, doubling as the logger's verbosity threshold.
///
/// `Error` is the most restrictive level (always emitted), `Log` the most
/// verbose. The numeric assignment is fixed: a level also serves as the
/// configured threshold, and an event is emitted iff `threshold >= level`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[derive(Default)]
pub enum LogLevel {
    Error = 1,
    Warn = 2,
    Info = 3,
    Debug = 4,
    #[default]
    Log = 5,
}

impl LogLevel {
    /// All five levels, most restrictive first.
    pub const ALL: [LogLevel; 5] = [
        LogLevel::Error,
        LogLevel::Warn,
        LogLevel::Info,
        LogLevel::Debug,
        LogLevel::Log,
    ];

    /// Whether an event at `event_level` passes a threshold of `self`.
    ///
    /// # Examples
    ///
    /// ```
    /// use fanlog::LogLevel;
    ///
    /// assert!(LogLevel::Log.allows(LogLevel::Debug));
    /// assert!(LogLevel::Error.allows(LogLevel::Error));
    /// assert!(!LogLevel::Error.allows(LogLevel::Warn));
    /// ```
    #[inline]
    #[must_use]
    pub fn allows(self, event_level: LogLevel) -> bool {
        self >= event_level
    }

    pub fn to_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
            LogLevel::Log => "LOG",
        }
    }

    #[cfg(feature = "console")]
    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            LogLevel::Error => Red,
            LogLevel::Warn => Yellow,
            LogLevel::Info => Green,
            LogLevel::Debug => Blue,
            LogLevel::Log => BrightBlack,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "ERROR" => Ok(LogLevel::Error),
            "WARN" | "WARNING" => Ok(LogLevel::Warn),
            "INFO" => Ok(LogLevel::Info),
            "DEBUG" => Ok(LogLevel::Debug),
            "LOG" => Ok(LogLevel::Log),
            _ => Err(format!("Invalid log level: '{}'", s)),
        }
    }
}
