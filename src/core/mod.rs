//! Core logger types and traits

pub mod captured_event;
pub mod error;
pub mod log_level;
pub mod logger;
pub mod transporter;

pub use captured_event::{CapturedEvent, LogMessage, PayloadValue};
pub use error::{LoggerError, Result};
pub use log_level::LogLevel;
pub use logger::{global, init, Logger, LoggerBuilder, DEFAULT_SHUTDOWN_TIMEOUT};
pub use transporter::{Template, Transporter};
