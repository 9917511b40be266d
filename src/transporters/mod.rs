//! Transporter implementations

pub mod http;
pub mod tcp;

#[cfg(feature = "console")]
pub mod console;

pub use http::{Delivery, HttpTransporter, LogBatch, DEFAULT_QUIET_INTERVAL};
pub use tcp::TcpDelivery;

#[cfg(feature = "console")]
pub use console::{stream_for, ConsoleStream, ConsoleTransporter};

// Re-export the contract next to its implementations
pub use crate::core::Transporter;
