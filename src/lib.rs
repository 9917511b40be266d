//! # fanlog
//!
//! A pluggable application logger: callers emit leveled log events, the
//! logger filters by configured severity, captures a normalized record, and
//! fans it out to one or more transporters without blocking the caller.
//!
//! ## Features
//!
//! - **Deferred fan-out**: log calls return before any sink runs; caller
//!   latency is O(1) in sink count
//! - **Pluggable transporters**: console, debounced batching network sink,
//!   or any custom [`Transporter`]
//! - **Template seam**: each transporter projects the captured event into
//!   its own wire shape
//! - **Failure isolation**: a failing sink never reaches the caller or its
//!   sibling sinks

pub mod core;
pub mod macros;
pub mod transporters;

pub mod prelude {
    pub use crate::core::{
        global, init, CapturedEvent, LogLevel, LogMessage, Logger, LoggerBuilder, LoggerError,
        PayloadValue, Result, Template, Transporter, DEFAULT_SHUTDOWN_TIMEOUT,
    };
    pub use crate::transporters::{Delivery, HttpTransporter, LogBatch, DEFAULT_QUIET_INTERVAL};

    #[cfg(feature = "console")]
    pub use crate::transporters::ConsoleTransporter;
}

pub use crate::core::{
    global, init, CapturedEvent, LogLevel, LogMessage, Logger, LoggerBuilder, LoggerError,
    PayloadValue, Result, Template, Transporter, DEFAULT_SHUTDOWN_TIMEOUT,
};
pub use crate::transporters::{
    Delivery, HttpTransporter, LogBatch, TcpDelivery, DEFAULT_QUIET_INTERVAL,
};

#[cfg(feature = "console")]
pub use crate::transporters::ConsoleTransporter;
