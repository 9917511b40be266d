//! Main logger implementation
//!
//! The logger owns an immutable severity threshold and an ordered list of
//! transporters. An accepted call captures one event and hands it to a
//! dedicated dispatch thread over an unbounded channel, so the caller
//! returns in O(1) time regardless of sink count or sink cost.

use super::{
    captured_event::{CapturedEvent, PayloadValue},
    error::{LoggerError, Result},
    log_level::LogLevel,
    transporter::Transporter,
};
use crossbeam_channel::{unbounded, Receiver, Sender};
use std::sync::OnceLock;
use std::thread;
use std::time::Duration;

/// Default shutdown timeout for logger cleanup (5 seconds)
///
/// This timeout is used when the logger is dropped without explicit shutdown.
/// For custom timeout control, use the `shutdown()` method instead.
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

pub struct Logger {
    threshold: LogLevel,
    sender: Option<Sender<CapturedEvent>>,
    dispatch_handle: Option<thread::JoinHandle<()>>,
}

impl Logger {
    /// Create a builder for Logger
    ///
    /// # Example
    /// ```
    /// use fanlog::prelude::*;
    ///
    /// let logger = Logger::builder()
    ///     .threshold(LogLevel::Info)
    ///     .build();
    /// ```
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// The configured severity threshold. Fixed for the logger's lifetime.
    #[must_use]
    pub fn threshold(&self) -> LogLevel {
        self.threshold
    }

    /// Capture and dispatch an event at an explicit level.
    ///
    /// A call below the threshold is a side-effect-free no-op: it returns
    /// before any allocation and never touches a transporter. An accepted
    /// call builds the [`CapturedEvent`] and queues it for the dispatch
    /// thread; the caller never blocks on, and never observes, any
    /// transporter's write.
    pub fn emit(&self, level: LogLevel, message: impl Into<String>, payload: Vec<PayloadValue>) {
        if !self.threshold.allows(level) {
            return;
        }

        let event = CapturedEvent::new(level, message.into(), payload);
        if let Some(ref sender) = self.sender {
            // Unbounded queue: send never blocks. A disconnected channel
            // means the logger is shutting down; the event is discarded.
            let _ = sender.send(event);
        }
    }

    #[inline]
    pub fn log(&self, message: impl Into<String>) {
        self.emit(LogLevel::Log, message, Vec::new());
    }

    #[inline]
    pub fn debug(&self, message: impl Into<String>) {
        self.emit(LogLevel::Debug, message, Vec::new());
    }

    #[inline]
    pub fn info(&self, message: impl Into<String>) {
        self.emit(LogLevel::Info, message, Vec::new());
    }

    #[inline]
    pub fn warn(&self, message: impl Into<String>) {
        self.emit(LogLevel::Warn, message, Vec::new());
    }

    #[inline]
    pub fn error(&self, message: impl Into<String>) {
        self.emit(LogLevel::Error, message, Vec::new());
    }

    /// Log at the `Log` level with extra payload values.
    pub fn log_with(&self, message: impl Into<String>, payload: Vec<PayloadValue>) {
        self.emit(LogLevel::Log, message, payload);
    }

    pub fn debug_with(&self, message: impl Into<String>, payload: Vec<PayloadValue>) {
        self.emit(LogLevel::Debug, message, payload);
    }

    pub fn info_with(&self, message: impl Into<String>, payload: Vec<PayloadValue>) {
        self.emit(LogLevel::Info, message, payload);
    }

    pub fn warn_with(&self, message: impl Into<String>, payload: Vec<PayloadValue>) {
        self.emit(LogLevel::Warn, message, payload);
    }

    pub fn error_with(&self, message: impl Into<String>, payload: Vec<PayloadValue>) {
        self.emit(LogLevel::Error, message, payload);
    }

    /// Gracefully shutdown the logger with a custom timeout
    ///
    /// Closes the dispatch channel and waits for the dispatch thread to
    /// drain pending events. Transporters are dropped on the dispatch
    /// thread as it exits, which gives each sink its final-flush
    /// opportunity.
    ///
    /// Returns `true` if shutdown completed within the timeout.
    pub fn shutdown(&mut self, timeout: Duration) -> bool {
        drop(self.sender.take());
        self.join_dispatch(timeout)
    }

    fn join_dispatch(&mut self, timeout: Duration) -> bool {
        if let Some(handle) = self.dispatch_handle.take() {
            let start = std::time::Instant::now();

            loop {
                if handle.is_finished() {
                    if let Err(e) = handle.join() {
                        eprintln!(
                            "[LOGGER ERROR] Dispatch thread panicked during shutdown: {:?}",
                            e
                        );
                        return false;
                    }
                    break;
                }

                if start.elapsed() >= timeout {
                    eprintln!(
                        "[LOGGER WARNING] Dispatch thread did not finish within timeout. \
                         Some logs may be lost."
                    );
                    return false;
                }

                // Small sleep to avoid busy-waiting
                thread::sleep(Duration::from_millis(10));
            }
        }

        true
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        // Close the channel first so the dispatch thread drains pending
        // events and exits.
        drop(self.sender.take());
        self.join_dispatch(DEFAULT_SHUTDOWN_TIMEOUT);
    }
}

/// Dispatch loop run on the dedicated thread.
///
/// Walks the configured transporter list in order for every drained event.
/// Each transporter's `write` is isolated with `catch_unwind` so one
/// panicking sink cannot take out its siblings or the loop itself; failures
/// surface as best-effort stderr diagnostics only.
fn dispatch_loop(receiver: Receiver<CapturedEvent>, mut transporters: Vec<Box<dyn Transporter>>) {
    while let Ok(event) = receiver.recv() {
        for transporter in transporters.iter_mut() {
            let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                transporter.write(&event, event.level)
            }));

            if outcome.is_err() {
                eprintln!(
                    "[LOGGER CRITICAL] Transporter '{}' panicked while writing. \
                     Other transporters continue to function.",
                    transporter.name()
                );
            }
        }
    }
    // Channel disconnected: dropping the transporters here lets each sink
    // flush its remaining state.
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use fanlog::prelude::*;
///
/// let logger = Logger::builder()
///     .threshold(LogLevel::Debug)
///     .transporter(ConsoleTransporter::new())
///     .build();
/// ```
pub struct LoggerBuilder {
    threshold: LogLevel,
    transporters: Vec<Box<dyn Transporter>>,
}

impl LoggerBuilder {
    /// Create a new builder; the default threshold is the most verbose
    /// level.
    pub fn new() -> Self {
        Self {
            threshold: LogLevel::default(),
            transporters: Vec::new(),
        }
    }

    /// Set the severity threshold
    #[must_use = "builder methods return a new value"]
    pub fn threshold(mut self, level: LogLevel) -> Self {
        self.threshold = level;
        self
    }

    /// Add a transporter. Dispatch order follows insertion order.
    #[must_use = "builder methods return a new value"]
    pub fn transporter<T: Transporter + 'static>(mut self, transporter: T) -> Self {
        self.transporters.push(Box::new(transporter));
        self
    }

    /// Add a transporter that may be absent; `None` entries are skipped.
    #[must_use = "builder methods return a new value"]
    pub fn maybe_transporter(mut self, transporter: Option<Box<dyn Transporter>>) -> Self {
        if let Some(transporter) = transporter {
            self.transporters.push(transporter);
        }
        self
    }

    /// Build the Logger, spawning its dispatch thread. The threshold and
    /// transporter list are immutable from here on.
    pub fn build(self) -> Logger {
        let (sender, receiver) = unbounded();
        let transporters = self.transporters;
        let handle = thread::spawn(move || dispatch_loop(receiver, transporters));

        Logger {
            threshold: self.threshold,
            sender: Some(sender),
            dispatch_handle: Some(handle),
        }
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

static GLOBAL_LOGGER: OnceLock<Logger> = OnceLock::new();

/// Install the process-wide logger handle. Call once at startup, after
/// environment inspection has decided the configuration; a second call is a
/// configuration error.
pub fn init(logger: Logger) -> Result<()> {
    GLOBAL_LOGGER
        .set(logger)
        .map_err(|_| LoggerError::AlreadyInitialized)
}

/// The process-wide logger handle, if [`init`] has run.
pub fn global() -> Option<&'static Logger> {
    GLOBAL_LOGGER.get()
}

#[cfg(feature = "console")]
impl Logger {
    /// Build a logger from environment inspection.
    ///
    /// `FANLOG_LEVEL` sets the threshold (default: most verbose).
    /// `FANLOG_ENV=production` selects the batching network transporter
    /// delivering to `FANLOG_ENDPOINT`; `FANLOG_DEBUG=1` (or `true`)
    /// overrides that back to the verbose console configuration. Malformed
    /// configuration fails fast here rather than at log time.
    pub fn from_env() -> Result<Logger> {
        use crate::transporters::{ConsoleTransporter, HttpTransporter, TcpDelivery};

        let threshold = match std::env::var("FANLOG_LEVEL") {
            Ok(raw) => raw
                .parse::<LogLevel>()
                .map_err(|e| LoggerError::config("Logger", e))?,
            Err(_) => LogLevel::default(),
        };

        let debug_mode = std::env::var("FANLOG_DEBUG")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);
        let production = !debug_mode
            && std::env::var("FANLOG_ENV")
                .map(|v| v == "production")
                .unwrap_or(false);

        let builder = Logger::builder().threshold(threshold);
        let builder = if production {
            let endpoint = std::env::var("FANLOG_ENDPOINT").map_err(|_| {
                LoggerError::config("HttpTransporter", "FANLOG_ENDPOINT not set")
            })?;
            builder.transporter(HttpTransporter::new(TcpDelivery::connect(endpoint.as_str())?))
        } else {
            builder.transporter(ConsoleTransporter::new())
        };

        Ok(builder.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::captured_event::LogMessage;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct Counting {
        writes: Arc<AtomicUsize>,
    }

    impl Transporter for Counting {
        fn do_write(&mut self, _payload: LogMessage, _level: LogLevel) {
            self.writes.fetch_add(1, Ordering::SeqCst);
        }

        fn name(&self) -> &str {
            "counting"
        }
    }

    #[test]
    fn test_builder_defaults() {
        let logger = Logger::builder().build();
        assert_eq!(logger.threshold(), LogLevel::Log);
    }

    #[test]
    fn test_builder_threshold() {
        let logger = Logger::builder().threshold(LogLevel::Warn).build();
        assert_eq!(logger.threshold(), LogLevel::Warn);
    }

    #[test]
    fn test_maybe_transporter_skips_none() {
        let writes = Arc::new(AtomicUsize::new(0));
        let mut logger = Logger::builder()
            .maybe_transporter(None)
            .maybe_transporter(Some(Box::new(Counting {
                writes: Arc::clone(&writes),
            })))
            .build();

        logger.error("boom");
        assert!(logger.shutdown(DEFAULT_SHUTDOWN_TIMEOUT));
        assert_eq!(writes.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_filtered_call_touches_no_transporter() {
        let writes = Arc::new(AtomicUsize::new(0));
        let mut logger = Logger::builder()
            .threshold(LogLevel::Error)
            .transporter(Counting {
                writes: Arc::clone(&writes),
            })
            .build();

        logger.log("a");
        logger.debug("b");
        logger.info("c");
        logger.warn("d");
        assert!(logger.shutdown(DEFAULT_SHUTDOWN_TIMEOUT));
        assert_eq!(writes.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_shutdown_drains_pending_events() {
        let writes = Arc::new(AtomicUsize::new(0));
        let mut logger = Logger::builder()
            .transporter(Counting {
                writes: Arc::clone(&writes),
            })
            .build();

        for _ in 0..100 {
            logger.info("message");
        }
        assert!(logger.shutdown(DEFAULT_SHUTDOWN_TIMEOUT));
        assert_eq!(writes.load(Ordering::SeqCst), 100);
    }

    #[test]
    fn test_logger_without_transporters() {
        let logger = Logger::builder().build();
        logger.log("no sinks configured");
        logger.error("still fine");
    }
}
