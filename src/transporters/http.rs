//! Batching network transporter
//!
//! Accepts individual templated entries at arbitrary, possibly bursty,
//! rates and delivers them to a remote endpoint in coalesced batches.
//! Windowing is debounce-style: the open window closes only once no new
//! entry has arrived for a full quiet interval, so rapid-fire entries keep
//! extending the window and an idle sink produces no windows at all.
//! Delivery failures are caught at the flush boundary, reported, and
//! swallowed; they are never retried and never reach the caller.

use crate::core::{LogLevel, LogMessage, Result, Template, Transporter};
use crossbeam_channel::{unbounded, Receiver, RecvTimeoutError, Sender};
use serde::Serialize;
use std::thread;
use std::time::Duration;

/// Quiet interval that closes an open window (1500 ms).
pub const DEFAULT_QUIET_INTERVAL: Duration = Duration::from_millis(1500);

/// One queued entry; lives only inside the batching window.
#[derive(Debug, Clone, Serialize)]
pub struct LogBatch {
    pub level: LogLevel,
    pub payload: LogMessage,
}

/// Opaque "POST-like" send capability the batching transporter delivers
/// through. The transporter fixes what is sent and when; the wire mechanism
/// is the implementor's business.
///
/// Closures work directly:
///
/// ```
/// use fanlog::transporters::{Delivery, LogBatch};
///
/// let mut sent = 0usize;
/// let mut delivery = move |batch: &[LogBatch]| -> fanlog::Result<()> {
///     sent += batch.len();
///     Ok(())
/// };
/// let _: &mut dyn Delivery = &mut delivery;
/// ```
pub trait Delivery: Send {
    /// Send one flushed batch. An error is reported and the batch dropped;
    /// the transporter never retries it.
    fn deliver(&mut self, batch: &[LogBatch]) -> Result<()>;
}

impl<F> Delivery for F
where
    F: FnMut(&[LogBatch]) -> Result<()> + Send,
{
    fn deliver(&mut self, batch: &[LogBatch]) -> Result<()> {
        self(batch)
    }
}

/// Batching transporter: `do_write` appends to the current window and
/// returns immediately; a worker thread owns the window, the quiet-interval
/// timer and the single in-flight delivery.
pub struct HttpTransporter {
    template: Option<Template>,
    sender: Option<Sender<LogBatch>>,
    worker: Option<thread::JoinHandle<()>>,
}

impl HttpTransporter {
    /// Create a transporter with the default 1500 ms quiet interval.
    pub fn new<D: Delivery + 'static>(delivery: D) -> Self {
        Self::with_quiet_interval(delivery, DEFAULT_QUIET_INTERVAL)
    }

    /// Create a transporter with a custom quiet interval.
    pub fn with_quiet_interval<D: Delivery + 'static>(
        delivery: D,
        quiet_interval: Duration,
    ) -> Self {
        let (sender, receiver) = unbounded();
        let delivery: Box<dyn Delivery> = Box::new(delivery);
        let worker = thread::spawn(move || batch_loop(receiver, delivery, quiet_interval));

        Self {
            template: None,
            sender: Some(sender),
            worker: Some(worker),
        }
    }

    /// Override the default identity-projection template.
    #[must_use]
    pub fn with_template(mut self, template: Template) -> Self {
        self.template = Some(template);
        self
    }
}

impl Transporter for HttpTransporter {
    /// Appends the entry to the current accumulating window. Never blocks,
    /// never fails visibly.
    fn do_write(&mut self, payload: LogMessage, level: LogLevel) {
        if let Some(ref sender) = self.sender {
            let _ = sender.send(LogBatch { level, payload });
        }
    }

    fn template(&self) -> Option<&Template> {
        self.template.as_ref()
    }

    fn name(&self) -> &str {
        "http"
    }
}

impl Drop for HttpTransporter {
    fn drop(&mut self) {
        // Close the channel so the worker flushes any residual window and
        // exits.
        drop(self.sender.take());

        if let Some(worker) = self.worker.take() {
            let start = std::time::Instant::now();
            let timeout = crate::core::DEFAULT_SHUTDOWN_TIMEOUT;

            loop {
                if worker.is_finished() {
                    if let Err(e) = worker.join() {
                        eprintln!(
                            "[LOGGER ERROR] Batch worker panicked during shutdown: {:?}",
                            e
                        );
                    }
                    break;
                }

                if start.elapsed() >= timeout {
                    eprintln!(
                        "[LOGGER WARNING] Batch worker did not finish within {:?} timeout. \
                         A pending batch may be lost.",
                        timeout
                    );
                    break;
                }

                thread::sleep(Duration::from_millis(10));
            }
        }
    }
}

/// Worker loop: Accumulating while entries arrive, Windowing once the
/// channel stays quiet, Flushing when the timer fires.
///
/// An empty window blocks on `recv` so no timer exists until an entry
/// arrives; with a non-empty window every arrival restarts the quiet
/// timer. Delivery runs synchronously here, which bounds the stream to one
/// in-flight request; entries arriving meanwhile queue up for the next
/// window.
fn batch_loop(
    receiver: Receiver<LogBatch>,
    mut delivery: Box<dyn Delivery>,
    quiet_interval: Duration,
) {
    let mut window: Vec<LogBatch> = Vec::new();

    loop {
        if window.is_empty() {
            match receiver.recv() {
                Ok(entry) => window.push(entry),
                Err(_) => break,
            }
        } else {
            match receiver.recv_timeout(quiet_interval) {
                Ok(entry) => window.push(entry),
                Err(RecvTimeoutError::Timeout) => flush_window(&mut window, delivery.as_mut()),
                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    }

    // Shutdown: a residual window is flushed as a final batch.
    flush_window(&mut window, delivery.as_mut());
}

/// Extract the closed window as one batch and hand it to delivery. A fresh
/// window replaces it before the delivery outcome is known; failures are
/// reported with the offending batch and discarded.
fn flush_window(window: &mut Vec<LogBatch>, delivery: &mut dyn Delivery) {
    if window.is_empty() {
        return;
    }

    let mut batch = std::mem::take(window);
    for entry in &mut batch {
        entry.payload.normalize_errors();
    }

    if let Err(error) = delivery.deliver(&batch) {
        let dump = serde_json::to_string(&batch)
            .unwrap_or_else(|_| "<unserializable batch>".to_string());
        eprintln!(
            "[LOGGER ERROR] Error while delivering log batch: {}; batch: {}",
            error, dump
        );
    }
}
