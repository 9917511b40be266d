//! TCP delivery for the batching transporter
//!
//! Sends each flushed batch to a remote collector as one JSON array line.
//! Useful for centralized logging in distributed systems.

use super::http::{Delivery, LogBatch};
use crate::core::{LoggerError, Result};
use std::io::Write;
use std::net::{TcpStream, ToSocketAddrs};
use std::time::Duration;

/// Delivery capability backed by a TCP connection
///
/// # Example
///
/// ```no_run
/// use fanlog::prelude::*;
/// use fanlog::transporters::TcpDelivery;
///
/// let delivery = TcpDelivery::connect("127.0.0.1:8080")
///     .expect("Failed to connect to log collector");
///
/// let logger = Logger::builder()
///     .transporter(HttpTransporter::new(delivery))
///     .build();
/// logger.info("This batch will be sent to 127.0.0.1:8080");
/// ```
pub struct TcpDelivery {
    stream: Option<TcpStream>,
    address: String,
}

impl TcpDelivery {
    /// Connect to a remote collector
    ///
    /// # Arguments
    ///
    /// * `addr` - Socket address (e.g., "localhost:8080", "192.168.1.1:9000")
    ///
    /// # Errors
    ///
    /// Returns error if connection fails
    pub fn connect(addr: impl ToSocketAddrs + ToString) -> Result<Self> {
        let address = addr.to_string();
        let stream = Self::open(&address)?;

        Ok(Self {
            stream: Some(stream),
            address,
        })
    }

    fn open(address: &str) -> Result<TcpStream> {
        let stream = TcpStream::connect(address)?;

        // Timeouts prevent a dead collector from wedging the batch worker
        stream.set_write_timeout(Some(Duration::from_secs(5)))?;
        stream.set_read_timeout(Some(Duration::from_secs(5)))?;

        // Enable TCP_NODELAY for low-latency delivery
        stream.set_nodelay(true)?;

        Ok(stream)
    }
}

impl Delivery for TcpDelivery {
    fn deliver(&mut self, batch: &[LogBatch]) -> Result<()> {
        let mut line = serde_json::to_string(batch)?;
        line.push('\n');

        // A connection lost on a previous batch is reattempted here; the
        // failed batch itself was already discarded.
        if self.stream.is_none() {
            self.stream = Some(Self::open(&self.address)?);
        }

        let stream = self
            .stream
            .as_mut()
            .ok_or_else(|| LoggerError::writer("TCP stream not connected"))?;

        if let Err(e) = stream.write_all(line.as_bytes()).and_then(|()| stream.flush()) {
            self.stream = None;
            return Err(LoggerError::delivery(&self.address, e.to_string()));
        }

        Ok(())
    }
}

impl Drop for TcpDelivery {
    fn drop(&mut self) {
        if let Some(ref mut stream) = self.stream {
            let _ = stream.flush();
        }
    }
}
