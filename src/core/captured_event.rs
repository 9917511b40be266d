//! Captured event structure and payload values
//!
//! A [`CapturedEvent`] is the normalized record built exactly once per
//! accepted log call, immediately before dispatch. Transporters only ever
//! read it; the template seam projects it into the sink-specific
//! [`LogMessage`] wire shape.

use super::log_level::LogLevel;
use chrono::Utc;
use serde::{Serialize, Serializer};
use std::fmt;
use std::sync::Arc;

/// A single slot in a log call's extra-argument payload.
///
/// Plain data variants pass through every sink unchanged. The `Error`
/// variant keeps the original error object alive through capture and
/// windowing; the batching sink replaces it with its string trace at flush
/// time via [`LogMessage::normalize_errors`].
#[derive(Debug, Clone)]
pub enum PayloadValue {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
    Json(serde_json::Value),
    Error(Arc<dyn std::error::Error + Send + Sync>),
}

impl PayloadValue {
    /// Wrap an error object as a payload slot.
    pub fn error<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        PayloadValue::Error(Arc::new(err))
    }

    /// Render an error's trace: its message followed by every cause in the
    /// source chain.
    pub fn trace_of(err: &(dyn std::error::Error + 'static)) -> String {
        use std::fmt::Write;

        let mut out = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            let _ = write!(out, ": caused by: {}", cause);
            source = cause.source();
        }
        out
    }

    /// Whether this slot holds an error object.
    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, PayloadValue::Error(_))
    }
}

impl fmt::Display for PayloadValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PayloadValue::String(s) => write!(f, "{}", s),
            PayloadValue::Int(i) => write!(f, "{}", i),
            PayloadValue::Float(fl) => write!(f, "{}", fl),
            PayloadValue::Bool(b) => write!(f, "{}", b),
            PayloadValue::Null => write!(f, "null"),
            PayloadValue::Json(v) => write!(f, "{}", v),
            PayloadValue::Error(e) => write!(f, "{}", e),
        }
    }
}

impl Serialize for PayloadValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            PayloadValue::String(s) => serializer.serialize_str(s),
            PayloadValue::Int(i) => serializer.serialize_i64(*i),
            PayloadValue::Float(fl) => serializer.serialize_f64(*fl),
            PayloadValue::Bool(b) => serializer.serialize_bool(*b),
            PayloadValue::Null => serializer.serialize_unit(),
            PayloadValue::Json(v) => v.serialize(serializer),
            PayloadValue::Error(e) => {
                serializer.serialize_str(&Self::trace_of(e.as_ref()))
            }
        }
    }
}

impl From<String> for PayloadValue {
    fn from(s: String) -> Self {
        PayloadValue::String(s)
    }
}

impl From<&str> for PayloadValue {
    fn from(s: &str) -> Self {
        PayloadValue::String(s.to_string())
    }
}

impl From<i64> for PayloadValue {
    fn from(i: i64) -> Self {
        PayloadValue::Int(i)
    }
}

impl From<i32> for PayloadValue {
    fn from(i: i32) -> Self {
        PayloadValue::Int(i as i64)
    }
}

impl From<f64> for PayloadValue {
    fn from(f: f64) -> Self {
        PayloadValue::Float(f)
    }
}

impl From<bool> for PayloadValue {
    fn from(b: bool) -> Self {
        PayloadValue::Bool(b)
    }
}

impl From<serde_json::Value> for PayloadValue {
    fn from(v: serde_json::Value) -> Self {
        PayloadValue::Json(v)
    }
}

/// The normalized record captured once per accepted log call.
#[derive(Debug, Clone, Serialize)]
pub struct CapturedEvent {
    pub level: LogLevel,
    pub message: String,
    pub payload: Vec<PayloadValue>,
    /// Capture time, epoch milliseconds.
    pub timestamp: i64,
}

impl CapturedEvent {
    /// Sanitize log message to prevent log injection attacks
    ///
    /// Replaces newlines, carriage returns, and tabs with escape sequences
    /// to prevent attackers from injecting fake log entries.
    fn sanitize_message(message: &str) -> String {
        message
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    pub fn new(level: LogLevel, message: String, payload: Vec<PayloadValue>) -> Self {
        Self {
            level,
            message: Self::sanitize_message(&message),
            payload,
            timestamp: Utc::now().timestamp_millis(),
        }
    }
}

/// Default templated wire shape: the identity projection of a captured
/// event's message, timestamp and payload.
#[derive(Debug, Clone, Serialize)]
pub struct LogMessage {
    pub message: String,
    pub timestamp: i64,
    pub payload: Vec<PayloadValue>,
}

impl LogMessage {
    pub fn from_event(event: &CapturedEvent) -> Self {
        Self {
            message: event.message.clone(),
            timestamp: event.timestamp,
            payload: event.payload.clone(),
        }
    }

    /// Replace every error payload slot with its string trace. Plain values
    /// pass through unchanged. The batching sink applies this once per
    /// batch, at flush time.
    pub fn normalize_errors(&mut self) {
        for slot in &mut self.payload {
            if let PayloadValue::Error(err) = slot {
                let trace = PayloadValue::trace_of(err.as_ref());
                *slot = PayloadValue::String(trace);
            }
        }
    }
}
