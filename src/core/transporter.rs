//! Transporter trait for log output destinations
//!
//! The contract splits into a fixed entry point and a sink-specific write:
//! the logger's dispatch thread always calls [`Transporter::write`], which
//! applies the transporter's template (or the identity projection) and hands
//! the result to [`Transporter::do_write`]. Concrete sinks supply `do_write`
//! and optionally a template; they do not reimplement `write`.

use super::captured_event::{CapturedEvent, LogMessage};
use super::log_level::LogLevel;

/// Pure transform from a captured event to the sink's wire shape.
///
/// Held by composition: a transporter carries its template as a strategy
/// closure, so alternate sinks need not share any base type.
pub type Template = Box<dyn Fn(&CapturedEvent) -> LogMessage + Send + Sync>;

pub trait Transporter: Send {
    /// Sink-specific write of an already-templated payload.
    fn do_write(&mut self, payload: LogMessage, level: LogLevel);

    /// The transporter's template, if it overrides the default projection.
    fn template(&self) -> Option<&Template> {
        None
    }

    /// Fixed entry point called by the dispatch thread. Reads the event,
    /// never mutates it.
    fn write(&mut self, event: &CapturedEvent, level: LogLevel) {
        let payload = match self.template() {
            Some(template) => template(event),
            None => LogMessage::from_event(event),
        };
        self.do_write(payload, level);
    }

    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::captured_event::PayloadValue;

    struct Recording {
        template: Option<Template>,
        written: Vec<(LogLevel, LogMessage)>,
    }

    impl Transporter for Recording {
        fn do_write(&mut self, payload: LogMessage, level: LogLevel) {
            self.written.push((level, payload));
        }

        fn template(&self) -> Option<&Template> {
            self.template.as_ref()
        }

        fn name(&self) -> &str {
            "recording"
        }
    }

    fn sample_event() -> CapturedEvent {
        CapturedEvent::new(
            LogLevel::Warn,
            "m".to_string(),
            vec![PayloadValue::from(1), PayloadValue::from(2)],
        )
    }

    #[test]
    fn test_write_defaults_to_identity_projection() {
        let mut sink = Recording {
            template: None,
            written: Vec::new(),
        };
        let event = sample_event();
        sink.write(&event, event.level);

        let (level, payload) = &sink.written[0];
        assert_eq!(*level, LogLevel::Warn);
        assert_eq!(payload.message, "m");
        assert_eq!(payload.timestamp, event.timestamp);
        assert_eq!(payload.payload.len(), 2);
    }

    #[test]
    fn test_write_applies_custom_template() {
        let mut sink = Recording {
            template: Some(Box::new(|event| LogMessage {
                message: format!("app: {}", event.message),
                timestamp: event.timestamp,
                payload: Vec::new(),
            })),
            written: Vec::new(),
        };
        let event = sample_event();
        sink.write(&event, event.level);

        let (_, payload) = &sink.written[0];
        assert_eq!(payload.message, "app: m");
        assert!(payload.payload.is_empty());
        // the event itself is untouched
        assert_eq!(event.payload.len(), 2);
    }
}
