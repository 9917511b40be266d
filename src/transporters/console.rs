//! Console transporter implementation

use crate::core::{LogLevel, LogMessage, Template, Transporter};
use colored::Colorize;

/// Process output stream a severity routes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleStream {
    Stdout,
    Stderr,
}

/// Which stream a severity's output goes to: warnings and errors to the
/// error stream, everything else (including the general `Log` level) to
/// standard output.
#[must_use]
pub fn stream_for(level: LogLevel) -> ConsoleStream {
    match level {
        LogLevel::Warn | LogLevel::Error => ConsoleStream::Stderr,
        LogLevel::Log | LogLevel::Debug | LogLevel::Info => ConsoleStream::Stdout,
    }
}

/// Direct, synchronous per-severity console output: one line per event
/// carrying the templated `(timestamp, message, payload)`.
pub struct ConsoleTransporter {
    template: Option<Template>,
    use_colors: bool,
}

impl ConsoleTransporter {
    pub fn new() -> Self {
        Self {
            template: None,
            use_colors: true,
        }
    }

    pub fn with_colors(use_colors: bool) -> Self {
        Self {
            template: None,
            use_colors,
        }
    }

    /// Override the default identity-projection template.
    #[must_use]
    pub fn with_template(mut self, template: Template) -> Self {
        self.template = Some(template);
        self
    }

    /// Render one output line for a templated payload.
    fn format_line(&self, payload: &LogMessage, level: LogLevel) -> String {
        let level_str = if self.use_colors {
            format!("{:5}", level.to_str())
                .color(level.color_code())
                .to_string()
        } else {
            format!("{:5}", level.to_str())
        };

        let mut line = format!("[{}] [{}] {}", payload.timestamp, level_str, payload.message);
        for value in &payload.payload {
            line.push(' ');
            line.push_str(&value.to_string());
        }
        line
    }
}

impl Default for ConsoleTransporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Transporter for ConsoleTransporter {
    fn do_write(&mut self, payload: LogMessage, level: LogLevel) {
        let line = self.format_line(&payload, level);
        match stream_for(level) {
            ConsoleStream::Stderr => eprintln!("{}", line),
            ConsoleStream::Stdout => println!("{}", line),
        }
    }

    fn template(&self) -> Option<&Template> {
        self.template.as_ref()
    }

    fn name(&self) -> &str {
        "console"
    }
}
