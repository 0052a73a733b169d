//! Structured JSON logger
//!
//! One log line = one event, written synchronously with no buffering.
//! The event key comes first, remaining fields in sorted order, so log
//! output is deterministic.

use std::io::{self, Write};
use std::sync::Mutex;

/// Warning sink injected into the read engine.
///
/// The engine only ever warns (scope overrides); failures surface as
/// `ReadError`, never through the log stream.
pub trait Logger {
    /// Emit a non-fatal warning
    fn warn(&self, message: &str);
}

/// Logger that writes one JSON line per warning to stdout
#[derive(Debug, Default)]
pub struct JsonLogger;

impl JsonLogger {
    fn write_line<W: Write>(event: &str, fields: &[(&str, &str)], writer: &mut W) {
        let mut output = String::with_capacity(128);

        output.push('{');
        output.push_str("\"event\":\"");
        Self::escape_json_string(&mut output, event);
        output.push('"');
        output.push_str(",\"severity\":\"WARN\"");

        let mut sorted_fields: Vec<_> = fields.iter().collect();
        sorted_fields.sort_by_key(|(k, _)| *k);

        for (key, value) in sorted_fields {
            output.push_str(",\"");
            Self::escape_json_string(&mut output, key);
            output.push_str("\":\"");
            Self::escape_json_string(&mut output, value);
            output.push('"');
        }

        output.push('}');
        output.push('\n');

        // One syscall per line
        let _ = writer.write_all(output.as_bytes());
        let _ = writer.flush();
    }

    fn escape_json_string(output: &mut String, s: &str) {
        for c in s.chars() {
            match c {
                '"' => output.push_str("\\\""),
                '\\' => output.push_str("\\\\"),
                '\n' => output.push_str("\\n"),
                '\r' => output.push_str("\\r"),
                '\t' => output.push_str("\\t"),
                c if c.is_control() => {
                    output.push_str(&format!("\\u{:04x}", c as u32));
                }
                c => output.push(c),
            }
        }
    }
}

impl Logger for JsonLogger {
    fn warn(&self, message: &str) {
        Self::write_line(
            "BATCH_SCOPE_WARNING",
            &[("message", message)],
            &mut io::stdout(),
        );
    }
}

/// Logger that drops everything, for hosts that handle warnings elsewhere
#[derive(Debug, Default)]
pub struct NullLogger;

impl Logger for NullLogger {
    fn warn(&self, _message: &str) {}
}

/// Logger that records warnings for assertions in tests
#[derive(Debug, Default)]
pub struct CaptureLogger {
    warnings: Mutex<Vec<String>>,
}

impl CaptureLogger {
    /// Empty capture logger
    pub fn new() -> Self {
        Self::default()
    }

    /// Warnings recorded so far, oldest first
    pub fn warnings(&self) -> Vec<String> {
        self.warnings.lock().unwrap().clone()
    }
}

impl Logger for CaptureLogger {
    fn warn(&self, message: &str) {
        self.warnings.lock().unwrap().push(message.to_string());
    }
}
