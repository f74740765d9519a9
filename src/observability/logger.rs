//! Structured JSON logger
//!
//! - One log line = one event
//! - `event`, `severity` and `ts` lead every line, remaining fields follow
//!   in alphabetical order
//! - Synchronous, no buffering
//! - ERROR and FATAL go to stderr, everything else to stdout

use std::collections::BTreeMap;
use std::fmt;
use std::io::{self, Write};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    /// Normal operations
    Info = 1,
    /// Rejected requests and other recoverable issues
    Warn = 2,
    /// Operation failures
    Error = 3,
    /// Unrecoverable, process exits
    Fatal = 4,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
            Severity::Fatal => "FATAL",
        }
    }

    fn to_stderr(self) -> bool {
        self >= Severity::Error
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Serialize)]
struct LogLine<'a> {
    event: &'a str,
    severity: Severity,
    ts: String,
    #[serde(flatten)]
    fields: BTreeMap<&'a str, &'a str>,
}

/// A structured logger that outputs JSON lines
pub struct Logger;

impl Logger {
    /// Log an event with the given severity and fields
    pub fn log(severity: Severity, event: &str, fields: &[(&str, &str)]) {
        let line = Self::render(severity, event, fields, Utc::now());
        if severity.to_stderr() {
            Self::write_line(&mut io::stderr(), &line);
        } else {
            Self::write_line(&mut io::stdout(), &line);
        }
    }

    /// Render one log line, including the trailing newline
    fn render(
        severity: Severity,
        event: &str,
        fields: &[(&str, &str)],
        at: DateTime<Utc>,
    ) -> String {
        let line = LogLine {
            event,
            severity,
            ts: at.to_rfc3339_opts(SecondsFormat::Millis, true),
            fields: fields.iter().copied().collect(),
        };

        // a map of strings always serializes
        let mut output = serde_json::to_string(&line).unwrap_or_default();
        output.push('\n');
        output
    }

    fn write_line<W: Write>(writer: &mut W, line: &str) {
        let _ = writer.write_all(line.as_bytes());
        let _ = writer.flush();
    }

    pub fn info(event: &str, fields: &[(&str, &str)]) {
        Self::log(Severity::Info, event, fields);
    }

    pub fn warn(event: &str, fields: &[(&str, &str)]) {
        Self::log(Severity::Warn, event, fields);
    }

    pub fn error(event: &str, fields: &[(&str, &str)]) {
        Self::log(Severity::Error, event, fields);
    }

    pub fn fatal(event: &str, fields: &[(&str, &str)]) {
        Self::log(Severity::Fatal, event, fields);
    }
}
